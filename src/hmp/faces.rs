// hmp-terrain/src/hmp/faces.rs
//! Quad face assembly and texture coordinate generation.
//!
//! The grid is turned into `(width-1) x (height-1)` quads. Faces do not
//! share vertices: every corner is copied into a fresh buffer, so the
//! output buffers are always exactly `4 * face_count` entries long. This
//! matches how the format's native renderer consumed the data.

use crate::hmp::vertex::VertexGrid;
use crate::scene::{Face, Mesh};

/// Per-grid-cell texture coordinates for a `width x height` grid.
///
/// The odd-looking `1/n + 1/n^2` scale is what the format uses; it maps the
/// last column/row slightly short of 1.
pub fn generate_texture_coords(width: usize, height: usize) -> Vec<[f32; 2]> {
    let fx = 1.0 / width as f32 + (1.0 / width as f32) / width as f32;
    let fy = 1.0 / height as f32 + (1.0 / height as f32) / height as f32;

    let mut uvs = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            uvs.push([fx * x as f32, fy * y as f32]);
        }
    }
    uvs
}

/// Build the quad mesh from a decoded grid, duplicating each corner vertex
/// per face.
///
/// `allocated_verts` is the vertex count the header promised. The grid
/// dimensions come from loose floor division, so a cell's bottom/right
/// corner can in principle index past that count; such a face keeps its
/// four reserved indices but gets default geometry instead of reading out
/// of bounds.
pub fn build_quad_mesh(
    grid: &VertexGrid,
    uvs: Option<&[[f32; 2]]>,
    allocated_verts: usize,
) -> Mesh {
    let width = grid.width;
    let height = grid.height;
    let face_count = (width - 1) * (height - 1);
    let upper_bound = allocated_verts.min(grid.positions.len());

    let mut faces = Vec::with_capacity(face_count);
    let mut positions = Vec::with_capacity(face_count * 4);
    let mut normals = Vec::with_capacity(face_count * 4);
    let mut out_uvs = uvs.map(|_| Vec::with_capacity(face_count * 4));

    let mut current = 0u32;
    for y in 0..height - 1 {
        let row0 = y * width;
        let row1 = (y + 1) * width;
        for x in 0..width - 1 {
            faces.push(Face {
                indices: [current, current + 1, current + 2, current + 3],
            });
            current += 4;

            let corners = [row0 + x, row1 + x, row1 + x + 1, row0 + x + 1];
            let degenerate = row0 + x + 1 >= upper_bound || row1 + x + 1 >= upper_bound;
            for corner in corners {
                if degenerate {
                    positions.push([0.0; 3]);
                    normals.push([0.0; 3]);
                    if let Some(out) = out_uvs.as_mut() {
                        out.push([0.0; 2]);
                    }
                } else {
                    positions.push(grid.positions[corner]);
                    normals.push(grid.normals[corner]);
                    if let (Some(out), Some(src)) = (out_uvs.as_mut(), uvs) {
                        out.push(src[corner]);
                    }
                }
            }
        }
    }

    Mesh {
        positions,
        normals,
        uvs: out_uvs,
        faces,
        material_index: 0,
    }
}
