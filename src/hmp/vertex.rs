// hmp-terrain/src/hmp/vertex.rs
//! Per-revision decoding of the row-major vertex grid.
//!
//! Both decodable revisions store one 4-byte record per vertex: a 16-bit
//! quantized height followed by two revision-specific bytes. HMP5 packs a
//! normal-table index and a pad byte; HMP7 packs two signed quantized
//! normal components. The x/y position of a vertex comes purely from its
//! grid index and the header's triangle spacing.

use serde::{Deserialize, Serialize};

use crate::error::HmpResult;
use crate::hmp::header::TerrainHeader;
use crate::hmp::normals;
use crate::reader::SliceReader;

/// Size of one on-disk vertex record in bytes, shared by both layouts
pub const VERTEX_RECORD_SIZE: usize = 4;

/// Shape of the two bytes following the height field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexLayout {
    /// HMP5: one normal-table index byte plus one pad byte
    NormalIndex,
    /// HMP7: signed x/y normal components, z fixed at 1 before renormalizing
    NormalXy,
}

impl VertexLayout {
    fn decode_normal(self, reader: &mut SliceReader<'_>) -> HmpResult<[f32; 3]> {
        match self {
            Self::NormalIndex => {
                let index = reader.read_u8()?;
                reader.skip(1)?;
                Ok(normals::lookup(index))
            }
            Self::NormalXy => {
                // The 8-bit quantization and the fixed z of 1 before
                // renormalization are how the format works, not a general
                // unit-sphere mapping.
                let nx = reader.read_i8()? as f32 / 0x80 as f32;
                let ny = reader.read_i8()? as f32 / 0x80 as f32;
                Ok(normalize([nx, ny, 1.0]))
            }
        }
    }
}

/// The decoded `height x width` vertex grid, row-major
#[derive(Debug, Clone)]
pub struct VertexGrid {
    /// Vertices per row
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// World-space positions, row-major
    pub positions: Vec<[f32; 3]>,
    /// Unit normals, parallel to `positions`
    pub normals: Vec<[f32; 3]>,
}

/// Decode the whole vertex grid from the cursor's current position.
///
/// The full projected extent is bounds-checked before the first record is
/// read, so a truncated vertex payload fails without producing any vertices.
pub fn decode_grid(
    reader: &mut SliceReader<'_>,
    header: &TerrainHeader,
    layout: VertexLayout,
) -> HmpResult<VertexGrid> {
    let width = header.width();
    let height = header.height();
    reader.require(width * height * VERTEX_RECORD_SIZE)?;

    let mut positions = Vec::with_capacity(width * height);
    let mut normals = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let z = reader.read_u16()?;
            positions.push([
                x as f32 * header.ftrisize_x,
                y as f32 * header.ftrisize_y,
                (z as f32 / 0xffff as f32 - 0.5) * header.ftrisize_x * 8.0,
            ]);
            normals.push(layout.decode_normal(reader)?);
        }
    }

    Ok(VertexGrid {
        width,
        height,
        positions,
        normals,
    })
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len == 0.0 {
        return v;
    }
    [v[0] / len, v[1] / len, v[2] / len]
}
