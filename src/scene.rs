// hmp-terrain/src/scene.rs
//! Output data model for decoded terrain files.
//!
//! An HMP file always decodes to exactly one mesh, exactly one material and
//! one flat root node; the format has no node graph. The mesh uses the
//! legacy quad-strip convention of duplicating every grid vertex once per
//! adjacent face, so the position/normal/UV buffers are always
//! `4 * faces.len()` entries long and faces never share indices.

use serde::{Deserialize, Serialize};

/// Scene capability flags
pub mod flags {
    /// The scene contains heightmap terrain data
    pub const TERRAIN: u32 = 0x10;
}

/// A decoded terrain scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Capability flags (see [`flags`])
    pub flags: u32,
    /// Meshes in the scene; always exactly one for HMP
    pub meshes: Vec<Mesh>,
    /// Materials in the scene; always exactly one for HMP
    pub materials: Vec<Material>,
    /// Synthetic root node referencing the terrain mesh
    pub root: Node,
}

impl Scene {
    /// Check whether the terrain capability flag is set
    pub fn is_terrain(&self) -> bool {
        self.flags & flags::TERRAIN != 0
    }
}

/// A scene node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Node name
    pub name: String,
    /// Indices into [`Scene::meshes`]
    pub mesh_indices: Vec<u32>,
}

impl Node {
    /// The flat root node every decoded terrain gets
    pub fn terrain_root() -> Self {
        Self {
            name: "terrain_root".to_string(),
            mesh_indices: vec![0],
        }
    }
}

/// A quad face; four indices into the duplicated vertex buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    /// Corner indices in winding order
    pub indices: [u32; 4],
}

/// A terrain mesh with per-face duplicated vertex data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    /// World-space vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Unit vertex normals, parallel to `positions`
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates, parallel to `positions`; present only when the
    /// file embeds at least one skin
    pub uvs: Option<Vec<[f32; 2]>>,
    /// Quad face list
    pub faces: Vec<Face>,
    /// Index into [`Scene::materials`]; always 0 for HMP
    pub material_index: u32,
}

impl Mesh {
    /// Number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of entries in the duplicated vertex buffers
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Check whether the mesh carries texture coordinates
    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }
}

/// Shading model requested by a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadingModel {
    /// Flat per-face shading
    Flat,
    /// Gouraud per-vertex shading
    Gouraud,
}

/// Raw pixel layout of an embedded skin image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkinFormat {
    /// 16-bit RGB 5:6:5
    Rgb565,
    /// 16-bit ARGB 4:4:4:4
    Argb4444,
    /// 24-bit RGB
    Rgb8,
    /// 32-bit RGBA
    Rgba8,
    /// 8-bit indices preceded by a 256-entry RGB palette
    Paletted8,
}

/// An image embedded in the terrain file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedTexture {
    /// Pixel layout of `data`
    pub format: SkinFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Raw payload; for [`SkinFormat::Paletted8`] the 768-byte palette
    /// precedes the indices
    pub data: Vec<u8>,
}

/// A terrain material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Material name
    pub name: String,
    /// Shading model
    pub shading: ShadingModel,
    /// Diffuse color
    pub diffuse: [f32; 3],
    /// Specular color
    pub specular: [f32; 3],
    /// Ambient color
    pub ambient: [f32; 3],
    /// First embedded skin, if the file carries any
    pub texture: Option<EmbeddedTexture>,
}

impl Material {
    /// The flat gray material used when a file embeds no skins
    pub fn default_terrain() -> Self {
        Self {
            name: "DefaultMaterial".to_string(),
            shading: ShadingModel::Gouraud,
            diffuse: [0.6, 0.6, 0.6],
            specular: [0.6, 0.6, 0.6],
            ambient: [0.05, 0.05, 0.05],
            texture: None,
        }
    }
}
