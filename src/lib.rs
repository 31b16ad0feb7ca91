//! hmp-terrain
//!
//! A parser for 3D GameStudio heightmap terrain (`.hmp`) files.
//!
//! The on-disk format stores a terrain as a row-major grid of quantized
//! height samples and normals, optionally preceded by embedded skin images.
//! This crate decodes a fully loaded file buffer into a renderable scene:
//! one quad mesh with per-face duplicated vertices, one material, and a
//! flat root node. It performs no file I/O.
//!
//! # Supported revisions
//!
//! | Magic  | Engine           | Status     |
//! |--------|------------------|------------|
//! | `HMP4` | 3D GameStudio A4 | rejected   |
//! | `HMP5` | 3D GameStudio A5 | decoded    |
//! | `HMP7` | 3D GameStudio A7 | decoded    |
//!
//! # Example
//!
//! ```rust,ignore
//! use hmp_terrain::HmpParser;
//!
//! let data = std::fs::read("level.hmp")?;
//! let parser = HmpParser::new();
//! let scene = parser.parse(&data)?;
//!
//! println!("terrain has {} quads", scene.meshes[0].face_count());
//! ```

pub mod error;
pub mod hmp;
pub mod logging;
pub mod reader;
pub mod scene;

// Re-export main types
pub use error::{HmpError, HmpResult};
pub use hmp::{
    skin::{RawSkinCodec, SkinLumpCodec},
    HmpParser, Revision,
};
pub use reader::SliceReader;
pub use scene::{
    flags, EmbeddedTexture, Face, Material, Mesh, Node, Scene, ShadingModel, SkinFormat,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
