// hmp-terrain/src/hmp/mod.rs
//! HMP (3D GameStudio heightmap terrain) parser.
//!
//! HMP files encode a terrain as a row-major grid of quantized height
//! samples plus normals, with an optional set of embedded skin images in
//! front of the vertex payload. Three revisions share the same header:
//!
//! | Magic  | Engine           | Vertex payload                     |
//! |--------|------------------|------------------------------------|
//! | `HMP4` | 3D GameStudio A4 | rejected, not decoded              |
//! | `HMP5` | 3D GameStudio A5 | height + normal-table index        |
//! | `HMP7` | 3D GameStudio A7 | height + signed x/y normal bytes   |
//!
//! # File layout
//! ```text
//! offset 0    magic word (4 bytes, either byte order)
//! offset 4    header fields through byte 84
//! offset 84   skin chunks, if numskins > 0
//! then        36 bytes of unknown purpose
//! then        width * height vertex records, 4 bytes each
//! ```
//!
//! The decode is a pure function of the input buffer: it performs no I/O,
//! holds no state across calls, and either returns a complete
//! [`Scene`] or the first error it hits.

pub mod faces;
pub mod header;
pub mod normals;
pub mod skin;
pub mod vertex;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HmpError, HmpResult};
use crate::reader::SliceReader;
use crate::scene::{flags, Material, Node, Scene};

use header::{TerrainHeader, HEADER_SIZE, PRE_VERTEX_GAP};
use skin::{RawSkinCodec, SkinLumpCodec};
use vertex::VertexLayout;

/// Minimum file size to inspect the magic word and begin header access
pub const MIN_FILE_SIZE: usize = 50;

/// On-disk format revision, named after the engine generation that wrote it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Revision {
    /// 3D GameStudio A4; recognized but not decoded
    Hmp4,
    /// 3D GameStudio A5
    Hmp5,
    /// 3D GameStudio A7
    Hmp7,
}

impl Revision {
    /// Match the 4-byte magic word, accepting both byte orders of each tag
    pub fn detect(magic: &[u8; 4]) -> Option<Self> {
        match magic {
            b"HMP4" | b"4PMH" => Some(Self::Hmp4),
            b"HMP5" | b"5PMH" => Some(Self::Hmp5),
            b"HMP7" | b"7PMH" => Some(Self::Hmp7),
            _ => None,
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hmp4 => write!(f, "HMP4"),
            Self::Hmp5 => write!(f, "HMP5"),
            Self::Hmp7 => write!(f, "HMP7"),
        }
    }
}

/// HMP terrain parser
///
/// The parser itself is stateless; one instance can decode any number of
/// buffers. The skin image payloads are handed to a [`SkinLumpCodec`],
/// which defaults to [`RawSkinCodec`].
pub struct HmpParser {
    skin_codec: Box<dyn SkinLumpCodec>,
}

impl HmpParser {
    /// Create a parser with the default skin codec
    pub fn new() -> Self {
        Self {
            skin_codec: Box::new(RawSkinCodec),
        }
    }

    /// Create a parser that decodes skin payloads through `codec`
    pub fn with_skin_codec(codec: Box<dyn SkinLumpCodec>) -> Self {
        Self { skin_codec: codec }
    }

    /// File extensions this parser handles
    pub fn extensions(&self) -> &[&str] {
        &["hmp"]
    }

    /// Check whether `data` starts with a known HMP magic word
    pub fn can_parse(&self, data: &[u8]) -> bool {
        data.get(0..4)
            .and_then(|m| Revision::detect(m.try_into().ok()?))
            .is_some()
    }

    /// Decode a terrain file into a scene.
    ///
    /// `data` must be the complete file contents. On success the scene
    /// carries exactly one mesh, one material, a flat `terrain_root` node
    /// and the [`flags::TERRAIN`] bit; on failure nothing is returned.
    pub fn parse(&self, data: &[u8]) -> HmpResult<Scene> {
        if data.len() < MIN_FILE_SIZE {
            return Err(HmpError::FileTooSmall(format!(
                "{} bytes is below the {MIN_FILE_SIZE}-byte minimum",
                data.len()
            )));
        }

        // length checked above, the slice is always 4 bytes
        let magic: [u8; 4] = data[0..4]
            .try_into()
            .map_err(|_| HmpError::UnknownSubformat(printable(&data[0..4])))?;

        let mut scene = match Revision::detect(&magic) {
            None => return Err(HmpError::UnknownSubformat(printable(&magic))),
            Some(Revision::Hmp4) => {
                tracing::debug!("HMP subtype: 3D GameStudio A4, magic word is HMP4");
                return Err(HmpError::UnsupportedRevision(Revision::Hmp4));
            }
            Some(Revision::Hmp5) => {
                tracing::debug!("HMP subtype: 3D GameStudio A5, magic word is HMP5");
                self.read_terrain(data, VertexLayout::NormalIndex)?
            }
            Some(Revision::Hmp7) => {
                tracing::debug!("HMP subtype: 3D GameStudio A7, magic word is HMP7");
                self.read_terrain(data, VertexLayout::NormalXy)?
            }
        };

        scene.flags |= flags::TERRAIN;
        Ok(scene)
    }

    /// Shared decode pipeline for the HMP5 and HMP7 revisions; they differ
    /// only in the per-vertex layout.
    fn read_terrain(&self, data: &[u8], layout: VertexLayout) -> HmpResult<Scene> {
        let terrain_header = TerrainHeader::parse(data)?;
        terrain_header.validate()?;

        let mut reader = SliceReader::new(data);
        reader.seek(HEADER_SIZE)?;

        // the skin chunks precede the vertex payload on disk
        let material = if terrain_header.numskins > 0 {
            skin::read_first_skin(&mut reader, terrain_header.numskins, self.skin_codec.as_ref())?
        } else {
            Material::default_terrain()
        };

        // 36 bytes of unknown purpose before the vertex array; it starts
        // with a 2 and might be a frame header. Skipped as-is.
        reader.skip(PRE_VERTEX_GAP)?;

        let grid = vertex::decode_grid(&mut reader, &terrain_header, layout)?;

        let uvs = (terrain_header.numskins > 0)
            .then(|| faces::generate_texture_coords(grid.width, grid.height));
        let allocated = usize::try_from(terrain_header.numverts).unwrap_or(0);
        let mesh = faces::build_quad_mesh(&grid, uvs.as_deref(), allocated);

        Ok(Scene {
            flags: 0,
            meshes: vec![mesh],
            materials: vec![material],
            root: Node::terrain_root(),
        })
    }
}

impl Default for HmpParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Render raw magic bytes printable for error messages
fn printable(bytes: &[u8]) -> String {
    let mut out = String::new();
    for &b in bytes {
        if b.is_ascii_graphic() || b == b' ' {
            out.push(b as char);
        } else {
            out.push_str(&format!("\\x{b:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_all_magic_variants() {
        assert_eq!(Revision::detect(b"HMP4"), Some(Revision::Hmp4));
        assert_eq!(Revision::detect(b"4PMH"), Some(Revision::Hmp4));
        assert_eq!(Revision::detect(b"HMP5"), Some(Revision::Hmp5));
        assert_eq!(Revision::detect(b"5PMH"), Some(Revision::Hmp5));
        assert_eq!(Revision::detect(b"HMP7"), Some(Revision::Hmp7));
        assert_eq!(Revision::detect(b"7PMH"), Some(Revision::Hmp7));
        assert_eq!(Revision::detect(b"HMP8"), None);
    }

    #[test]
    fn can_parse_probes_magic_only() {
        let parser = HmpParser::new();
        assert!(parser.can_parse(b"HMP5 and some trailing junk"));
        assert!(parser.can_parse(b"7PMH"));
        assert!(!parser.can_parse(b"OBJ "));
        assert!(!parser.can_parse(b"HM"));
    }

    #[test]
    fn printable_escapes_non_graphic_bytes() {
        assert_eq!(printable(&[b'H', b'M', 0x01, 0xFF]), "HM\\x01\\xFF");
    }
}
