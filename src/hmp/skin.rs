// hmp-terrain/src/hmp/skin.rs
//! Embedded skin chunk parsing.
//!
//! The skin chunks sit between the file header and the vertex grid. Each
//! chunk is a 4-byte type tag, 4-byte width and 4-byte height followed by a
//! type-dependent image payload. Only the first skin is ever materialized
//! into a [`Material`]; the rest are measured and skipped so the cursor
//! lands on the vertex payload.
//!
//! Decoding or measuring the image payload itself is delegated to a
//! [`SkinLumpCodec`]. The bundled [`RawSkinCodec`] captures the raw pixel
//! bytes without converting them; both of its paths derive the payload
//! length from the same format table, so reading and skipping always
//! consume the same number of bytes.

use crate::error::{HmpError, HmpResult};
use crate::reader::SliceReader;
use crate::scene::{EmbeddedTexture, Material, ShadingModel, SkinFormat};

/// Decodes or skips one skin image payload
pub trait SkinLumpCodec: Send + Sync {
    /// Decode the payload at the cursor into a material, advancing the
    /// cursor past it
    fn read_material(
        &self,
        reader: &mut SliceReader<'_>,
        kind: u32,
        width: u32,
        height: u32,
    ) -> HmpResult<Material>;

    /// Measure the payload at the cursor and advance past it without
    /// materializing anything
    fn skip_lump(
        &self,
        reader: &mut SliceReader<'_>,
        kind: u32,
        width: u32,
        height: u32,
    ) -> HmpResult<()>;
}

/// Skin codec that captures the raw payload bytes untouched
#[derive(Debug, Default)]
pub struct RawSkinCodec;

impl RawSkinCodec {
    fn format(kind: u32) -> HmpResult<SkinFormat> {
        match kind & 0xF {
            2 => Ok(SkinFormat::Rgb565),
            3 => Ok(SkinFormat::Argb4444),
            4 => Ok(SkinFormat::Rgb8),
            5 => Ok(SkinFormat::Rgba8),
            6 => Ok(SkinFormat::Paletted8),
            _ => Err(HmpError::UnreadableSkinChunk(format!(
                "unknown skin image type 0x{kind:08X}"
            ))),
        }
    }

    /// Payload length in bytes for a skin image. Shared by the read and
    /// skip paths.
    fn payload_len(format: SkinFormat, width: u32, height: u32) -> usize {
        let pixels = width as usize * height as usize;
        match format {
            SkinFormat::Rgb565 | SkinFormat::Argb4444 => pixels * 2,
            SkinFormat::Rgb8 => pixels * 3,
            SkinFormat::Rgba8 => pixels * 4,
            SkinFormat::Paletted8 => 256 * 3 + pixels,
        }
    }
}

impl SkinLumpCodec for RawSkinCodec {
    fn read_material(
        &self,
        reader: &mut SliceReader<'_>,
        kind: u32,
        width: u32,
        height: u32,
    ) -> HmpResult<Material> {
        let format = Self::format(kind)?;
        let data = reader
            .read_bytes(Self::payload_len(format, width, height))?
            .to_vec();
        Ok(Material {
            name: "terrain_skin".to_string(),
            shading: ShadingModel::Gouraud,
            diffuse: [1.0, 1.0, 1.0],
            specular: [0.0, 0.0, 0.0],
            ambient: [0.05, 0.05, 0.05],
            texture: Some(EmbeddedTexture {
                format,
                width,
                height,
                data,
            }),
        })
    }

    fn skip_lump(
        &self,
        reader: &mut SliceReader<'_>,
        kind: u32,
        width: u32,
        height: u32,
    ) -> HmpResult<()> {
        let format = Self::format(kind)?;
        reader.skip(Self::payload_len(format, width, height))
    }
}

/// Materialize the first of `numskins` skin chunks and skip the remainder.
///
/// The cursor must sit on the first chunk; on success it sits just past the
/// last one. A type tag of 0 means this file carries the double-header
/// quirk of one sub-variant: skip 8 bytes and re-read the tag once.
pub fn read_first_skin(
    reader: &mut SliceReader<'_>,
    numskins: u32,
    codec: &dyn SkinLumpCodec,
) -> HmpResult<Material> {
    debug_assert!(numskins != 0);

    let mut kind = reader.read_u32()?;
    if kind == 0 {
        reader.skip(8)?;
        kind = reader.read_u32()?;
        if kind == 0 {
            return Err(HmpError::UnreadableSkinChunk(
                "skin type tag is zero even after the double-header retry".to_string(),
            ));
        }
    }
    let width = reader.read_u32()?;
    let height = reader.read_u32()?;
    let material = codec.read_material(reader, kind, width, height)?;

    // skip every other skin; only the first one is ever used
    for _ in 1..numskins {
        reader.require(12)?;
        let kind = reader.read_u32()?;
        let width = reader.read_u32()?;
        let height = reader.read_u32()?;
        codec.skip_lump(reader, kind, width, height)?;
    }

    Ok(material)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(kind: u32, width: u32, height: u32, payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&kind.to_le_bytes());
        buf.extend_from_slice(&width.to_le_bytes());
        buf.extend_from_slice(&height.to_le_bytes());
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn materializes_first_skin_only() {
        let mut buf = chunk(5, 2, 2, &[0xAB; 16]); // RGBA8, 2x2
        buf.extend_from_slice(&chunk(4, 1, 1, &[1, 2, 3])); // RGB8, 1x1
        buf.extend_from_slice(&chunk(2, 2, 1, &[0; 4])); // 565, 2x1

        let mut reader = SliceReader::new(&buf);
        let material = read_first_skin(&mut reader, 3, &RawSkinCodec).unwrap();

        let tex = material.texture.unwrap();
        assert_eq!(tex.format, SkinFormat::Rgba8);
        assert_eq!(tex.data, vec![0xAB; 16]);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn zero_tag_retries_once() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&[0u8; 8]); // double-header filler
        buf.extend_from_slice(&chunk(4, 1, 2, &[0; 6]));

        let mut reader = SliceReader::new(&buf);
        let material = read_first_skin(&mut reader, 1, &RawSkinCodec).unwrap();
        let tex = material.texture.unwrap();
        assert_eq!(tex.format, SkinFormat::Rgb8);
        assert_eq!((tex.width, tex.height), (1, 2));
    }

    #[test]
    fn zero_tag_twice_is_unreadable() {
        let buf = vec![0u8; 32];
        let mut reader = SliceReader::new(&buf);
        assert!(matches!(
            read_first_skin(&mut reader, 1, &RawSkinCodec),
            Err(HmpError::UnreadableSkinChunk(_))
        ));
    }

    #[test]
    fn truncated_skip_fails() {
        let mut buf = chunk(5, 2, 2, &[0xAB; 16]);
        // second chunk header promises a 16-byte payload but delivers 3
        buf.extend_from_slice(&chunk(5, 2, 2, &[0; 3]));

        let mut reader = SliceReader::new(&buf);
        assert!(matches!(
            read_first_skin(&mut reader, 2, &RawSkinCodec),
            Err(HmpError::Truncated { .. })
        ));
    }

    #[test]
    fn unknown_image_type_is_unreadable() {
        let buf = chunk(9, 2, 2, &[0; 64]);
        let mut reader = SliceReader::new(&buf);
        assert!(matches!(
            read_first_skin(&mut reader, 1, &RawSkinCodec),
            Err(HmpError::UnreadableSkinChunk(_))
        ));
    }

    #[test]
    fn read_and_skip_consume_the_same_length() {
        let payload_len = RawSkinCodec::payload_len(SkinFormat::Paletted8, 4, 4);
        assert_eq!(payload_len, 256 * 3 + 16);
        let buf = chunk(6, 4, 4, &vec![7u8; payload_len]);

        let mut read_cursor = SliceReader::new(&buf[12..]);
        RawSkinCodec
            .read_material(&mut read_cursor, 6, 4, 4)
            .unwrap();

        let mut skip_cursor = SliceReader::new(&buf[12..]);
        RawSkinCodec.skip_lump(&mut skip_cursor, 6, 4, 4).unwrap();

        assert_eq!(read_cursor.position(), skip_cursor.position());
    }
}
