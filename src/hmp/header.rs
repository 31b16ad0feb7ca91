// hmp-terrain/src/hmp/header.rs
//! The fixed HMP file header shared by the A5 and A7 revisions.
//!
//! The on-disk record is 84 bytes and is followed by the skin chunks (if
//! any), a 36-byte block of unknown semantics, and finally the vertex grid.
//! A skinless file therefore needs at least 120 bytes before the first
//! vertex record.

use crate::error::{HmpError, HmpResult};
use crate::reader::SliceReader;

/// Size of the on-disk header record in bytes
pub const HEADER_SIZE: usize = 84;

/// Minimum file size to complete header validation: the 84-byte header plus
/// the 36-byte pre-vertex block
pub const MIN_VALIDATED_SIZE: usize = 120;

/// Size of the undocumented block between the skin chunks and the vertex
/// grid. It starts with a 2 and may be a frame header; the original format
/// documentation never says.
pub const PRE_VERTEX_GAP: usize = 36;

/// Parsed HMP file header
///
/// Field names follow the on-disk record. Several fields are carried but
/// never interpreted by this parser (`scale`, `scale_origin`,
/// `boundingradius`, `skinwidth`, `skinheight`, `numtris`, `num_stverts`,
/// `flags`, `size`); known files do not give them consistent meanings.
#[derive(Debug, Clone)]
pub struct TerrainHeader {
    /// Format version stamp
    pub version: u32,
    /// Scale vector; unused
    pub scale: [f32; 3],
    /// Origin scale vector; unused, though it may be the intended source of
    /// the height scale (see the z formula in the vertex decoder)
    pub scale_origin: [f32; 3],
    /// Bounding sphere radius; unused
    pub boundingradius: f32,
    /// Size of one triangle in the x direction
    pub ftrisize_x: f32,
    /// Size of one triangle in the y direction
    pub ftrisize_y: f32,
    /// Number of vertices in the x direction, stored as a float
    pub fnumverts_x: f32,
    /// Number of embedded skins
    pub numskins: u32,
    /// Skin width hint; unused
    pub skinwidth: u32,
    /// Skin height hint; unused
    pub skinheight: u32,
    /// Total number of vertices in the file
    pub numverts: i32,
    /// Triangle count hint; unused
    pub numtris: i32,
    /// Number of animation frames
    pub numframes: i32,
    /// Always 0 in known files
    pub num_stverts: i32,
    /// Flag word; unused
    pub flags: i32,
    /// Size hint; unused
    pub size: f32,
}

impl TerrainHeader {
    /// Parse the header record from the start of the file buffer.
    ///
    /// The caller has already matched the 4-byte magic word; this rereads
    /// the buffer from offset 4 onward.
    pub fn parse(data: &[u8]) -> HmpResult<Self> {
        if data.len() < MIN_VALIDATED_SIZE {
            return Err(HmpError::FileTooSmall(format!(
                "header region is {MIN_VALIDATED_SIZE} bytes, this file has only {}",
                data.len()
            )));
        }

        let mut r = SliceReader::new(data);
        r.skip(4)?; // magic word, already matched
        let version = r.read_u32()?;
        let scale = [r.read_f32()?, r.read_f32()?, r.read_f32()?];
        let scale_origin = [r.read_f32()?, r.read_f32()?, r.read_f32()?];
        let boundingradius = r.read_f32()?;
        let ftrisize_x = r.read_f32()?;
        let ftrisize_y = r.read_f32()?;
        let fnumverts_x = r.read_f32()?;
        let numskins = r.read_u32()?;
        let skinwidth = r.read_u32()?;
        let skinheight = r.read_u32()?;
        let numverts = r.read_i32()?;
        let numtris = r.read_i32()?;
        let numframes = r.read_i32()?;
        let num_stverts = r.read_i32()?;
        let flags = r.read_i32()?;
        let size = r.read_f32()?;
        debug_assert_eq!(r.position(), HEADER_SIZE);

        Ok(Self {
            version,
            scale,
            scale_origin,
            boundingradius,
            ftrisize_x,
            ftrisize_y,
            fnumverts_x,
            numskins,
            skinwidth,
            skinheight,
            numverts,
            numtris,
            numframes,
            num_stverts,
            flags,
            size,
        })
    }

    /// Run the numeric sanity checks shared by all decodable revisions.
    ///
    /// Each violated condition is a distinct fatal error; no field is ever
    /// defaulted or coerced.
    pub fn validate(&self) -> HmpResult<()> {
        if !self.ftrisize_x.is_finite() || !self.ftrisize_y.is_finite() {
            return Err(HmpError::InvalidHeader(
                "size of triangles in either x or y direction is not finite".to_string(),
            ));
        }
        if self.ftrisize_x == 0.0 || self.ftrisize_y == 0.0 {
            return Err(HmpError::InvalidHeader(
                "size of triangles in either x or y direction is zero".to_string(),
            ));
        }
        if !self.fnumverts_x.is_finite() {
            return Err(HmpError::InvalidHeader(
                "number of vertices in x direction is not finite".to_string(),
            ));
        }
        // Loose on purpose: real files do not guarantee that width * height
        // equals numverts exactly, only that both grid dimensions are >= 1.
        if self.fnumverts_x < 1.0 || (self.numverts as f32 / self.fnumverts_x) < 1.0 {
            return Err(HmpError::InvalidHeader(
                "number of vertices in either x or y direction is zero".to_string(),
            ));
        }
        if self.numframes < 1 {
            return Err(HmpError::InvalidHeader(
                "there are no frames, at least one should be there".to_string(),
            ));
        }
        Ok(())
    }

    /// Grid width derived from the header, by truncation
    pub fn width(&self) -> usize {
        self.fnumverts_x as usize
    }

    /// Grid height derived from the header, by truncating float division
    pub fn height(&self) -> usize {
        (self.numverts as f32 / self.fnumverts_x) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_header(ftrisize_x: f32, ftrisize_y: f32, fnumverts_x: f32) -> Vec<u8> {
        let mut buf = vec![0u8; MIN_VALIDATED_SIZE];
        buf[0..4].copy_from_slice(b"HMP5");
        buf[36..40].copy_from_slice(&ftrisize_x.to_le_bytes());
        buf[40..44].copy_from_slice(&ftrisize_y.to_le_bytes());
        buf[44..48].copy_from_slice(&fnumverts_x.to_le_bytes());
        buf[60..64].copy_from_slice(&6i32.to_le_bytes()); // numverts
        buf[68..72].copy_from_slice(&1i32.to_le_bytes()); // numframes
        buf
    }

    #[test]
    fn parses_fields_at_fixed_offsets() {
        let buf = raw_header(2.0, 3.0, 3.0);
        let header = TerrainHeader::parse(&buf).unwrap();
        assert_eq!(header.ftrisize_x, 2.0);
        assert_eq!(header.ftrisize_y, 3.0);
        assert_eq!(header.fnumverts_x, 3.0);
        assert_eq!(header.numverts, 6);
        assert_eq!(header.numframes, 1);
        header.validate().unwrap();
        assert_eq!(header.width(), 3);
        assert_eq!(header.height(), 2);
    }

    #[test]
    fn rejects_short_buffer() {
        let buf = vec![0u8; MIN_VALIDATED_SIZE - 1];
        assert!(matches!(
            TerrainHeader::parse(&buf),
            Err(HmpError::FileTooSmall(_))
        ));
    }

    #[test]
    fn rejects_zero_triangle_size() {
        let buf = raw_header(0.0, 3.0, 3.0);
        let header = TerrainHeader::parse(&buf).unwrap();
        match header.validate() {
            Err(HmpError::InvalidHeader(reason)) => assert!(reason.contains("zero")),
            other => panic!("expected InvalidHeader, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_triangle_size() {
        let buf = raw_header(f32::NAN, 3.0, 3.0);
        let header = TerrainHeader::parse(&buf).unwrap();
        match header.validate() {
            Err(HmpError::InvalidHeader(reason)) => assert!(reason.contains("not finite")),
            other => panic!("expected InvalidHeader, got {other:?}"),
        }
    }

    #[test]
    fn rejects_degenerate_grid() {
        // fnumverts_x below 1 means a zero-width grid
        let buf = raw_header(2.0, 2.0, 0.5);
        let header = TerrainHeader::parse(&buf).unwrap();
        assert!(matches!(
            header.validate(),
            Err(HmpError::InvalidHeader(_))
        ));

        // numverts / fnumverts_x below 1 means a zero-height grid
        let buf = raw_header(2.0, 2.0, 32.0);
        let header = TerrainHeader::parse(&buf).unwrap();
        assert!(matches!(
            header.validate(),
            Err(HmpError::InvalidHeader(_))
        ));
    }

    #[test]
    fn rejects_zero_frames() {
        let mut buf = raw_header(2.0, 2.0, 3.0);
        buf[68..72].copy_from_slice(&0i32.to_le_bytes());
        let header = TerrainHeader::parse(&buf).unwrap();
        match header.validate() {
            Err(HmpError::InvalidHeader(reason)) => assert!(reason.contains("frames")),
            other => panic!("expected InvalidHeader, got {other:?}"),
        }
    }

    #[test]
    fn grid_factorization_stays_loose() {
        // 7 vertices over a width of 3.5 floors to a 3x2 grid; the header
        // check accepts it even though 3 * 2 != 7.
        let mut buf = raw_header(2.0, 2.0, 3.5);
        buf[60..64].copy_from_slice(&7i32.to_le_bytes());
        let header = TerrainHeader::parse(&buf).unwrap();
        header.validate().unwrap();
        assert_eq!(header.width(), 3);
        assert_eq!(header.height(), 2);
    }
}
