use super::{FontError, FontFace, FontResult, Glyph, PointSet};
use crate::types::*;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Characters stored in a BTF binary, in block order. Space has no block.
pub const CHARSET: &str =
    "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// First character code covered by a face.
pub const FIRST_CHAR: u8 = 0x20;
/// Number of glyphs in a face, covering `FIRST_CHAR..FIRST_CHAR + GLYPH_COUNT`.
pub const GLYPH_COUNT: usize = 96;

// the format stores no metadata
pub const FAMILY_NAME: &str = "BTF";
pub const STYLE_NAME: &str = "Regular";

/// Minimum binary length for a face of the given size, `None` if it is not addressable.
pub const fn required_len(size: u32) -> Option<usize> {
    let size8 = size as usize / 8;
    match (size as usize).checked_mul(size8) {
        Some(bytes_per_glyph) => bytes_per_glyph.checked_mul(CHARSET.len()),
        None => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceConfig {
    pub size: u32,
    #[serde(default)]
    pub spacing_modifier: i32,
}

impl FaceConfig {
    pub const fn new(size: u32) -> FaceConfig {
        FaceConfig {
            size,
            spacing_modifier: 0,
        }
    }

    pub const fn spacing_modifier(mut self, spacing_modifier: i32) -> FaceConfig {
        self.spacing_modifier = spacing_modifier;
        self
    }
}

/// A BTF font resource decoded at its declared pixel size.
///
/// Every glyph is decoded up front, so a constructed face is immutable and can be shared
/// between readers freely.
pub struct BitmapFontFace {
    binary: Vec<u8>,
    size: u32,
    size8: usize,
    spacing_modifier: i32,
    glyphs: [Glyph; GLYPH_COUNT],
}

impl BitmapFontFace {
    pub fn new(binary: Vec<u8>, size: u32) -> FontResult<Self> {
        Self::with_config(binary, FaceConfig::new(size))
    }

    pub fn with_config(binary: Vec<u8>, config: FaceConfig) -> FontResult<Self> {
        let FaceConfig {
            size,
            spacing_modifier,
        } = config;

        if size == 0 {
            return Err(FontError::InvalidFormat(
                "declared size must be greater than zero",
            ));
        }

        let Some(expected) = required_len(size) else {
            return Err(FontError::InvalidFormat("declared size is too large to address"));
        };
        if binary.len() < expected {
            return Err(FontError::CorruptFontData {
                expected,
                actual: binary.len(),
            });
        }

        let size8 = size as usize / 8;
        let glyphs = core::array::from_fn(|slot| {
            let character = char::from(FIRST_CHAR + slot as u8);
            decode_glyph(&binary, size, size8, character)
        });

        let face = Self {
            binary,
            size,
            size8,
            spacing_modifier,
            glyphs,
        };

        log::debug!(
            "decoded btf face: size {}, stride {}, {} of {} glyphs lit",
            face.size,
            face.size8,
            face.glyphs.iter().filter(|glyph| !glyph.is_blank()).count(),
            GLYPH_COUNT
        );

        Ok(face)
    }

    /// Bytes per bitmap row.
    #[inline]
    pub const fn size8(&self) -> usize {
        self.size8
    }

    #[inline]
    pub fn binary(&self) -> &[u8] {
        &self.binary
    }

    /// Every glyph of the face together with the character it belongs to.
    pub fn glyphs(&self) -> impl Iterator<Item = (char, &Glyph)> {
        self.glyphs
            .iter()
            .enumerate()
            .map(|(slot, glyph)| (char::from(FIRST_CHAR + slot as u8), glyph))
    }
}

impl FontFace for BitmapFontFace {
    fn glyph(&self, character: char) -> Option<&Glyph> {
        let slot = (character as u32).checked_sub(FIRST_CHAR as u32)? as usize;
        self.glyphs.get(slot)
    }

    #[inline]
    fn height(&self) -> u32 {
        self.size
    }

    #[inline]
    fn spacing_modifier(&self) -> i32 {
        self.spacing_modifier
    }

    fn family_name(&self) -> &str {
        FAMILY_NAME
    }

    fn style_name(&self) -> &str {
        STYLE_NAME
    }
}

impl core::fmt::Debug for BitmapFontFace {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BitmapFontFace")
            .field("size", &self.size)
            .field("size8", &self.size8)
            .field("spacing_modifier", &self.spacing_modifier)
            .field("binary_len", &self.binary.len())
            .finish()
    }
}

fn decode_glyph(binary: &[u8], size: u32, size8: usize, character: char) -> Glyph {
    let Some(index) = CHARSET.find(character) else {
        return Glyph::blank(size / 2, size);
    };

    let block = (size as usize)
        .checked_mul(size8)
        .and_then(|bytes_per_glyph| {
            let glyph_offset = bytes_per_glyph.checked_mul(index)?;
            binary.get(glyph_offset..glyph_offset.checked_add(bytes_per_glyph)?)
        })
        .unwrap_or_default();

    let mut points = PointSet::default();
    let mut width = 0;

    for (i, byte) in block.iter().enumerate() {
        let y = i / size8;
        let x = i % size8;

        // msb is the leftmost pixel
        for ww in 0..8 {
            if byte & (0x80 >> ww) != 0 {
                let column = x * 8 + ww;
                points.insert(Position::new(column as i64, y as i64));
                width = width.max(column as u32 + 1);
            }
        }
    }

    log::trace!(
        "glyph {:?}: width {}, {} lit pixels",
        character,
        width,
        points.len()
    );

    Glyph::new(width, size, points)
}
