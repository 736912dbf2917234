use super::{required_len, FontError, FontResult, CHARSET};
use crate::types::*;
use alloc::vec::Vec;

/// Assembles a BTF binary pixel by pixel.
pub struct BtfBuilder {
    size: u32,
    size8: usize,
    binary: Vec<u8>,
}

impl BtfBuilder {
    pub fn new(size: u32) -> FontResult<Self> {
        if size == 0 {
            return Err(FontError::InvalidFormat(
                "declared size must be greater than zero",
            ));
        }

        let too_large = FontError::InvalidFormat("declared size is too large to address");
        let len = required_len(size).ok_or(too_large.clone())?;
        let mut binary = Vec::new();
        binary.try_reserve_exact(len).map_err(|_| too_large)?;
        binary.resize(len, 0);

        Ok(Self {
            size,
            size8: size as usize / 8,
            binary,
        })
    }

    /// Addressable area of a single glyph.
    #[inline]
    pub const fn cell_dimensions(&self) -> Dimension {
        Dimension::new(self.size8 as u32 * 8, self.size)
    }

    pub fn set_pixel(&mut self, character: char, position: Position) -> FontResult<()> {
        let index = CHARSET
            .find(character)
            .ok_or(FontError::UnsupportedCharacter(character))?;

        if !self.cell_dimensions().contains(position) {
            return Err(FontError::PixelOutOfRange {
                character,
                position,
            });
        }

        let (x, y) = (position.x as usize, position.y as usize);
        let offset = self.size as usize * self.size8 * index + y * self.size8 + x / 8;
        if let Some(byte) = self.binary.get_mut(offset) {
            *byte |= 0x80 >> (x % 8);
        }

        Ok(())
    }

    pub fn finish(self) -> Vec<u8> {
        self.binary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::font::{BitmapFontFace, FontFace};

    #[test]
    fn zero_size_is_invalid() {
        assert!(matches!(
            BtfBuilder::new(0),
            Err(FontError::InvalidFormat(_))
        ));
    }

    #[test]
    fn cell_is_truncated_to_whole_bytes() {
        let builder = BtfBuilder::new(12).unwrap();
        assert_eq!(builder.cell_dimensions(), Dimension::new(8, 12));
        assert_eq!(builder.finish().len(), 12 * 94);
    }

    #[test]
    fn rejects_pixels_outside_the_cell() {
        let mut builder = BtfBuilder::new(16).unwrap();
        for position in [Position::new(16, 0), Position::new(0, 16), Position::new(-1, 3)] {
            assert_eq!(
                builder.set_pixel('a', position),
                Err(FontError::PixelOutOfRange {
                    character: 'a',
                    position
                })
            );
        }
    }

    #[test]
    fn rejects_characters_without_a_block() {
        let mut builder = BtfBuilder::new(8).unwrap();
        assert_eq!(
            builder.set_pixel(' ', Position::zero()),
            Err(FontError::UnsupportedCharacter(' '))
        );
        assert_eq!(
            builder.set_pixel('ß', Position::zero()),
            Err(FontError::UnsupportedCharacter('ß'))
        );
    }

    #[test]
    fn packs_msb_first() {
        let mut builder = BtfBuilder::new(8).unwrap();
        builder.set_pixel('!', Position::new(0, 0)).unwrap();
        builder.set_pixel('!', Position::new(7, 0)).unwrap();
        builder.set_pixel('"', Position::new(1, 2)).unwrap();

        let binary = builder.finish();
        assert_eq!(binary[0], 0x81);
        assert_eq!(binary[8 + 2], 0x40);
        assert_eq!(binary.iter().filter(|byte| **byte != 0).count(), 2);
    }

    #[test]
    fn decodes_back_to_the_pixels_that_were_set() {
        // a 'T'
        let mut builder = BtfBuilder::new(16).unwrap();
        let mut expected = Vec::new();
        for x in 1..12 {
            expected.push(Position::new(x, 1));
        }
        for y in 2..14 {
            expected.push(Position::new(6, y));
        }
        for position in &expected {
            builder.set_pixel('T', *position).unwrap();
        }

        let face = BitmapFontFace::new(builder.finish(), 16).unwrap();
        let glyph = face.glyph('T').unwrap();

        let mut points = glyph.points().copied().collect::<Vec<_>>();
        points.sort();
        expected.sort();
        assert_eq!(points, expected);
        assert_eq!(glyph.width(), 12);
    }
}
