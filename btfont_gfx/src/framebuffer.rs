use crate::text::{FontFace, Glyph};
use crate::types::*;
use alloc::vec::Vec;

const BYTES_PER_PIXEL: usize = 3;

/// An owned RGB framebuffer. Drawing happens in scaled coordinates, every scaled pixel covers
/// `scale * scale` actual pixels.
pub struct Framebuffer {
    buffer: Vec<u8>,

    actual_dimensions: Dimension,
    scaled_dimensions: Dimension,

    scale: u32,
    stride: usize,
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("actual_dimensions", &self.actual_dimensions)
            .field("scaled_dimensions", &self.scaled_dimensions)
            .field("scale", &self.scale)
            .field("stride", &self.stride)
            .finish()
    }
}

impl Framebuffer {
    /// `None` if the scaled framebuffer does not fit in memory.
    pub fn new(dimensions: Dimension, scale: u32) -> Option<Self> {
        let scale = scale.max(1);
        let actual_dimensions = dimensions.checked_mul(scale)?;
        let stride = actual_dimensions.width as usize;

        let len = stride
            .checked_mul(actual_dimensions.height as usize)?
            .checked_mul(BYTES_PER_PIXEL)?;
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(len).ok()?;
        buffer.resize(len, 0);

        Some(Self {
            buffer,
            actual_dimensions,
            scaled_dimensions: dimensions,
            scale,
            stride,
        })
    }

    #[inline(always)]
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    #[inline(always)]
    pub fn actual_dimensions(&self) -> Dimension {
        self.actual_dimensions
    }

    #[inline(always)]
    pub fn scaled_dimensions(&self) -> Dimension {
        self.scaled_dimensions
    }

    #[inline(always)]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    pub fn draw_pixel(&mut self, position: &Position, color: &Color) {
        if !self.scaled_dimensions.contains(*position) {
            return;
        }

        let scale = self.scale as usize;
        let scaled_x = position.x as usize * scale;
        let scaled_y = position.y as usize * scale;

        for ys in 0..scale {
            for xs in 0..scale {
                let offset = ((scaled_y + ys) * self.stride + scaled_x + xs) * BYTES_PER_PIXEL;
                self.draw_pixel_raw(offset, color);
            }
        }
    }

    /// Color of the scaled pixel at `position`, black outside the framebuffer.
    pub fn get_pixel(&self, position: &Position) -> Color {
        if !self.scaled_dimensions.contains(*position) {
            return Color::BLACK;
        }

        let scale = self.scale as usize;
        let offset = (position.y as usize * scale * self.stride + position.x as usize * scale)
            * BYTES_PER_PIXEL;
        match self.buffer.get(offset..offset + BYTES_PER_PIXEL) {
            Some(&[r, g, b]) => Color::new(r, g, b),
            _ => Color::BLACK,
        }
    }

    pub fn draw_glyph(&mut self, glyph: &Glyph, position: &Position, color: &Color) {
        let origin = *position + glyph.origin();
        for point in glyph.points() {
            self.draw_pixel(&(origin + *point), color);
        }
    }

    /// Draws `text` left to right starting at `position` and returns the horizontal advance.
    ///
    /// Characters the face has no glyph for are skipped.
    pub fn draw_str<F: FontFace + ?Sized>(
        &mut self,
        face: &F,
        text: &str,
        position: &Position,
        color: &Color,
    ) -> i64 {
        let mut pen = *position;

        for character in text.chars() {
            let Some(glyph) = face.glyph(character) else {
                log::warn!(
                    "skipping {:?}, not supported by {} {}",
                    character,
                    face.family_name(),
                    face.style_name()
                );
                continue;
            };

            self.draw_glyph(glyph, &pen, color);
            pen.x += face.advance(glyph);
        }

        pen.x - position.x
    }

    #[inline(always)]
    fn draw_pixel_raw(&mut self, byte_offset: usize, color: &Color) {
        if let Some(pixel_bytes) = self
            .buffer
            .get_mut(byte_offset..byte_offset + BYTES_PER_PIXEL)
        {
            pixel_bytes[0] = color.r;
            pixel_bytes[1] = color.g;
            pixel_bytes[2] = color.b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{BitmapFontFace, BtfBuilder, FaceConfig};

    const RED: Color = Color::new(255, 0, 0);

    fn face_with(spacing_modifier: i32, pixels: &[(char, Position)]) -> BitmapFontFace {
        let mut builder = BtfBuilder::new(8).unwrap();
        for (character, position) in pixels {
            builder.set_pixel(*character, *position).unwrap();
        }
        let config = FaceConfig::new(8).spacing_modifier(spacing_modifier);
        BitmapFontFace::with_config(builder.finish(), config).unwrap()
    }

    #[test]
    fn draw_pixel_fills_scaled_block() {
        let mut fb = Framebuffer::new(Dimension::new(4, 4), 2).unwrap();
        assert_eq!(fb.actual_dimensions(), Dimension::new(8, 8));
        fb.draw_pixel(&Position::new(1, 2), &RED);

        let lit = fb
            .buffer()
            .chunks(BYTES_PER_PIXEL)
            .enumerate()
            .filter(|(_, pixel)| pixel[0] == 255)
            .map(|(i, _)| (i % 8, i / 8))
            .collect::<Vec<_>>();
        assert_eq!(lit, [(2, 4), (3, 4), (2, 5), (3, 5)]);
        assert_eq!(fb.get_pixel(&Position::new(1, 2)), RED);
        assert_eq!(fb.get_pixel(&Position::new(2, 2)), Color::BLACK);
    }

    #[test]
    fn oversized_scale_is_rejected() {
        assert!(Framebuffer::new(Dimension::new(8, 16), 1 << 30).is_none());
        assert!(Framebuffer::new(Dimension::new(u32::MAX, 1), 2).is_none());
    }

    #[test]
    fn zero_scale_draws_unscaled() {
        let fb = Framebuffer::new(Dimension::new(3, 2), 0).unwrap();
        assert_eq!(fb.scale(), 1);
        assert_eq!(fb.buffer().len(), 3 * 2 * BYTES_PER_PIXEL);
    }

    #[test]
    fn pixels_outside_are_clipped() {
        let mut fb = Framebuffer::new(Dimension::new(2, 2), 1).unwrap();
        fb.draw_pixel(&Position::new(2, 0), &RED);
        fb.draw_pixel(&Position::new(0, -1), &RED);
        assert!(fb.buffer().iter().all(|byte| *byte == 0));
        assert_eq!(fb.get_pixel(&Position::new(5, 5)), Color::BLACK);
    }

    #[test]
    fn draw_glyph_is_relative_to_position() {
        let face = face_with(0, &[('!', Position::new(0, 0)), ('!', Position::new(3, 7))]);
        let mut fb = Framebuffer::new(Dimension::new(10, 10), 1).unwrap();
        fb.draw_glyph(face.glyph('!').unwrap(), &Position::new(2, 1), &Color::WHITE);

        assert_eq!(fb.get_pixel(&Position::new(2, 1)), Color::WHITE);
        assert_eq!(fb.get_pixel(&Position::new(5, 8)), Color::WHITE);
        assert_eq!(fb.get_pixel(&Position::new(0, 0)), Color::BLACK);
    }

    #[test]
    fn draw_str_advances_like_measure() {
        let face = face_with(1, &[('A', Position::new(2, 0)), ('B', Position::new(0, 0))]);
        let mut fb = Framebuffer::new(Dimension::new(32, 8), 1).unwrap();

        let advance = fb.draw_str(&face, "AB", &Position::zero(), &Color::WHITE);
        assert_eq!(advance, face.measure_str("AB").unwrap());
        assert_eq!(advance, (3 + 2 + 1) + (1 + 2 + 1));

        assert_eq!(fb.get_pixel(&Position::new(2, 0)), Color::WHITE);
        // 'B' starts after 'A' advanced by 6
        assert_eq!(fb.get_pixel(&Position::new(6, 0)), Color::WHITE);
    }

    #[test]
    fn draw_str_skips_unsupported_characters() {
        let face = face_with(0, &[('A', Position::new(0, 0))]);
        let mut fb = Framebuffer::new(Dimension::new(16, 8), 1).unwrap();

        let advance = fb.draw_str(&face, "\u{e9}A", &Position::zero(), &Color::WHITE);
        assert_eq!(advance, 3);
        assert_eq!(fb.get_pixel(&Position::zero()), Color::WHITE);

        fb.clear();
        assert_eq!(fb.get_pixel(&Position::zero()), Color::BLACK);
    }
}
