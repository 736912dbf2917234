use crate::types::*;
use hashbrown::HashSet;
use rustc_hash::FxBuildHasher;

mod btf;
pub use btf::{
    required_len, BitmapFontFace, FaceConfig, CHARSET, FAMILY_NAME, FIRST_CHAR, GLYPH_COUNT,
    STYLE_NAME,
};

mod builder;
pub use builder::BtfBuilder;

mod error;
pub use error::{FontError, FontResult};

/// Fixed horizontal gap between two glyphs, in pixels.
pub const GLYPH_GAP: u32 = 2;

pub type PointSet = HashSet<Position, FxBuildHasher>;

/// Capabilities every font face format provides to a text renderer.
pub trait FontFace {
    /// `None` means the face does not support `character`; the caller picks the fallback.
    fn glyph(&self, character: char) -> Option<&Glyph>;

    /// Line height shared by every glyph of the face.
    fn height(&self) -> u32;

    fn spacing_modifier(&self) -> i32;

    fn family_name(&self) -> &str;

    fn style_name(&self) -> &str;

    /// Horizontal distance from the start of `glyph` to the start of the next one.
    #[inline]
    fn advance(&self, glyph: &Glyph) -> i64 {
        glyph.width() as i64 + GLYPH_GAP as i64 + self.spacing_modifier() as i64
    }

    /// Total horizontal advance needed to render `text` in this face.
    ///
    /// Fails with [`FontError::UnsupportedCharacter`] on the first character without a glyph.
    fn measure_str(&self, text: &str) -> FontResult<i64> {
        text.chars().try_fold(0i64, |width, character| -> FontResult<i64> {
            let glyph = self
                .glyph(character)
                .ok_or(FontError::UnsupportedCharacter(character))?;
            Ok(width + self.advance(glyph))
        })
    }
}

/// A single decoded character: the set of lit pixels relative to its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    origin: Position,
    width: u32,
    height: u32,
    points: PointSet,
}

impl Glyph {
    pub fn new(width: u32, height: u32, points: PointSet) -> Self {
        Self {
            origin: Position::zero(),
            width,
            height,
            points,
        }
    }

    /// A glyph that advances by `width` but paints nothing.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(width, height, PointSet::default())
    }

    #[inline]
    pub const fn origin(&self) -> Position {
        self.origin
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    pub fn points(&self) -> impl Iterator<Item = &Position> {
        self.points.iter()
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_lit(&self, position: Position) -> bool {
        self.points.contains(&position)
    }
}
