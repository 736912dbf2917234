use crate::types::Position;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontError {
    /// The font resource can never be decoded, e.g. a declared size of zero.
    #[error("invalid font format: {0}")]
    InvalidFormat(&'static str),

    /// The binary is shorter than the declared size requires.
    #[error("corrupt font data: expected at least {expected} bytes, found {actual}")]
    CorruptFontData { expected: usize, actual: usize },

    #[error("character {0:?} is not supported by this face")]
    UnsupportedCharacter(char),

    #[error(
        "pixel ({}, {}) of {character:?} lies outside the glyph cell",
        .position.x,
        .position.y
    )]
    PixelOutOfRange { character: char, position: Position },
}

pub type FontResult<T> = Result<T, FontError>;
