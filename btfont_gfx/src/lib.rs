#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod types;
pub use types::*;

pub mod image;
pub mod text;
pub use text::{BitmapFontFace, BtfBuilder, FaceConfig, FontError, FontFace, FontResult, Glyph};

pub mod framebuffer;
pub use framebuffer::Framebuffer;
