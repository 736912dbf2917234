use crate::Framebuffer;
use alloc::vec::Vec;

mod netpbm;

trait ImageEncoder {
    fn encode_image(&self, fb: &Framebuffer) -> Vec<u8>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Ppm, // binary rgb, 3 bytes per pixel
    Pbm, // binary bitmap, 1 bit per pixel (1 = lit)
}

impl ImageFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        if extension.eq_ignore_ascii_case("ppm") {
            Some(ImageFormat::Ppm)
        } else if extension.eq_ignore_ascii_case("pbm") {
            Some(ImageFormat::Pbm)
        } else {
            None
        }
    }

    #[inline]
    pub fn encode(self, fb: &Framebuffer) -> Vec<u8> {
        match self {
            ImageFormat::Ppm => netpbm::PPMEncoder.encode_image(fb),
            ImageFormat::Pbm => netpbm::PBMEncoder.encode_image(fb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions() {
        assert_eq!(ImageFormat::from_extension("ppm"), Some(ImageFormat::Ppm));
        assert_eq!(ImageFormat::from_extension("PBM"), Some(ImageFormat::Pbm));
        assert_eq!(ImageFormat::from_extension("png"), None);
    }
}
