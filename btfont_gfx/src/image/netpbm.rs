use crate::{Framebuffer, Position};
use alloc::format;
use alloc::vec::Vec;

use super::ImageEncoder;

pub struct PPMEncoder;

impl ImageEncoder for PPMEncoder {
    fn encode_image(&self, fb: &Framebuffer) -> Vec<u8> {
        let dimensions = fb.actual_dimensions();
        let mut data =
            format!("P6\n{} {}\n255\n", dimensions.width, dimensions.height).into_bytes();
        data.extend_from_slice(fb.buffer());
        data
    }
}

pub struct PBMEncoder;

impl ImageEncoder for PBMEncoder {
    fn encode_image(&self, fb: &Framebuffer) -> Vec<u8> {
        let dimensions = fb.actual_dimensions();
        let mut data = format!("P4\n{} {}\n", dimensions.width, dimensions.height).into_bytes();

        // rows are padded to a whole byte
        let bytes_per_row = (dimensions.width as usize).div_ceil(8);
        let scale = fb.scale() as i64;

        for y in 0..dimensions.height as i64 {
            let mut row = alloc::vec![0u8; bytes_per_row];
            for x in 0..dimensions.width as i64 {
                let scaled = Position::new(x / scale, y / scale);
                if !fb.get_pixel(&scaled).is_black() {
                    row[x as usize / 8] |= 0x80 >> (x % 8);
                }
            }
            data.extend_from_slice(&row);
        }

        data
    }
}
