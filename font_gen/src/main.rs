use anyhow::Context;
use btfont_gfx::text::CHARSET;
use btfont_gfx::{BtfBuilder, Position};
use clap::Parser;
use log::LevelFilter;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Packs per-character glyph images into a btf font
#[derive(Parser, Debug)]
struct Args {
    /// directory holding one image per character, named by its code (`00041.png` for 'A')
    glyphs: PathBuf,

    /// declared line height in pixels
    #[arg(short, long)]
    size: u32,

    #[arg(short, long, default_value = "out.btf")]
    out: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

struct CollectedChar {
    character: char,
    pixels: Vec<Position>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    simple_logger::SimpleLogger::new()
        .with_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init()?;

    let mut builder = BtfBuilder::new(args.size)?;
    let cell = builder.cell_dimensions();

    let characters = CHARSET
        .par_chars()
        .map(|c| collect_char(&args.glyphs, c, cell.width, cell.height))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut missing = 0;
    for collected in characters {
        let Some(collected) = collected else {
            missing += 1;
            continue;
        };
        for position in collected.pixels {
            builder.set_pixel(collected.character, position)?;
        }
    }

    std::fs::write(&args.out, builder.finish())
        .with_context(|| format!("writing {}", args.out.display()))?;
    log::info!(
        "wrote {} ({} of {} glyphs missing)",
        args.out.display(),
        missing,
        CHARSET.len()
    );

    Ok(())
}

fn glyph_path(dir: &Path, c: char) -> PathBuf {
    dir.join(format!("{:05x}.png", c as u32))
}

/// Lit pixels of `c`'s image, cropped to the glyph cell. `None` if there is no image.
fn collect_char(
    dir: &Path,
    c: char,
    max_width: u32,
    max_height: u32,
) -> anyhow::Result<Option<CollectedChar>> {
    let path = glyph_path(dir, c);
    if !path.exists() {
        log::debug!("no image for {:?}, leaving it blank", c);
        return Ok(None);
    }

    let image = image::open(&path)
        .with_context(|| format!("loading {}", path.display()))?
        .to_luma8();

    if image.width() > max_width || image.height() > max_height {
        log::warn!(
            "{} is {}x{}, cropping to {}x{}",
            path.display(),
            image.width(),
            image.height(),
            max_width,
            max_height
        );
    }

    let pixels = image
        .enumerate_pixels()
        .filter(|(x, y, luma)| *x < max_width && *y < max_height && luma.0[0] > 0)
        .map(|(x, y, _)| Position::new(x as i64, y as i64))
        .collect();

    Ok(Some(CollectedChar {
        character: c,
        pixels,
    }))
}
