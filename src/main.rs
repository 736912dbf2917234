use anyhow::{bail, Context};
use btfont_gfx::image::ImageFormat;
use btfont_gfx::{BitmapFontFace, Color, Dimension, FaceConfig, FontFace, Framebuffer, Position};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// raw btf font resource
    font: PathBuf,

    /// declared line height in pixels
    #[arg(short, long, default_value_t = 16)]
    size: u32,

    /// extra advance added after every character
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    spacing: i32,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print face metrics and every glyph's width
    Info,
    /// Print the horizontal advance of a string
    Measure { text: String },
    /// Render a string to the terminal, or to a .ppm/.pbm image
    Render {
        text: String,

        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(long, default_value_t = 1)]
        scale: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    simple_logger::SimpleLogger::new()
        .with_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init()?;

    let binary =
        fs::read(&args.font).with_context(|| format!("reading {}", args.font.display()))?;
    let config = FaceConfig::new(args.size).spacing_modifier(args.spacing);
    let face = BitmapFontFace::with_config(binary, config)
        .with_context(|| format!("loading {}", args.font.display()))?;

    match args.command {
        Command::Info => info(&face),
        Command::Measure { text } => println!("{}", face.measure_str(&text)?),
        Command::Render { text, out, scale } => render(&face, &text, out, scale)?,
    }

    Ok(())
}

fn info(face: &BitmapFontFace) {
    println!("family:  {}", face.family_name());
    println!("style:   {}", face.style_name());
    println!("height:  {}", face.height());
    println!("stride:  {} bytes", face.size8());
    println!("spacing: {}", face.spacing_modifier());
    println!();

    for (character, glyph) in face.glyphs() {
        println!(
            "{:#04x} {:?}\twidth {:>3}\t{} px",
            character as u32,
            character,
            glyph.width(),
            glyph.point_count()
        );
    }
}

fn render(
    face: &BitmapFontFace,
    text: &str,
    out: Option<PathBuf>,
    scale: u32,
) -> anyhow::Result<()> {
    let width = face.measure_str(text)?.max(1);
    let width = u32::try_from(width).context("text too wide to render")?;

    let Some(mut fb) = Framebuffer::new(Dimension::new(width, face.height()), scale) else {
        bail!(
            "{}x{} px at scale {} is too large to render",
            width,
            face.height(),
            scale
        );
    };
    fb.draw_str(face, text, &Position::zero(), &Color::WHITE);

    let Some(out) = out else {
        let dimensions = fb.scaled_dimensions();
        for y in 0..dimensions.height as i64 {
            let line = (0..dimensions.width as i64)
                .map(|x| {
                    if fb.get_pixel(&Position::new(x, y)).is_black() {
                        '.'
                    } else {
                        '#'
                    }
                })
                .collect::<String>();
            println!("{line}");
        }
        return Ok(());
    };

    let Some(format) = out
        .extension()
        .and_then(|extension| extension.to_str())
        .and_then(ImageFormat::from_extension)
    else {
        bail!("{} is neither a .ppm nor a .pbm file", out.display());
    };

    fs::write(&out, format.encode(&fb)).with_context(|| format!("writing {}", out.display()))?;
    log::debug!("wrote {:?} image to {}", format, out.display());

    Ok(())
}
