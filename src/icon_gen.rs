use crate::font;
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops, ColorType, DynamicImage, GrayImage, ImageEncoder, Luma, Pixel, Rgb, RgbImage, Rgba,
    RgbaImage,
};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::Path,
};

/// The two sizes a PWA manifest expects.
const ICON_SIZES: [u32; 2] = [192, 512];

/// Label drawn in the middle of the icon.
const LABEL: &str = "LiS";

// Theme palette - purple gradient matching #A96BFF.
const CENTER_COLOR: Rgb<u8> = Rgb([200, 150, 255]);
const EDGE_COLOR: Rgb<u8> = Rgb([120, 60, 200]);
const SHADOW_COLOR: Rgba<u8> = Rgba([50, 20, 80, 200]);
const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const HIGHLIGHT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 15]);

/// Generate both launcher icons into `out_dir`, overwriting existing files.
pub fn generate_icons(out_dir: &Path) -> Result<()> {
    println!("🎨 Generating LiFE-iN-SYNC PWA icons...\n");

    create_dir_all(out_dir).context("Can't create output directory")?;

    for size in ICON_SIZES {
        let output_path = out_dir.join(format!("icon-{size}x{size}.png"));
        create_icon(size, &output_path)?;
    }

    println!("\n✓ Icon generation complete!");
    Ok(())
}

/// Run the full pipeline for one icon size and write the PNG.
/// Returns the encoded file size in bytes.
pub fn create_icon(size: u32, output_path: &Path) -> Result<u64> {
    let background = create_radial_gradient(size, CENTER_COLOR, EDGE_COLOR);

    let font = font::load_font();
    let text_layer = render_text_layer(size, &font);

    let mut img = DynamicImage::ImageRgb8(background).to_rgba8();

    let glow_amount = (size / 40).max(10);
    apply_glow(&mut img, &text_layer, glow_amount);

    // Sharp text goes on top of the accumulated halo.
    imageops::overlay(&mut img, &text_layer, 0, 0);

    draw_highlight(&mut img);

    let mask = rounded_mask(size);
    let rounded = apply_alpha_mask(&img, &mask);

    let bytes = save_png(&rounded, output_path)?;
    println!(
        "✓ Created {} ({size}x{size}px, {:.1}KB)",
        output_path.display(),
        bytes as f64 / 1024.0
    );

    Ok(bytes)
}

/// Radial gradient: `center_color` at the middle, `edge_color` reached at the
/// corners. The ratio is the distance from the center normalized by the
/// diagonal half-length and clamped to [0, 1].
fn create_radial_gradient(size: u32, center_color: Rgb<u8>, edge_color: Rgb<u8>) -> RgbImage {
    let center = (size / 2) as f32;
    let max_radius = std::f32::consts::SQRT_2 * center;

    RgbImage::from_fn(size, size, |x, y| {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        let ratio = ((dx * dx + dy * dy).sqrt() / max_radius).min(1.0);

        Rgb([
            lerp_channel(center_color[0], edge_color[0], ratio),
            lerp_channel(center_color[1], edge_color[1], ratio),
            lerp_channel(center_color[2], edge_color[2], ratio),
        ])
    })
}

fn lerp_channel(from: u8, to: u8, ratio: f32) -> u8 {
    (from as f32 * (1.0 - ratio) + to as f32 * ratio) as u8
}

/// Transparent layer with the drop shadow and the sharp white label,
/// both centered on the canvas.
fn render_text_layer(size: u32, font: &Font) -> RgbaImage {
    let mut layer = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));

    // Font at 50% of the icon size.
    let scale = Scale::uniform(size as f32 * 0.5);
    let (glyphs, dx, dy) = centered_glyphs(font, scale, LABEL, size);

    let shadow_offset = (size as i32 / 80).max(3);
    draw_glyphs(
        &mut layer,
        &glyphs,
        dx + shadow_offset,
        dy + shadow_offset,
        SHADOW_COLOR,
    );
    draw_glyphs(&mut layer, &glyphs, dx, dy, TEXT_COLOR);

    layer
}

/// Lay out `text` at the baseline and compute the (dx, dy) translation that
/// centers its inked bounding box on a `size`x`size` canvas, correcting for
/// the box's own origin.
fn centered_glyphs<'f>(
    font: &Font<'f>,
    scale: Scale,
    text: &str,
    size: u32,
) -> (Vec<PositionedGlyph<'f>>, i32, i32) {
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<_> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();

    let Some((min_x, min_y, max_x, max_y)) = inked_bbox(&glyphs) else {
        return (glyphs, 0, 0);
    };

    let width = max_x - min_x;
    let height = max_y - min_y;
    let dx = (size as i32 - width) / 2 - min_x;
    let dy = (size as i32 - height) / 2 - min_y;

    (glyphs, dx, dy)
}

/// Union of the glyphs' pixel bounding boxes as (min_x, min_y, max_x, max_y).
fn inked_bbox(glyphs: &[PositionedGlyph]) -> Option<(i32, i32, i32, i32)> {
    let mut bbox: Option<(i32, i32, i32, i32)> = None;
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            bbox = Some(match bbox {
                None => (bb.min.x, bb.min.y, bb.max.x, bb.max.y),
                Some((x0, y0, x1, y1)) => (
                    x0.min(bb.min.x),
                    y0.min(bb.min.y),
                    x1.max(bb.max.x),
                    y1.max(bb.max.y),
                ),
            });
        }
    }
    bbox
}

/// Rasterize the glyphs into `layer`, translated by (dx, dy), blending the
/// coverage-scaled `color` over whatever is already there.
fn draw_glyphs(
    layer: &mut RgbaImage,
    glyphs: &[PositionedGlyph],
    dx: i32,
    dy: i32,
    color: Rgba<u8>,
) {
    let (width, height) = layer.dimensions();

    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let x = bb.min.x + gx as i32 + dx;
                let y = bb.min.y + gy as i32 + dy;
                if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                    return;
                }

                let alpha = (coverage * color[3] as f32) as u8;
                if alpha > 0 {
                    let pixel = layer.get_pixel_mut(x as u32, y as u32);
                    pixel.blend(&Rgba([color[0], color[1], color[2], alpha]));
                }
            });
        }
    }
}

/// Blur radii used to accumulate the halo: amount, amount-4, ... while > 0.
fn glow_schedule(amount: u32) -> impl Iterator<Item = u32> {
    (1..=amount).rev().step_by(4)
}

/// Synthesize a glow by compositing progressively sharper blurred copies of
/// the text layer onto the background.
fn apply_glow(img: &mut RgbaImage, text_layer: &RgbaImage, glow_amount: u32) {
    for radius in glow_schedule(glow_amount) {
        let blurred = imageops::blur(text_layer, radius as f32);
        imageops::overlay(img, &blurred, 0, 0);
    }
}

/// Faint circular highlight inset by 15% on each side.
fn draw_highlight(img: &mut RgbaImage) {
    let size = img.width();
    let margin = (size as f32 * 0.15) as u32;
    let center = size as f32 / 2.0;
    let radius = center - margin as f32;

    for y in margin..size.saturating_sub(margin) {
        for x in margin..size.saturating_sub(margin) {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            if dx * dx + dy * dy <= radius * radius {
                img.get_pixel_mut(x, y).blend(&HIGHLIGHT_COLOR);
            }
        }
    }
}

/// Single-channel mask: a filled rounded rectangle spanning the canvas with
/// a corner radius of 20% of the size, anti-aliased over the last pixel of
/// the corner arcs.
fn rounded_mask(size: u32) -> GrayImage {
    let radius = (size as f32 * 0.2) as u32 as f32;
    let edge = size as f32 - 1.0;

    GrayImage::from_fn(size, size, |x, y| {
        // Distance from the core rectangle; zero along the straight edges.
        let qx = x as f32 - (x as f32).clamp(radius, edge - radius);
        let qy = y as f32 - (y as f32).clamp(radius, edge - radius);
        let dist = (qx * qx + qy * qy).sqrt();

        if dist <= radius - 1.0 {
            Luma([255])
        } else if dist <= radius {
            Luma([(255.0 * (radius - dist)) as u8])
        } else {
            Luma([0])
        }
    })
}

/// Replace the alpha channel of `img` with the mask values. Pixels outside
/// the rounded rectangle become fully transparent.
fn apply_alpha_mask(img: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let Rgba([r, g, b, _]) = *img.get_pixel(x, y);
        Rgba([r, g, b, mask.get_pixel(x, y)[0]])
    })
}

// Encode as PNG with compression enabled, returning the file size in bytes.
fn save_png(img: &RgbaImage, path: &Path) -> Result<u64> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let encoder =
        PngEncoder::new_with_quality(&mut writer, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)
        .context("Failed to write PNG")?;
    writer.flush()?;

    let bytes = std::fs::metadata(path)?.len();
    Ok(bytes)
}
