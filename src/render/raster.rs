// src/render/raster.rs
//! Rasterise a scene into an RGBA image for snapshots.

use image::{Rgba as Pixel, RgbaImage};

use super::color::Rgba;
use super::scene::{dash_segments, DrawCommand, RectF, Scene};

/// Paint every non-text command with source-over blending.
pub fn rasterize(scene: &Scene) -> RgbaImage {
    let width = scene.width().round().max(1.0) as u32;
    let height = scene.height().round().max(1.0) as u32;
    let mut img = RgbaImage::from_pixel(width, height, to_pixel(scene.background()));

    for item in scene.items() {
        match &item.command {
            DrawCommand::FillRect { rect, color } => fill_rect(&mut img, rect, *color),
            DrawCommand::StrokeRect {
                rect,
                color,
                line_width,
                dash,
            } => stroke_rect(&mut img, rect, *color, *line_width, *dash),
            DrawCommand::VLine { x, y0, y1, color } => {
                fill_rect(&mut img, &RectF::new(*x, *y0, 1.0, y1 - y0), *color)
            }
            // no font rasteriser; labels only exist on the terminal canvas
            DrawCommand::Text { .. } => {}
        }
    }
    img
}

fn to_pixel(c: Rgba) -> Pixel<u8> {
    Pixel([c.r, c.g, c.b, c.a])
}

fn blend(img: &mut RgbaImage, x: u32, y: u32, color: Rgba) {
    let px = img.get_pixel_mut(x, y);
    let [r, g, b, a] = px.0;
    *px = to_pixel(color.over(Rgba::rgba(r, g, b, a)));
}

/// Pixel span `[lo, hi)` covered by `start..end`, clipped to `0..limit`.
fn span(start: f64, end: f64, limit: u32) -> (u32, u32) {
    let lo = start.floor().max(0.0).min(limit as f64) as u32;
    let hi = end.ceil().max(0.0).min(limit as f64) as u32;
    (lo, hi)
}

fn fill_rect(img: &mut RgbaImage, rect: &RectF, color: Rgba) {
    if color.a == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }
    let (x0, x1) = span(rect.x, rect.right(), img.width());
    let (y0, y1) = span(rect.y, rect.bottom(), img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            blend(img, x, y, color);
        }
    }
}

fn stroke_rect(
    img: &mut RgbaImage,
    rect: &RectF,
    color: Rgba,
    width: f64,
    dash: Option<[f64; 2]>,
) {
    let horizontal = |start: f64, end: f64| match dash {
        Some(d) => dash_segments(start, end, d),
        None => vec![(start, end)],
    };
    for (a, b) in horizontal(rect.x, rect.right()) {
        fill_rect(img, &RectF::new(a, rect.y, b - a, width), color);
        fill_rect(img, &RectF::new(a, rect.bottom() - width, b - a, width), color);
    }
    for (a, b) in horizontal(rect.y + width, rect.bottom() - width) {
        fill_rect(img, &RectF::new(rect.x, a, width, b - a), color);
        fill_rect(img, &RectF::new(rect.right() - width, a, width, b - a), color);
    }
}
