// src/render/terminal.rs
//! Paint a scene onto a ratatui braille canvas.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine},
        Block,
    },
    Frame,
};

use super::color::Rgba;
use super::scene::{dash_segments, DrawCommand, RectF, Scene, SceneLayer};

/// Terminals have no alpha channel, so every color is pre-blended over the
/// scene background.
pub fn terminal_color(color: Rgba, background: Rgba) -> Color {
    let c = color.over(background.opaque());
    Color::Rgb(c.r, c.g, c.b)
}

/// Render `scene` inside `block`, scaled to the available cells.
pub fn render_scene(f: &mut Frame<'_>, area: Rect, scene: &Scene, block: Block<'_>) {
    let inner = block.inner(area);
    if inner.width == 0 || inner.height == 0 {
        f.render_widget(block, area);
        return;
    }

    let (w, h) = (scene.width(), scene.height());
    // braille cells hold two dot columns
    let step = (w / (inner.width as f64 * 2.0)).max(f64::EPSILON);
    let background = scene.background();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(terminal_color(background, background))
        .x_bounds([0.0, w])
        .y_bounds([0.0, h])
        .paint(move |ctx| {
            let mut current = SceneLayer::Background;
            for item in scene.items() {
                if item.layer != current {
                    ctx.layer();
                    current = item.layer;
                }
                if item.layer == SceneLayer::Background {
                    continue;
                }
                paint_command(ctx, &item.command, h, step, background);
            }
        });
    f.render_widget(canvas, area);
}

fn paint_command(ctx: &mut Context<'_>, command: &DrawCommand, h: f64, step: f64, bg: Rgba) {
    match command {
        DrawCommand::FillRect { rect, color } => {
            fill_rect(ctx, rect, terminal_color(*color, bg), h, step)
        }
        DrawCommand::StrokeRect {
            rect, color, dash, ..
        } => stroke_rect(ctx, rect, terminal_color(*color, bg), *dash, h),
        DrawCommand::VLine { x, y0, y1, color } => {
            vline(ctx, *x, *y0, *y1, terminal_color(*color, bg), h)
        }
        DrawCommand::Text { x, y, text, color } => {
            let style = Style::default().fg(terminal_color(*color, bg));
            ctx.print(*x, h - *y, Line::styled(text.clone(), style));
        }
    }
}

/// Draw a vertical segment given in top-down scene coordinates.
fn vline(ctx: &mut Context<'_>, x: f64, y0: f64, y1: f64, color: Color, h: f64) {
    ctx.draw(&CanvasLine {
        x1: x,
        y1: h - y0,
        x2: x,
        y2: h - y1,
        color,
    });
}

fn hline(ctx: &mut Context<'_>, x0: f64, x1: f64, y: f64, color: Color, h: f64) {
    ctx.draw(&CanvasLine {
        x1: x0,
        y1: h - y,
        x2: x1,
        y2: h - y,
        color,
    });
}

fn fill_rect(ctx: &mut Context<'_>, rect: &RectF, color: Color, h: f64, step: f64) {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }
    let mut x = rect.x;
    while x < rect.right() {
        vline(ctx, x, rect.y, rect.bottom(), color, h);
        x += step;
    }
}

fn stroke_rect(ctx: &mut Context<'_>, rect: &RectF, color: Color, dash: Option<[f64; 2]>, h: f64) {
    let segments = |start: f64, end: f64| match dash {
        Some(d) => dash_segments(start, end, d),
        None => vec![(start, end)],
    };
    for (a, b) in segments(rect.x, rect.right()) {
        hline(ctx, a, b, rect.y, color, h);
        hline(ctx, a, b, rect.bottom(), color, h);
    }
    for (a, b) in segments(rect.y, rect.bottom()) {
        vline(ctx, rect.x, a, b, color, h);
        vline(ctx, rect.right(), a, b, color, h);
    }
}
