// src/render/scene.rs
//! Display list produced once per frame and consumed by the painters.

use super::color::Rgba;

/// Stable identifier of the analyzer canvas, used by snapshot tooling.
pub const CANVAS_ID: &str = "spectral-lab:analyzer";

/// Which pass of the frame a command belongs to, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SceneLayer {
    Background,
    GenreFocus,
    InstrumentBand,
    Spectrum,
    Grid,
}

impl SceneLayer {
    pub fn is_overlay(self) -> bool {
        matches!(self, SceneLayer::GenreFocus | SceneLayer::InstrumentBand)
    }
}

/// Axis-aligned rectangle, origin at the top-left corner, y growing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: RectF,
        color: Rgba,
    },
    StrokeRect {
        rect: RectF,
        color: Rgba,
        line_width: f64,
        /// `[on, off]` lengths in pixels; solid when `None`
        dash: Option<[f64; 2]>,
    },
    VLine {
        x: f64,
        y0: f64,
        y1: f64,
        color: Rgba,
    },
    Text {
        x: f64,
        /// Baseline position
        y: f64,
        text: String,
        color: Rgba,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub layer: SceneLayer,
    pub command: DrawCommand,
}

/// Everything drawn in one frame, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    id: &'static str,
    width: f64,
    height: f64,
    background: Rgba,
    items: Vec<SceneItem>,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: Rgba) -> Self {
        Self {
            id: CANVAS_ID,
            width,
            height,
            background,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: SceneLayer, command: DrawCommand) {
        self.items.push(SceneItem { layer, command });
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn layer(&self, layer: SceneLayer) -> impl Iterator<Item = &DrawCommand> {
        self.items
            .iter()
            .filter(move |item| item.layer == layer)
            .map(|item| &item.command)
    }

    /// Filled overlay rectangles (genre focus and instrument bands), in order.
    pub fn overlay_fills(&self) -> Vec<(SceneLayer, RectF, Rgba)> {
        self.items
            .iter()
            .filter(|item| item.layer.is_overlay())
            .filter_map(|item| match item.command {
                DrawCommand::FillRect { rect, color } => Some((item.layer, rect, color)),
                _ => None,
            })
            .collect()
    }

    /// Every text command in a layer.
    pub fn texts(&self, layer: SceneLayer) -> Vec<(&str, Rgba)> {
        self.layer(layer)
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, color, .. } => Some((text.as_str(), *color)),
                _ => None,
            })
            .collect()
    }
}

/// Split `start..end` into the "on" segments of a dash pattern.
pub fn dash_segments(start: f64, end: f64, dash: [f64; 2]) -> Vec<(f64, f64)> {
    let [on, off] = dash;
    if on <= 0.0 {
        return Vec::new();
    }
    let period = on + off.max(0.0);
    let mut segments = Vec::new();
    let mut pos = start;
    while pos < end {
        segments.push((pos, (pos + on).min(end)));
        pos += period;
    }
    segments
}
