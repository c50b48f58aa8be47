// src/render/frame.rs
//! Per-frame composition of the annotated spectrogram.

use super::color::Rgba;
use super::scene::{DrawCommand, RectF, Scene, SceneLayer};
use crate::audio::analysis::SpectrumFrame;
use crate::audio::mapper::{bin_frequency, x_position, NOMINAL_SAMPLE_RATE};
use crate::error::RenderError;
use crate::knowledge::{profile_for, GenreAnalysisProfile, InstrumentProfile, SelectedGenre};

pub const BACKGROUND: Rgba = Rgba::from_hex(0x09090b);
/// Reference gridline frequencies, always drawn last.
pub const GRID_FREQUENCIES: [f64; 3] = [100.0, 1_000.0, 10_000.0];

const FOCUS_FILL_ALPHA: u8 = 0x05;
const FOCUS_STROKE_ALPHA: u8 = 0x20;
const FOCUS_DASH: [f64; 2] = [5.0, 5.0];
const BAR_WIDTH: f64 = 2.0;
const MIN_BAR_OPACITY: f32 = 0.2;

/// Selection state threaded into every frame. Rebuilt when selection changes.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    genre: Option<SelectedGenre>,
    profile: GenreAnalysisProfile,
    instrument: Option<&'static InstrumentProfile>,
}

impl RenderContext {
    pub fn new(
        genre: Option<SelectedGenre>,
        instrument: Option<&'static InstrumentProfile>,
    ) -> Self {
        let profile = profile_for(genre.as_ref());
        Self {
            genre,
            profile,
            instrument,
        }
    }

    pub fn genre(&self) -> Option<&SelectedGenre> {
        self.genre.as_ref()
    }

    pub fn profile(&self) -> &GenreAnalysisProfile {
        &self.profile
    }

    pub fn instrument(&self) -> Option<&'static InstrumentProfile> {
        self.instrument
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Compose one full frame onto a `width` x `height` canvas.
pub fn compose_frame(
    ctx: &RenderContext,
    frame: &SpectrumFrame,
    width: f64,
    height: f64,
) -> Result<Scene, RenderError> {
    if !(width > 0.0 && height > 0.0) {
        return Err(RenderError::EmptySurface { width, height });
    }

    let mut scene = Scene::new(width, height, BACKGROUND);
    scene.push(
        SceneLayer::Background,
        DrawCommand::FillRect {
            rect: RectF::new(0.0, 0.0, width, height),
            color: BACKGROUND,
        },
    );

    if ctx.genre.is_some() {
        draw_genre_focus(&mut scene, &ctx.profile);
    }
    if let Some(instrument) = ctx.instrument {
        draw_instrument_bands(&mut scene, instrument);
    }
    draw_spectrum(&mut scene, frame, ctx.profile.accent);
    draw_grid(&mut scene);

    Ok(scene)
}

fn draw_genre_focus(scene: &mut Scene, profile: &GenreAnalysisProfile) {
    let (w, h) = (scene.width(), scene.height());
    let (min, max) = profile.focus_range_hz;
    let x_start = x_position(min, w);
    let rect = RectF::new(x_start, 0.0, x_position(max, w) - x_start, h);

    scene.push(
        SceneLayer::GenreFocus,
        DrawCommand::FillRect {
            rect,
            color: profile.accent.with_alpha(FOCUS_FILL_ALPHA),
        },
    );
    scene.push(
        SceneLayer::GenreFocus,
        DrawCommand::StrokeRect {
            rect,
            color: profile.accent.with_alpha(FOCUS_STROKE_ALPHA),
            line_width: 1.0,
            dash: Some(FOCUS_DASH),
        },
    );
    scene.push(
        SceneLayer::GenreFocus,
        DrawCommand::Text {
            x: x_start + 4.0,
            y: h - 25.0,
            text: format!("GENRE FOCUS: {}", profile.focus_label),
            color: profile.accent.opaque(),
        },
    );
}

fn draw_instrument_bands(scene: &mut Scene, instrument: &InstrumentProfile) {
    let (w, h) = (scene.width(), scene.height());
    for band in instrument.bands {
        let x_start = x_position(band.min_hz, w);
        let rect = RectF::new(x_start, 0.0, x_position(band.max_hz, w) - x_start, h);

        scene.push(
            SceneLayer::InstrumentBand,
            DrawCommand::FillRect {
                rect,
                color: band.color,
            },
        );
        scene.push(
            SceneLayer::InstrumentBand,
            DrawCommand::Text {
                x: x_start + 2.0,
                y: 12.0,
                text: band.label.to_uppercase(),
                color: band.label_color(),
            },
        );
        scene.push(
            SceneLayer::InstrumentBand,
            DrawCommand::StrokeRect {
                rect,
                color: band.outline_color(),
                line_width: 1.0,
                dash: None,
            },
        );
    }
}

fn draw_spectrum(scene: &mut Scene, frame: &SpectrumFrame, accent: Rgba) {
    let (w, h) = (scene.width(), scene.height());
    let bin_count = frame.bin_count();
    for (i, &value) in frame.bins().iter().enumerate() {
        let freq = bin_frequency(i, bin_count, NOMINAL_SAMPLE_RATE);
        let x = x_position(freq, w);
        let level = value as f64 / 255.0;
        let bar_height = level * h;
        let opacity = (level as f32).max(MIN_BAR_OPACITY);
        scene.push(
            SceneLayer::Spectrum,
            DrawCommand::FillRect {
                rect: RectF::new(x, h - bar_height, BAR_WIDTH, bar_height),
                color: accent.with_opacity(opacity),
            },
        );
    }
}

fn draw_grid(scene: &mut Scene) {
    let (w, h) = (scene.width(), scene.height());
    let line = Rgba::WHITE.with_opacity(0.05);
    let label = Rgba::WHITE.with_opacity(0.2);
    for freq in GRID_FREQUENCIES {
        let x = x_position(freq, w);
        scene.push(
            SceneLayer::Grid,
            DrawCommand::VLine {
                x,
                y0: 0.0,
                y1: h,
                color: line,
            },
        );
        scene.push(
            SceneLayer::Grid,
            DrawCommand::Text {
                x: x + 2.0,
                y: h - 5.0,
                text: grid_label(freq),
                color: label,
            },
        );
    }
}

/// `100`, `1k`, `10k`.
pub fn grid_label(freq: f64) -> String {
    if freq >= 1000.0 {
        format!("{}k", freq / 1000.0)
    } else {
        format!("{freq}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::instrument_by_name;

    fn frame(bins: usize, value: u8) -> SpectrumFrame {
        SpectrumFrame::from_bins(vec![value; bins])
    }

    #[test]
    fn empty_surface_is_an_error() {
        let ctx = RenderContext::default();
        assert!(compose_frame(&ctx, &frame(4, 0), 0.0, 300.0).is_err());
        assert!(compose_frame(&ctx, &frame(4, 0), 800.0, f64::NAN).is_err());
    }

    #[test]
    fn layers_appear_in_draw_order() {
        let genre = SelectedGenre::new("Rock", "Grunge");
        let ctx = RenderContext::new(Some(genre), instrument_by_name("Guitars"));
        let scene = compose_frame(&ctx, &frame(8, 128), 800.0, 300.0).unwrap();
        let layers: Vec<_> = scene.items().iter().map(|i| i.layer).collect();
        let mut sorted = layers.clone();
        sorted.sort();
        assert_eq!(layers, sorted);
        assert_eq!(layers.first(), Some(&SceneLayer::Background));
        assert_eq!(layers.last(), Some(&SceneLayer::Grid));
    }

    #[test]
    fn unsorted_bands_land_at_their_own_frequencies() {
        for name in ["Synth Lead", "Drum Overheads"] {
            let instrument = instrument_by_name(name).unwrap();
            let ctx = RenderContext::new(None, Some(instrument));
            let scene = compose_frame(&ctx, &frame(8, 0), 800.0, 300.0).unwrap();
            let fills: Vec<RectF> = scene
                .items()
                .iter()
                .filter(|i| i.layer == SceneLayer::InstrumentBand)
                .filter_map(|i| match &i.command {
                    DrawCommand::FillRect { rect, .. } => Some(*rect),
                    _ => None,
                })
                .collect();
            assert_eq!(fills.len(), instrument.bands.len());
            for (rect, band) in fills.iter().zip(instrument.bands) {
                assert_eq!(rect.x, x_position(band.min_hz, 800.0), "{name} {}", band.label);
                assert!((rect.x + rect.width - x_position(band.max_hz, 800.0)).abs() < 1e-9);
            }
            assert!(fills.windows(2).any(|pair| pair[1].x < pair[0].x), "{name}");
        }
    }

    #[test]
    fn bar_height_and_opacity_follow_magnitude() {
        let ctx = RenderContext::default();
        let f = SpectrumFrame::from_bins(vec![0, 255, 51]);
        let scene = compose_frame(&ctx, &f, 800.0, 300.0).unwrap();
        let bars: Vec<_> = scene
            .layer(SceneLayer::Spectrum)
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].0.height, 0.0);
        assert_eq!(bars[0].1.a, 51); // opacity floor
        assert_eq!(bars[1].0.height, 300.0);
        assert_eq!(bars[1].0.y, 0.0);
        assert_eq!(bars[1].1.a, 255);
        assert!((bars[2].0.height - 60.0).abs() < 1e-9);
        assert_eq!(bars[0].0.x, 0.0); // 0 Hz clamps to the left edge
    }

    #[test]
    fn unrecognised_genre_still_shows_neutral_focus() {
        let ctx = RenderContext::new(Some(SelectedGenre::new("Blues", "Delta blues")), None);
        let scene = compose_frame(&ctx, &frame(4, 0), 800.0, 300.0).unwrap();
        let texts = scene.texts(SceneLayer::GenreFocus);
        assert_eq!(texts[0].0, "GENRE FOCUS: NEUTRAL PROFILE");
    }

    #[test]
    fn grid_labels() {
        let labels: Vec<_> = GRID_FREQUENCIES.iter().map(|&f| grid_label(f)).collect();
        assert_eq!(labels, ["100", "1k", "10k"]);
    }
}
