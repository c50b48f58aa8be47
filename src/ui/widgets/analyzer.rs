// src/ui/widgets/analyzer.rs
//! Analyzer pane: the latest scene, or a hint while idle.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::render::{render_scene, LoopState, Scene};

/// Landmarks of the log frequency axis, shown under the plot.
pub const AXIS_LEGEND: &str = "20Hz (SUB) · 200Hz (BASS) · 2kHz (MID) · 20kHz (AIR)";

pub fn render_analyzer(f: &mut Frame<'_>, area: Rect, scene: Option<&Scene>, state: LoopState) {
    let title = match state {
        LoopState::Active => "4: Analyzer [live]",
        LoopState::Idle => "4: Analyzer [idle]",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(Line::from(AXIS_LEGEND).centered());

    match scene {
        Some(scene) => render_scene(f, area, scene, block),
        None => f.render_widget(
            Paragraph::new("Press a to start capture")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block),
            area,
        ),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::audio::SpectrumFrame;
    use crate::render::{compose_frame, RenderContext};

    fn bottom_row(scene: Option<&Scene>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|f| render_analyzer(f, f.area(), scene, LoopState::Active))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..80).map(|x| buffer[(x, 11)].symbol().to_string()).collect()
    }

    #[test]
    fn axis_legend_sits_on_the_bottom_border() {
        let idle = bottom_row(None);
        assert!(idle.contains(AXIS_LEGEND), "{idle}");

        let scene = compose_frame(
            &RenderContext::default(),
            &SpectrumFrame::silent(64),
            800.0,
            300.0,
        )
        .unwrap();
        let live = bottom_row(Some(&scene));
        assert!(live.contains("200Hz (BASS)"), "{live}");
    }
}
