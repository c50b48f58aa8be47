// src/ui/widgets/profile_panel.rs
//! Capture status, analysis profile and the selected instrument's bands.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::knowledge::{BandClass, GenreAnalysisProfile, InstrumentProfile};
use crate::render::terminal_color;
use crate::render::BACKGROUND;

pub struct ProfileView<'a> {
    pub capturing: bool,
    pub genre_status: &'a str,
    pub mode: &'a str,
    pub profile: &'a GenreAnalysisProfile,
    pub instrument: Option<&'static InstrumentProfile>,
}

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{text:<12}"), Style::default().fg(Color::DarkGray))
}

pub fn render_profile_panel(f: &mut Frame<'_>, area: Rect, view: &ProfileView<'_>) {
    let accent = terminal_color(view.profile.accent, BACKGROUND);
    let capture = if view.capturing {
        Span::styled("LIVE", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("IDLE", Style::default().fg(Color::Gray))
    };

    let mut lines = vec![
        Line::from(vec![label("Capture"), capture]),
        Line::from(vec![label("Genre"), Span::raw(view.genre_status.to_string())]),
        Line::from(vec![label("Mode"), Span::raw(view.mode.to_string())]),
        Line::from(vec![
            label("Resolution"),
            Span::raw(format!(
                "{} ({} bins, smoothing {:.2})",
                view.profile.resolution,
                view.profile.bin_count(),
                view.profile.smoothing
            )),
        ]),
        Line::from(vec![
            label("Focus"),
            Span::styled(view.profile.focus_label, Style::default().fg(accent)),
            Span::raw(format!(
                " {}-{} Hz",
                view.profile.focus_range_hz.0, view.profile.focus_range_hz.1
            )),
        ]),
        Line::default(),
    ];

    match view.instrument {
        Some(instrument) => {
            lines.push(Line::from(Span::styled(
                format!("{} {} - Dynamic Profile", instrument.icon, instrument.name),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(vec![label("Attack"), Span::raw(instrument.attack)]));
            lines.push(Line::from(vec![label("Sustain"), Span::raw(instrument.sustain)]));
            for band in instrument.bands {
                let (tag, color) = match band.class {
                    BandClass::SweetSpot => ("+", Color::LightBlue),
                    BandClass::ProblemArea => ("!", Color::LightRed),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!(" {tag} "), Style::default().fg(color)),
                    Span::raw(format!("{:<14}", band.label)),
                    Span::styled(band.range_label(), Style::default().fg(Color::DarkGray)),
                ]));
            }
            lines.push(Line::from(vec![
                label("Utility"),
                Span::raw(instrument.genres.join(", ")),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "No instrument selected (i/I)",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("2: Profile")),
        area,
    );
}
