// src/ui/widgets/comparison_panel.rs
//! Reference/candidate picks and the comparison verdict.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::compare::{AudioPayload, ComparisonState};

fn pick_line(tag: &'static str, pick: Option<&AudioPayload>) -> Line<'static> {
    let value = match pick {
        Some(p) => Span::raw(p.summary()),
        None => Span::styled("not set", Style::default().fg(Color::DarkGray)),
    };
    Line::from(vec![Span::styled(tag, Style::default().fg(Color::Yellow)), value])
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
}

pub fn render_comparison_panel(
    f: &mut Frame<'_>,
    area: Rect,
    reference: Option<&AudioPayload>,
    candidate: Option<&AudioPayload>,
    state: &ComparisonState,
) {
    let mut lines = vec![
        pick_line("REF  ", reference),
        pick_line("MIX  ", candidate),
        Line::default(),
    ];

    match state {
        ComparisonState::Idle => lines.push(Line::from(Span::styled(
            "r: reference  t: candidate  c: compare",
            Style::default().fg(Color::DarkGray),
        ))),
        ComparisonState::Pending => lines.push(Line::from(Span::styled(
            "Analyzing...",
            Style::default().fg(Color::Cyan),
        ))),
        ComparisonState::Failed(msg) => lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        ))),
        ComparisonState::Ready(verdict) => {
            lines.push(heading("Tonal balance"));
            lines.push(Line::raw(verdict.tonal_balance.clone()));
            lines.push(heading("Dynamics"));
            lines.push(Line::raw(verdict.dynamics_compare.clone()));
            lines.push(heading("Stereo depth"));
            lines.push(Line::raw(verdict.stereo_depth.clone()));
            lines.push(heading("Correction blueprint"));
            for (i, step) in verdict.correction_blueprint.iter().enumerate() {
                lines.push(Line::raw(format!("{}. {}", i + 1, step)));
            }
        }
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("3: Compare")),
        area,
    );
}
