// src/ui/widgets/file_list.rs
//! Track browser list widget.

use std::path::Path;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::fs::BrowserEntry;
use crate::ui::icons::{icon_for_entry, pick_marker};

/// Render the browser. `reference` and `candidate` are the picked file paths.
pub fn render_file_list(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    dir: &Path,
    entries: &[BrowserEntry],
    picks: (Option<&Path>, Option<&Path>),
    state: &mut ListState,
) {
    let (reference, candidate) = picks;
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let path = dir.join(&entry.name);
            let marker = pick_marker(
                reference == Some(path.as_path()),
                candidate == Some(path.as_path()),
            );
            let style = if entry.is_audio() {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} {}", icon_for_entry(entry), entry.name), style),
                Span::styled(marker, Style::default().fg(Color::Yellow)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, state);
}
