// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The three top-row panels, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Browser,
    Profile,
    Comparison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionVisibility {
    pub browser: bool,
    pub profile: bool,
    pub comparison: bool,
    pub analyzer: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            browser: true,
            profile: true,
            comparison: true,
            analyzer: true,
        }
    }
}

impl SectionVisibility {
    /// Toggle a panel by number (1-4).
    pub fn toggle(&mut self, section: usize) {
        match section {
            1 => self.browser = !self.browser,
            2 => self.profile = !self.profile,
            3 => self.comparison = !self.comparison,
            4 => self.analyzer = !self.analyzer,
            _ => {}
        }
    }
}

pub struct ComputedLayout {
    /// Visible top-row panels paired with their areas
    pub columns: Vec<(Section, Rect)>,
    pub analyzer_area: Option<Rect>,
    pub status_area: Rect,
}

pub fn compute_layout(area: Rect, visibility: &SectionVisibility) -> ComputedLayout {
    let [body, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(area);

    // The analyzer takes the bottom half when shown; otherwise the panels get everything.
    let (main_area, analyzer_area) = if visibility.analyzer {
        let [top, bottom] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(body);
        (top, Some(bottom))
    } else {
        (body, None)
    };

    let mut sections = Vec::new();
    let mut weights = Vec::new();
    if visibility.browser {
        sections.push(Section::Browser);
        weights.push(30u32);
    }
    if visibility.profile {
        sections.push(Section::Profile);
        weights.push(35u32);
    }
    if visibility.comparison {
        sections.push(Section::Comparison);
        weights.push(35u32);
    }

    let columns = if weights.is_empty() {
        Vec::new()
    } else {
        let sum: u32 = weights.iter().sum();
        let constraints: Vec<Constraint> = weights
            .into_iter()
            .map(|w| Constraint::Ratio(w, sum))
            .collect();
        let areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(main_area);
        sections.into_iter().zip(areas.iter().copied()).collect()
    };

    ComputedLayout {
        columns,
        analyzer_area,
        status_area,
    }
}
