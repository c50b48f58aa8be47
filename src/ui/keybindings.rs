// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map digit/shifted-digit keys to panel number (1..4).
pub fn map_key_to_digit(k: &KeyEvent) -> Option<usize> {
    match k.code {
        KeyCode::Char('1' | '!') => Some(1),
        KeyCode::Char('2' | '@') => Some(2),
        KeyCode::Char('3' | '#') => Some(3),
        KeyCode::Char('4' | '$') => Some(4),
        _ => None,
    }
}

/// Shifted digits arrive as symbols on most layouts.
pub fn is_shifted_symbol(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('!' | '@' | '#' | '$'))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    Up,
    Down,
    Enter,
    Back,
    ToggleCapture,
    NextGenre,
    PreviousGenre,
    NextSubgenre,
    NextInstrument,
    PreviousInstrument,
    MarkReference,
    MarkCandidate,
    Compare,
    Snapshot,
    Quit,
    ToggleSection(usize),
    None,
}

pub fn key_to_action(key: &KeyEvent) -> NavigationAction {
    if let Some(d) = map_key_to_digit(key) {
        if key.modifiers.contains(KeyModifiers::SHIFT) || is_shifted_symbol(key) {
            return NavigationAction::ToggleSection(d);
        }
    }

    match key.code {
        KeyCode::Down => NavigationAction::Down,
        KeyCode::Up => NavigationAction::Up,
        KeyCode::Enter | KeyCode::Right => NavigationAction::Enter,
        KeyCode::Left => NavigationAction::Back,
        KeyCode::Char('a') => NavigationAction::ToggleCapture,
        KeyCode::Char('g') => NavigationAction::NextGenre,
        KeyCode::Char('G') => NavigationAction::PreviousGenre,
        KeyCode::Char('s') => NavigationAction::NextSubgenre,
        KeyCode::Char('i') => NavigationAction::NextInstrument,
        KeyCode::Char('I') => NavigationAction::PreviousInstrument,
        KeyCode::Char('r') => NavigationAction::MarkReference,
        KeyCode::Char('t') => NavigationAction::MarkCandidate,
        KeyCode::Char('c') => NavigationAction::Compare,
        KeyCode::Char('p') => NavigationAction::Snapshot,
        KeyCode::Char('q') => NavigationAction::Quit,
        _ => NavigationAction::None,
    }
}
