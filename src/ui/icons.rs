// src/ui/icons.rs
//! Nerd-font glyphs for browser rows.

use crate::fs::{BrowserEntry, FileCategory};

pub fn icon_for_entry(entry: &BrowserEntry) -> &'static str {
    if entry.is_dir {
        return "\u{f07b}";
    }
    match entry.category {
        FileCategory::Audio => "\u{f1c7}",
        FileCategory::Image => "\u{f1c5}",
        FileCategory::Video => "\u{f1c8}",
        FileCategory::Document => "\u{f15c}",
        FileCategory::Binary => "\u{f1c6}",
    }
}

/// Tag shown after a file picked for comparison.
pub fn pick_marker(is_reference: bool, is_candidate: bool) -> &'static str {
    match (is_reference, is_candidate) {
        (true, true) => " [REF+MIX]",
        (true, false) => " [REF]",
        (false, true) => " [MIX]",
        (false, false) => "",
    }
}
