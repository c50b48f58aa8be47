// src/app/selection.rs
//! Genre, subgenre and instrument selection with wrap-around cycling.

use crate::config::SessionSettings;
use crate::knowledge::{
    instrument_by_name, GenreCategory, GenreEntry, InstrumentProfile, SelectedGenre,
    GENRE_CATALOG, INSTRUMENT_PROFILES,
};
use crate::render::RenderContext;

/// Where the selected genre sits in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
enum GenrePick {
    None,
    Catalog { index: usize, subgenre: usize },
    /// A name restored from the config that the catalog doesn't list
    Custom(SelectedGenre),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    genre: GenrePick,
    instrument: Option<usize>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            genre: GenrePick::None,
            instrument: None,
        }
    }
}

impl Selection {
    /// Restore the selections named in the config.
    pub fn from_session(session: &SessionSettings) -> Self {
        let genre = match session.genre.as_deref() {
            None => GenrePick::None,
            Some(name) => match GENRE_CATALOG.iter().position(|g| g.name == name) {
                Some(index) => {
                    let subgenre = session
                        .subgenre
                        .as_deref()
                        .and_then(|s| GENRE_CATALOG[index].subgenres.iter().position(|g| *g == s))
                        .unwrap_or(0);
                    GenrePick::Catalog { index, subgenre }
                }
                None => GenrePick::Custom(SelectedGenre::new(
                    name,
                    session.subgenre.clone().unwrap_or_default(),
                )),
            },
        };
        let instrument = session
            .instrument
            .as_deref()
            .and_then(instrument_by_name)
            .and_then(|p| INSTRUMENT_PROFILES.iter().position(|q| q.name == p.name));
        Self { genre, instrument }
    }

    pub fn next_genre(&mut self) {
        self.genre = match self.genre {
            GenrePick::Catalog { index, .. } if index + 1 < GENRE_CATALOG.len() => {
                GenrePick::Catalog { index: index + 1, subgenre: 0 }
            }
            GenrePick::Catalog { .. } => GenrePick::None,
            GenrePick::None | GenrePick::Custom(_) => GenrePick::Catalog { index: 0, subgenre: 0 },
        };
    }

    pub fn previous_genre(&mut self) {
        self.genre = match self.genre {
            GenrePick::Catalog { index: 0, .. } => GenrePick::None,
            GenrePick::Catalog { index, .. } => GenrePick::Catalog {
                index: index - 1,
                subgenre: 0,
            },
            GenrePick::None | GenrePick::Custom(_) => GenrePick::Catalog {
                index: GENRE_CATALOG.len() - 1,
                subgenre: 0,
            },
        };
    }

    pub fn next_subgenre(&mut self) {
        if let GenrePick::Catalog { index, subgenre } = &mut self.genre {
            let count = GENRE_CATALOG[*index].subgenres.len();
            if count > 0 {
                *subgenre = (*subgenre + 1) % count;
            }
        }
    }

    pub fn next_instrument(&mut self) {
        self.instrument = match self.instrument {
            None => Some(0),
            Some(i) if i + 1 < INSTRUMENT_PROFILES.len() => Some(i + 1),
            Some(_) => None,
        };
    }

    pub fn previous_instrument(&mut self) {
        self.instrument = match self.instrument {
            None => Some(INSTRUMENT_PROFILES.len() - 1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn catalog_entry(&self) -> Option<&'static GenreEntry> {
        match self.genre {
            GenrePick::Catalog { index, .. } => GENRE_CATALOG.get(index),
            _ => None,
        }
    }

    pub fn genre(&self) -> Option<SelectedGenre> {
        match &self.genre {
            GenrePick::None => None,
            GenrePick::Catalog { index, subgenre } => {
                let entry = &GENRE_CATALOG[*index];
                let sub = entry.subgenres.get(*subgenre).copied().unwrap_or_default();
                Some(SelectedGenre::new(entry.name, sub))
            }
            GenrePick::Custom(genre) => Some(genre.clone()),
        }
    }

    pub fn instrument(&self) -> Option<&'static InstrumentProfile> {
        self.instrument.and_then(|i| INSTRUMENT_PROFILES.get(i))
    }

    /// Immutable context for the render loop.
    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(self.genre(), self.instrument())
    }

    /// Distinguishes "nothing picked" from "picked, but no analysis entry".
    pub fn genre_status(&self) -> String {
        match self.genre() {
            None => "NO GENRE".to_string(),
            Some(g) if g.classify() == GenreCategory::Unclassified => {
                format!("UNPROFILED: {}", g.category)
            }
            Some(g) => g.category.to_uppercase(),
        }
    }

    /// Subgenre, or `LINEAR` when no genre shapes the analysis.
    pub fn mode(&self) -> String {
        match self.genre() {
            Some(g) if !g.subgenre.is_empty() => g.subgenre,
            _ => "LINEAR".to_string(),
        }
    }
}
