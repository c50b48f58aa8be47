// src/knowledge/instrument.rs
//! Instrument frequency profiles: named sweet-spot and problem bands.

use crate::render::Rgba;

const BLUE: Rgba = Rgba::rgba(59, 130, 246, 51);
const RED: Rgba = Rgba::rgba(239, 68, 68, 38);
const GREEN: Rgba = Rgba::rgba(16, 185, 129, 51);
const VIOLET: Rgba = Rgba::rgba(139, 92, 246, 51);

/// Label color for bands worth emphasising.
pub const SWEET_SPOT_LABEL: Rgba = Rgba::from_hex(0x60a5fa);
/// Label color for bands that usually need attenuation.
pub const PROBLEM_LABEL: Rgba = Rgba::from_hex(0xef4444);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandClass {
    SweetSpot,
    ProblemArea,
}

/// A named frequency range on an instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    pub label: &'static str,
    pub min_hz: f64,
    pub max_hz: f64,
    /// Translucent fill color.
    pub color: Rgba,
    pub class: BandClass,
}

impl FrequencyBand {
    const fn sweet(label: &'static str, min_hz: f64, max_hz: f64, color: Rgba) -> Self {
        Self {
            label,
            min_hz,
            max_hz,
            color,
            class: BandClass::SweetSpot,
        }
    }

    const fn problem(label: &'static str, min_hz: f64, max_hz: f64) -> Self {
        Self {
            label,
            min_hz,
            max_hz,
            color: RED,
            class: BandClass::ProblemArea,
        }
    }

    /// Outline color: the fill color at twice its opacity.
    pub fn outline_color(&self) -> Rgba {
        self.color.with_alpha(self.color.a.saturating_mul(2))
    }

    pub fn label_color(&self) -> Rgba {
        match self.class {
            BandClass::SweetSpot => SWEET_SPOT_LABEL,
            BandClass::ProblemArea => PROBLEM_LABEL,
        }
    }

    /// Human-readable range, e.g. `300-600Hz` or `2000-4kHz`.
    pub fn range_label(&self) -> String {
        let max = if self.max_hz >= 1000.0 {
            format!("{}k", self.max_hz / 1000.0)
        } else {
            format!("{}", self.max_hz)
        };
        format!("{}-{}Hz", self.min_hz, max)
    }
}

/// Immutable catalog entry describing one instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrumentProfile {
    pub name: &'static str,
    pub icon: &'static str,
    pub attack: &'static str,
    pub sustain: &'static str,
    pub genres: &'static [&'static str],
    /// Bands in authored order.
    pub bands: &'static [FrequencyBand],
}

impl InstrumentProfile {
    /// Bands ordered left to right on the frequency axis.
    pub fn bands_by_frequency(&self) -> Vec<&'static FrequencyBand> {
        let mut bands: Vec<_> = self.bands.iter().collect();
        bands.sort_by(|a, b| a.min_hz.total_cmp(&b.min_hz));
        bands
    }

    pub fn applies_to(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g.eq_ignore_ascii_case(genre))
    }
}

pub static INSTRUMENT_PROFILES: [InstrumentProfile; 10] = [
    InstrumentProfile {
        name: "Vocals",
        icon: "🎤",
        attack: "Soft / Mid",
        sustain: "High",
        genres: &["Pop", "Jazz", "Rock", "R&B"],
        bands: &[
            FrequencyBand::sweet("Fundamental", 80.0, 200.0, BLUE),
            FrequencyBand::problem("Mud", 250.0, 500.0),
            FrequencyBand::sweet("Presence", 3000.0, 5000.0, GREEN),
            FrequencyBand::sweet("Air", 10000.0, 16000.0, VIOLET),
        ],
    },
    InstrumentProfile {
        name: "Kick Drum",
        icon: "🥁",
        attack: "Very Fast / Punchy",
        sustain: "Low",
        genres: &["Electronic", "Hip-Hop", "Metal"],
        bands: &[
            FrequencyBand::sweet("Sub/Weight", 50.0, 100.0, BLUE),
            FrequencyBand::problem("Boxy", 300.0, 600.0),
            FrequencyBand::sweet("Beater Click", 2000.0, 4000.0, GREEN),
        ],
    },
    InstrumentProfile {
        name: "Electric Bass",
        icon: "🎸",
        attack: "Medium / Percussive",
        sustain: "Medium-High",
        genres: &["Funk", "Rock", "Blues"],
        bands: &[
            FrequencyBand::sweet("Bottom", 40.0, 100.0, BLUE),
            FrequencyBand::sweet("Attack", 700.0, 1200.0, GREEN),
            FrequencyBand::sweet("Finger Noise", 2000.0, 5000.0, VIOLET),
        ],
    },
    InstrumentProfile {
        name: "Snare",
        icon: "🥁",
        attack: "Fast / Sharp",
        sustain: "Medium-Low",
        genres: &["Rock", "Pop", "Country"],
        bands: &[
            FrequencyBand::sweet("Body", 150.0, 250.0, BLUE),
            FrequencyBand::problem("Ring", 600.0, 900.0),
            FrequencyBand::sweet("Snap/Crack", 2000.0, 5000.0, GREEN),
        ],
    },
    InstrumentProfile {
        name: "Guitars",
        icon: "🎸",
        attack: "Medium",
        sustain: "Variable",
        genres: &["Rock", "Indie", "Folk"],
        bands: &[
            FrequencyBand::sweet("Body", 200.0, 400.0, BLUE),
            FrequencyBand::problem("Honk", 800.0, 1200.0),
            FrequencyBand::sweet("Presence", 3000.0, 6000.0, GREEN),
        ],
    },
    InstrumentProfile {
        name: "Synth Lead",
        icon: "🎹",
        attack: "Fast / Modulated",
        sustain: "Variable / High",
        genres: &["EDM", "Synthwave", "Hip-Hop"],
        bands: &[
            FrequencyBand::sweet("Bite", 2000.0, 4000.0, BLUE),
            FrequencyBand::problem("Harshness", 5000.0, 8000.0),
            FrequencyBand::sweet("Fundamental", 200.0, 800.0, GREEN),
        ],
    },
    InstrumentProfile {
        name: "Acoustic Piano",
        icon: "🎹",
        attack: "Fast",
        sustain: "High",
        genres: &["Classical", "Jazz", "Pop"],
        bands: &[
            FrequencyBand::sweet("Body", 150.0, 400.0, BLUE),
            FrequencyBand::problem("Clutter", 300.0, 600.0),
            FrequencyBand::sweet("Clarity", 2000.0, 5000.0, GREEN),
        ],
    },
    InstrumentProfile {
        name: "Drum Overheads",
        icon: "✨",
        attack: "Fast",
        sustain: "Medium",
        genres: &["Rock", "Jazz", "Metal"],
        bands: &[
            FrequencyBand::sweet("Sizzle", 6000.0, 12000.0, BLUE),
            FrequencyBand::problem("Harshness", 3000.0, 5000.0),
            FrequencyBand::sweet("Snare Body", 200.0, 500.0, GREEN),
        ],
    },
    InstrumentProfile {
        name: "Cello",
        icon: "🎻",
        attack: "Slow / Mid",
        sustain: "Very High",
        genres: &["Classical", "Cinematic", "Folk"],
        bands: &[
            FrequencyBand::sweet("Warmth", 100.0, 300.0, BLUE),
            FrequencyBand::problem("Boxy", 400.0, 800.0),
            FrequencyBand::sweet("Bow Noise", 2000.0, 4000.0, GREEN),
        ],
    },
    InstrumentProfile {
        name: "Trumpet",
        icon: "🎺",
        attack: "Fast / Mid",
        sustain: "High",
        genres: &["Jazz", "Latin", "Orchestral"],
        bands: &[
            FrequencyBand::sweet("Body", 400.0, 1000.0, BLUE),
            FrequencyBand::problem("Piercing", 1500.0, 3000.0),
            FrequencyBand::sweet("Brilliance", 4000.0, 8000.0, GREEN),
        ],
    },
];

/// Exact-match instrument lookup.
pub fn instrument_by_name(name: &str) -> Option<&'static InstrumentProfile> {
    INSTRUMENT_PROFILES.iter().find(|p| p.name == name)
}
