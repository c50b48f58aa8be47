// src/knowledge/genre.rs
//! Genre categories and their analysis profiles.

use crate::error::ProfileError;
use crate::render::Rgba;

/// Smallest analysis resolution the transform accepts.
pub const MIN_RESOLUTION: usize = 32;
/// Largest analysis resolution the transform accepts.
pub const MAX_RESOLUTION: usize = 32768;

/// Check that `n` is an acceptable FFT size.
pub fn is_valid_resolution(n: usize) -> bool {
    n.is_power_of_two() && (MIN_RESOLUTION..=MAX_RESOLUTION).contains(&n)
}

/// Check that `s` is an acceptable smoothing constant.
pub fn is_valid_smoothing(s: f32) -> bool {
    (0.0..1.0).contains(&s)
}

/// Coarse genre categories that carry an analysis profile.
///
/// Category strings that match none of the authored keys classify as
/// [`GenreCategory::Unclassified`], which resolves to the neutral profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenreCategory {
    HipHop,
    Electronic,
    Rock,
    Jazz,
    Pop,
    African,
    Reggae,
    Metal,
    Unclassified,
}

impl GenreCategory {
    /// Every category with an authored profile.
    pub const PROFILED: [GenreCategory; 8] = [
        GenreCategory::HipHop,
        GenreCategory::Electronic,
        GenreCategory::Rock,
        GenreCategory::Jazz,
        GenreCategory::Pop,
        GenreCategory::African,
        GenreCategory::Reggae,
        GenreCategory::Metal,
    ];

    /// Exact-match classification of a category key.
    pub fn from_key(key: &str) -> Self {
        Self::PROFILED
            .into_iter()
            .find(|c| c.key() == Some(key))
            .unwrap_or(GenreCategory::Unclassified)
    }

    /// The authored key, or `None` for the unclassified variant.
    pub fn key(self) -> Option<&'static str> {
        match self {
            GenreCategory::HipHop => Some("Hip-hop"),
            GenreCategory::Electronic => Some("Electronic"),
            GenreCategory::Rock => Some("Rock"),
            GenreCategory::Jazz => Some("Jazz"),
            GenreCategory::Pop => Some("Pop"),
            GenreCategory::African => Some("African"),
            GenreCategory::Reggae => Some("Reggae"),
            GenreCategory::Metal => Some("Metal"),
            GenreCategory::Unclassified => None,
        }
    }

    pub fn profile(self) -> GenreAnalysisProfile {
        use GenreCategory::*;
        let (resolution, smoothing, accent, focus, label) = match self {
            HipHop => (1024, 0.85, 0x3b82f6, (30.0, 100.0), "SUB ENGINE"),
            Electronic => (512, 0.8, 0x06b6d4, (100.0, 300.0), "TRANS PUNCH"),
            Rock => (512, 0.8, 0xf97316, (2000.0, 5000.0), "GUITAR EDGE"),
            Jazz => (2048, 0.92, 0xeab308, (8000.0, 16000.0), "SPECTRAL AIR"),
            Pop => (512, 0.88, 0xec4899, (3000.0, 7000.0), "VOCAL FOCUS"),
            African => (1024, 0.85, 0x10b981, (400.0, 1200.0), "PERC RESONANCE"),
            Reggae => (1024, 0.9, 0xfacc15, (40.0, 120.0), "BASS FOUNDATION"),
            Metal => (512, 0.75, 0xef4444, (3000.0, 6000.0), "MID CUT"),
            Unclassified => return GenreAnalysisProfile::NEUTRAL,
        };
        GenreAnalysisProfile {
            resolution,
            smoothing,
            accent: Rgba::from_hex(accent),
            focus_range_hz: focus,
            focus_label: label,
        }
    }
}

/// The genre picked in the UI shell: a category plus one of its subgenres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedGenre {
    pub category: String,
    pub subgenre: String,
}

impl SelectedGenre {
    pub fn new(category: impl Into<String>, subgenre: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            subgenre: subgenre.into(),
        }
    }

    pub fn classify(&self) -> GenreCategory {
        GenreCategory::from_key(&self.category)
    }
}

/// Analyzer configuration and overlay styling for a genre category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenreAnalysisProfile {
    /// FFT size, a power of two.
    pub resolution: usize,
    /// Exponential averaging constant across frames, in `[0, 1)`.
    pub smoothing: f32,
    pub accent: Rgba,
    pub focus_range_hz: (f64, f64),
    pub focus_label: &'static str,
}

impl GenreAnalysisProfile {
    /// Used when no genre is selected or the category has no table entry.
    pub const NEUTRAL: GenreAnalysisProfile = GenreAnalysisProfile {
        resolution: 512,
        smoothing: 0.8,
        accent: Rgba::from_hex(0x3b82f6),
        focus_range_hz: (200.0, 2000.0),
        focus_label: "NEUTRAL PROFILE",
    };

    /// Build a profile, rejecting resolutions and smoothing values the
    /// analysis node cannot use.
    pub fn new(
        resolution: usize,
        smoothing: f32,
        accent: Rgba,
        focus_range_hz: (f64, f64),
        focus_label: &'static str,
    ) -> Result<Self, ProfileError> {
        if !is_valid_resolution(resolution) {
            return Err(ProfileError::InvalidResolution(resolution));
        }
        if !is_valid_smoothing(smoothing) {
            return Err(ProfileError::InvalidSmoothing(smoothing));
        }
        Ok(Self {
            resolution,
            smoothing,
            accent,
            focus_range_hz,
            focus_label,
        })
    }

    /// Number of magnitude bins a frame carries at this resolution.
    pub fn bin_count(&self) -> usize {
        self.resolution / 2
    }
}

/// Resolve the active profile. Never fails: a missing selection or an
/// unknown category both give [`GenreAnalysisProfile::NEUTRAL`].
pub fn profile_for(genre: Option<&SelectedGenre>) -> GenreAnalysisProfile {
    genre
        .map(|g| g.classify().profile())
        .unwrap_or(GenreAnalysisProfile::NEUTRAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hip_hop_profile_matches_table() {
        let p = profile_for(Some(&SelectedGenre::new("Hip-hop", "Trap")));
        assert_eq!(p.resolution, 1024);
        assert_eq!(p.smoothing, 0.85);
        assert_eq!(p.focus_range_hz, (30.0, 100.0));
        assert_eq!(p.focus_label, "SUB ENGINE");
    }

    #[test]
    fn missing_or_unknown_genre_is_neutral() {
        assert_eq!(profile_for(None), GenreAnalysisProfile::NEUTRAL);
        let blues = SelectedGenre::new("Blues", "Delta blues");
        assert_eq!(profile_for(Some(&blues)), GenreAnalysisProfile::NEUTRAL);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(GenreCategory::from_key("hip-hop"), GenreCategory::Unclassified);
        assert_eq!(GenreCategory::from_key("Hip-Hop"), GenreCategory::Unclassified);
        assert_eq!(GenreCategory::from_key("Hip-hop"), GenreCategory::HipHop);
    }

    #[test]
    fn authored_profiles_are_valid() {
        let all = GenreCategory::PROFILED
            .into_iter()
            .map(GenreCategory::profile)
            .chain(std::iter::once(GenreAnalysisProfile::NEUTRAL));
        for p in all {
            assert!(is_valid_resolution(p.resolution), "{}", p.focus_label);
            assert!(is_valid_smoothing(p.smoothing), "{}", p.focus_label);
            assert!(0.0 < p.focus_range_hz.0 && p.focus_range_hz.0 < p.focus_range_hz.1);
        }
    }

    #[test]
    fn keys_round_trip() {
        for c in GenreCategory::PROFILED {
            let key = c.key().unwrap();
            assert_eq!(GenreCategory::from_key(key), c);
        }
    }

    #[test]
    fn constructor_rejects_bad_parameters() {
        let accent = Rgba::WHITE;
        assert_eq!(
            GenreAnalysisProfile::new(1000, 0.5, accent, (1.0, 2.0), "x"),
            Err(ProfileError::InvalidResolution(1000))
        );
        assert_eq!(
            GenreAnalysisProfile::new(16, 0.5, accent, (1.0, 2.0), "x"),
            Err(ProfileError::InvalidResolution(16))
        );
        assert_eq!(
            GenreAnalysisProfile::new(65536, 0.5, accent, (1.0, 2.0), "x"),
            Err(ProfileError::InvalidResolution(65536))
        );
        assert_eq!(
            GenreAnalysisProfile::new(512, 1.0, accent, (1.0, 2.0), "x"),
            Err(ProfileError::InvalidSmoothing(1.0))
        );
        assert!(GenreAnalysisProfile::new(32, 0.0, accent, (1.0, 2.0), "x").is_ok());
    }
}
