// src/knowledge/catalog.rs
//! Browsable genre catalog used by the selection UI.

/// A genre category with its subgenres and typical instrumentation.
#[derive(Debug, Clone, Copy)]
pub struct GenreEntry {
    pub name: &'static str,
    pub subgenres: &'static [&'static str],
    pub core_instruments: &'static [&'static str],
}

pub const GENRE_CATALOG: &[GenreEntry] = &[
    GenreEntry {
        name: "Blues",
        subgenres: &[
            "African blues",
            "Blues rock",
            "British blues",
            "Chicago blues",
            "Delta blues",
            "Electric blues",
            "Gospel blues",
            "Jump blues",
            "Louisiana blues",
            "Memphis blues",
            "Piedmont blues",
            "Punk blues",
            "Rhythm and blues",
            "Soul blues",
            "Texas blues",
            "West Coast blues",
        ],
        core_instruments: &[
            "Resonator Guitar",
            "Harmonica",
            "Piano",
            "Electric Guitar",
            "Double Bass",
            "Drums",
            "Brass Section",
        ],
    },
    GenreEntry {
        name: "Country",
        subgenres: &[
            "Alternative country",
            "Americana",
            "Bluegrass",
            "Bro-country",
            "Cajun",
            "Christian country",
            "Honky tonk",
            "Nashville sound",
            "Outlaw country",
            "Rockabilly",
            "Southern rock",
            "Texas country",
            "Western swing",
        ],
        core_instruments: &[
            "Acoustic Guitar",
            "Banjo",
            "Fiddle",
            "Steel Guitar",
            "Mandolin",
            "Upright Bass",
            "Snare Drum",
        ],
    },
    GenreEntry {
        name: "Electronic",
        subgenres: &[
            "Ambient",
            "Bass music",
            "Breakbeat",
            "Drum and bass",
            "Dub",
            "Electronic rock",
            "Electro",
            "Eurodance",
            "Hardcore",
            "House music",
            "Industrial",
            "IDM",
            "Techno",
            "Trance",
            "UK garage",
            "Synthwave",
            "Vaporwave",
        ],
        core_instruments: &[
            "Analog Synths",
            "Drum Machine (808/909)",
            "Sampler",
            "Wavetable Synth",
            "Sequencer",
            "Sub-bass",
        ],
    },
    GenreEntry {
        name: "Hip-hop",
        subgenres: &[
            "Boom bap",
            "Bounce",
            "Chopped and screwed",
            "Cloud rap",
            "Crunk",
            "Drill",
            "G-funk",
            "Hardcore hip-hop",
            "Lofi hip-hop",
            "Mumble rap",
            "Trap",
            "Phonk",
            "Plugg",
            "Rage",
            "Grime",
        ],
        core_instruments: &[
            "Sampler",
            "808 Kick",
            "Hi-hats",
            "Synthesizer",
            "Turntables",
            "Vocals/Rap",
        ],
    },
    GenreEntry {
        name: "Jazz",
        subgenres: &[
            "Acid jazz",
            "Bebop",
            "Bossa nova",
            "Cool jazz",
            "Dixieland",
            "Free jazz",
            "Gypsy jazz",
            "Hard bop",
            "Latin jazz",
            "Nu jazz",
            "Smooth jazz",
            "Swing",
            "Vocal jazz",
        ],
        core_instruments: &[
            "Saxophone",
            "Trumpet",
            "Double Bass",
            "Hollow-body Guitar",
            "Piano",
            "Ride Cymbal",
            "Brushed Snare",
        ],
    },
    GenreEntry {
        name: "Pop",
        subgenres: &[
            "Art pop",
            "Britpop",
            "Bubblegum pop",
            "Dance-pop",
            "Electropop",
            "Hyperpop",
            "Indie pop",
            "J-pop",
            "K-pop",
            "Synth-pop",
            "Teen pop",
        ],
        core_instruments: &[
            "Processed Vocals",
            "Polysynth",
            "Digital Drums",
            "Acoustic Guitar",
            "Electric Bass",
        ],
    },
    GenreEntry {
        name: "Rock",
        subgenres: &[
            "Alternative rock",
            "Grunge",
            "Indie rock",
            "Blues rock",
            "Garage rock",
            "Glam rock",
            "Hard rock",
            "Post-rock",
            "Progressive rock",
            "Psychedelic rock",
            "Surf rock",
        ],
        core_instruments: &[
            "Electric Guitar",
            "Bass Guitar",
            "Drum Kit",
            "Keyboards",
            "Vocals",
        ],
    },
    GenreEntry {
        name: "Metal",
        subgenres: &[
            "Black metal",
            "Death metal",
            "Doom metal",
            "Folk metal",
            "Grindcore",
            "Industrial metal",
            "Metalcore",
            "Power metal",
            "Progressive metal",
            "Sludge metal",
            "Thrash metal",
        ],
        core_instruments: &[
            "High-gain Guitar",
            "Double-kick Drums",
            "Distorted Bass",
            "Aggressive Vocals",
        ],
    },
    GenreEntry {
        name: "Punk",
        subgenres: &[
            "Anarcho punk",
            "Hardcore punk",
            "Horror punk",
            "Pop punk",
            "Post-punk",
            "Ska punk",
            "Skate punk",
        ],
        core_instruments: &["Distorted Guitar", "Fast Drums", "Bass", "Shouted Vocals"],
    },
    GenreEntry {
        name: "Reggae",
        subgenres: &[
            "Dancehall",
            "Dub",
            "Roots reggae",
            "Rocksteady",
            "Ska",
            "Reggaeton",
        ],
        core_instruments: &[
            "Bass (Low End)",
            "Electric Guitar (Skank)",
            "Percussion",
            "Horns",
            "Organ",
        ],
    },
    GenreEntry {
        name: "African",
        subgenres: &[
            "Afrobeat",
            "Afrobeats",
            "Amapiano",
            "Gqom",
            "Highlife",
            "Kuduro",
            "Soukous",
        ],
        core_instruments: &[
            "Djembe",
            "Talking Drum",
            "Kalimba",
            "Electric Guitar",
            "Shakers",
            "Log Drum (Amapiano)",
        ],
    },
];

/// Exact-match catalog lookup.
pub fn genre_entry(name: &str) -> Option<&'static GenreEntry> {
    GENRE_CATALOG.iter().find(|g| g.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::GenreCategory;

    #[test]
    fn every_profiled_category_is_in_the_catalog() {
        for c in GenreCategory::PROFILED {
            let key = c.key().unwrap();
            assert!(genre_entry(key).is_some(), "{key} missing from catalog");
        }
    }

    #[test]
    fn catalog_entries_have_subgenres() {
        assert!(GENRE_CATALOG.iter().all(|g| !g.subgenres.is_empty()));
    }

    #[test]
    fn unprofiled_catalog_entries_exist() {
        let unprofiled: Vec<_> = GENRE_CATALOG
            .iter()
            .filter(|g| GenreCategory::from_key(g.name) == GenreCategory::Unclassified)
            .map(|g| g.name)
            .collect();
        assert_eq!(unprofiled, ["Blues", "Country", "Punk"]);
    }
}
