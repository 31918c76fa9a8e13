//! # Note Table & Transposer
//!
//! The twelve chromatic pitch classes in two parallel naming systems:
//!
//! | Index | Latin | American |
//! |-------|-------|----------|
//! | 0     | Do    | C        |
//! | 1     | Do#   | C#       |
//! | 2     | Re    | D        |
//! | 3     | Re#   | D#       |
//! | 4     | Mi    | E        |
//! | 5     | Fa    | F        |
//! | 6     | Fa#   | F#       |
//! | 7     | Sol   | G        |
//! | 8     | Sol#  | G#       |
//! | 9     | La    | A        |
//! | 10    | La#   | A#       |
//! | 11    | Si    | B        |
//!
//! Both tables are cyclic with period 12. Output is always sharp-spelled:
//! the five flats with a sharp twin (`Db Eb Gb Ab Bb`) are canonicalized
//! before lookup, and no flat spelling is ever produced.
//!
//! ## Example
//! ```rust
//! use chordsheet::transpose;
//!
//! assert_eq!(transpose("Do", 2), "Re");
//! assert_eq!(transpose("Do", -1), "Si");
//! assert_eq!(transpose("Bb", 1), "B");
//! assert_eq!(transpose("H", 3), "H"); // unknown names pass through
//! ```

use serde::Serialize;

pub const LATIN_NAMES: [&str; 12] = [
    "Do", "Do#", "Re", "Re#", "Mi", "Fa", "Fa#", "Sol", "Sol#", "La", "La#", "Si",
];

pub const AMERICAN_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Note naming convention of a root spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingSystem {
    /// Do, Re, Mi ...
    Latin,
    /// C, D, E ...
    American,
}

impl NamingSystem {
    fn table(self) -> &'static [&'static str; 12] {
        match self {
            NamingSystem::Latin => &LATIN_NAMES,
            NamingSystem::American => &AMERICAN_NAMES,
        }
    }
}

/// A pitch class, 0 = Do/C through 11 = Si/B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Build from any integer, wrapping into 0..12
    pub fn new(index: i32) -> Self {
        PitchClass(index.rem_euclid(12) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Look a name up in both tables, after flat canonicalization.
    ///
    /// The tables share no spelling, so the lookup order does not matter.
    pub fn from_name(name: &str) -> Option<(PitchClass, NamingSystem)> {
        let name = canonicalize_flat(name);
        [NamingSystem::American, NamingSystem::Latin]
            .into_iter()
            .find_map(|system| {
                system
                    .table()
                    .iter()
                    .position(|&n| n == name)
                    .map(|idx| (PitchClass(idx as u8), system))
            })
    }

    pub fn name(self, system: NamingSystem) -> &'static str {
        system.table()[self.0 as usize]
    }

    /// Shift by a signed number of semitones (floored modulo)
    pub fn transpose(self, semitones: i32) -> PitchClass {
        PitchClass::new(self.0 as i32 + semitones.rem_euclid(12))
    }
}

/// Map the five flats that have a distinct sharp spelling to that spelling.
///
/// Anything else, including `Cb`, `Fb` and Latin names, is returned unchanged.
pub fn canonicalize_flat(name: &str) -> &str {
    match name {
        "Db" => "C#",
        "Eb" => "D#",
        "Gb" => "F#",
        "Ab" => "G#",
        "Bb" => "A#",
        other => other,
    }
}

/// Transpose a pitch-class name by `semitones`, keeping its naming system.
///
/// Names found in neither table are returned as given.
pub fn transpose(name: &str, semitones: i32) -> &str {
    match PitchClass::from_name(name) {
        Some((pitch, system)) => pitch.transpose(semitones).name(system),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_names() -> impl Iterator<Item = &'static str> {
        LATIN_NAMES.iter().chain(AMERICAN_NAMES.iter()).copied()
    }

    #[test]
    fn test_tables_are_parallel() {
        for (latin, american) in LATIN_NAMES.iter().zip(AMERICAN_NAMES.iter()) {
            let (a, _) = PitchClass::from_name(latin).unwrap();
            let (b, _) = PitchClass::from_name(american).unwrap();
            assert_eq!(a, b, "{} and {} should be the same pitch class", latin, american);
        }
    }

    #[test]
    fn test_transpose_up() {
        assert_eq!(transpose("Do", 2), "Re");
        assert_eq!(transpose("C", 4), "E");
        assert_eq!(transpose("La", 2), "Si");
        assert_eq!(transpose("Si", 1), "Do");
        assert_eq!(transpose("G#", 5), "C#");
    }

    #[test]
    fn test_transpose_negative_wraps() {
        assert_eq!(transpose("Do", -1), "Si");
        assert_eq!(transpose("C", -1), "B");
        assert_eq!(transpose("Re", -14), "Do");
        assert_eq!(transpose("A", -6), "D#");
    }

    #[test]
    fn test_identity_at_zero() {
        for name in all_names() {
            assert_eq!(transpose(name, 0), name);
        }
    }

    #[test]
    fn test_periodicity_and_inverse() {
        for name in all_names() {
            for n in -25..=25 {
                assert_eq!(transpose(name, n), transpose(name, n + 12));
                assert_eq!(transpose(transpose(name, n), -n), name);
            }
        }
    }

    #[test]
    fn test_naming_system_closure() {
        for n in -12..=12 {
            for name in LATIN_NAMES {
                assert!(LATIN_NAMES.contains(&transpose(name, n)));
            }
            for name in AMERICAN_NAMES {
                assert!(AMERICAN_NAMES.contains(&transpose(name, n)));
            }
        }
    }

    #[test]
    fn test_flats_canonicalize() {
        for (flat, sharp) in [("Db", "C#"), ("Eb", "D#"), ("Gb", "F#"), ("Ab", "G#"), ("Bb", "A#")] {
            assert_eq!(canonicalize_flat(flat), sharp);
            for n in -12..=12 {
                assert_eq!(transpose(flat, n), transpose(sharp, n));
            }
        }
        // Zero shift still resolves through the table, so the sharp spelling comes back
        assert_eq!(transpose("Bb", 0), "A#");
    }

    #[test]
    fn test_unrecognized_passes_through() {
        assert_eq!(transpose("H", 3), "H");
        assert_eq!(transpose("Cb", 2), "Cb");
        assert_eq!(transpose("do", 2), "do");
        assert_eq!(transpose("", 5), "");
    }

    #[test]
    fn test_pitch_class_new_wraps() {
        assert_eq!(PitchClass::new(-1).index(), 11);
        assert_eq!(PitchClass::new(12).index(), 0);
        // 4 + 7, no overflow at the extremes
        assert_eq!(PitchClass::new(i32::MIN).transpose(i32::MAX).index(), 11);
    }
}
