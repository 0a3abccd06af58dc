//! Pevná schéma stĺpcov dátového súboru o skupinách slnečných škvŕn.
//!
//! Súbor má po hlavičke 13 polí na riadok: tri písmenové kódy, sedem malých
//! celočíselných atribútov a tri počty erupcií (C, M, X) v nasledujúcich 24 hodinách.
//! Pri zmene poradia alebo obsahu stĺpcov treba zvýšiť [`SCHEMA_VERSION`].

use serde::Serialize;
use std::ops::RangeInclusive;

pub const SCHEMA_VERSION: u32 = 1;

/// Počet polí v jednom dátovom riadku
pub const FIELD_COUNT: usize = 13;

/// Písmenom kódovaný stĺpec s povolenými hodnotami
#[derive(Debug, Clone, Copy)]
pub struct CategoricalColumn {
    pub name: &'static str,
    pub allowed: &'static [char],
}

/// Celočíselný ordinálny/binárny stĺpec
#[derive(Debug, Clone)]
pub struct OrdinalColumn {
    pub name: &'static str,
    pub allowed: RangeInclusive<u8>,
}

pub const CATEGORICAL_COLUMNS: [CategoricalColumn; 3] = [
    CategoricalColumn {
        name: "zurich_class",
        allowed: &['A', 'B', 'C', 'D', 'E', 'F', 'H'],
    },
    CategoricalColumn {
        name: "largest_spot_size",
        allowed: &['X', 'R', 'S', 'A', 'H', 'K'],
    },
    CategoricalColumn {
        name: "spot_distribution",
        allowed: &['X', 'O', 'I', 'C'],
    },
];

pub const ORDINAL_COLUMNS: [OrdinalColumn; 7] = [
    OrdinalColumn { name: "activity", allowed: 1..=2 },
    OrdinalColumn { name: "evolution", allowed: 1..=3 },
    OrdinalColumn { name: "previous_activity", allowed: 1..=3 },
    OrdinalColumn { name: "historically_complex", allowed: 1..=2 },
    OrdinalColumn { name: "became_complex", allowed: 1..=2 },
    OrdinalColumn { name: "area", allowed: 1..=2 },
    OrdinalColumn { name: "largest_spot_area", allowed: 1..=2 },
];

pub const TARGET_COLUMNS: [&str; 3] = ["c_class", "m_class", "x_class"];

/// Jedno pozorovanie: prediktory a počty erupcií v nasledujúcich 24 hodinách
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlareRecord {
    pub zurich_class: char,
    pub largest_spot_size: char,
    pub spot_distribution: char,
    pub activity: u8,
    pub evolution: u8,
    pub previous_activity: u8,
    pub historically_complex: u8,
    pub became_complex: u8,
    pub area: u8,
    pub largest_spot_area: u8,
    pub c_class: u32,
    pub m_class: u32,
    pub x_class: u32,
}

impl FlareRecord {
    /// Písmenové kódy v poradí [`CATEGORICAL_COLUMNS`]
    pub fn categorical(&self) -> [char; 3] {
        [self.zurich_class, self.largest_spot_size, self.spot_distribution]
    }

    /// Celočíselné atribúty v poradí [`ORDINAL_COLUMNS`]
    pub fn ordinal(&self) -> [u8; 7] {
        [
            self.activity,
            self.evolution,
            self.previous_activity,
            self.historically_complex,
            self.became_complex,
            self.area,
            self.largest_spot_area,
        ]
    }

    /// Počty erupcií C, M, X
    pub fn counts(&self) -> [u32; 3] {
        [self.c_class, self.m_class, self.x_class]
    }
}

/// Názvy všetkých stĺpcov v poradí súboru
pub fn column_names() -> Vec<&'static str> {
    CATEGORICAL_COLUMNS
        .iter()
        .map(|c| c.name)
        .chain(ORDINAL_COLUMNS.iter().map(|c| c.name))
        .chain(TARGET_COLUMNS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_matches_field_count() {
        assert_eq!(column_names().len(), FIELD_COUNT);
    }
}
