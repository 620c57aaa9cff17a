use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four Key Result Areas an application is evaluated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kra {
    Kra1,
    Kra2,
    Kra3,
    Kra4,
}

impl Kra {
    pub const ALL: [Kra; 4] = [Kra::Kra1, Kra::Kra2, Kra::Kra3, Kra::Kra4];

    pub fn slug(&self) -> &'static str {
        match self {
            Kra::Kra1 => "kra1",
            Kra::Kra2 => "kra2",
            Kra::Kra3 => "kra3",
            Kra::Kra4 => "kra4",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Kra::Kra1 => "Instruction",
            Kra::Kra2 => "Research",
            Kra::Kra3 => "Extension",
            Kra::Kra4 => "Professional Development",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        match s {
            "kra1" => Some(Kra::Kra1),
            "kra2" => Some(Kra::Kra2),
            "kra3" => Some(Kra::Kra3),
            "kra4" => Some(Kra::Kra4),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            Kra::Kra1 => 0,
            Kra::Kra2 => 1,
            Kra::Kra3 => 2,
            Kra::Kra4 => 3,
        }
    }
}

impl fmt::Display for Kra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kra::Kra1 => write!(f, "KRA I: Instruction"),
            Kra::Kra2 => write!(f, "KRA II: Research"),
            Kra::Kra3 => write!(f, "KRA III: Extension"),
            Kra::Kra4 => write!(f, "KRA IV: Professional Development"),
        }
    }
}

/// A value per KRA. Missing entries deserialize as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KraTotals {
    pub kra1: f64,
    pub kra2: f64,
    pub kra3: f64,
    pub kra4: f64,
}

impl KraTotals {
    pub fn new(kra1: f64, kra2: f64, kra3: f64, kra4: f64) -> Self {
        KraTotals {
            kra1,
            kra2,
            kra3,
            kra4,
        }
    }

    pub fn get(&self, kra: Kra) -> f64 {
        self.as_array()[kra.index()]
    }

    pub fn set(&mut self, kra: Kra, value: f64) {
        match kra {
            Kra::Kra1 => self.kra1 = value,
            Kra::Kra2 => self.kra2 = value,
            Kra::Kra3 => self.kra3 = value,
            Kra::Kra4 => self.kra4 = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Kra, f64)> + '_ {
        Kra::ALL.into_iter().map(move |kra| (kra, self.get(kra)))
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    fn as_array(&self) -> [f64; 4] {
        [self.kra1, self.kra2, self.kra3, self.kra4]
    }
}

impl FromIterator<(Kra, f64)> for KraTotals {
    fn from_iter<I: IntoIterator<Item = (Kra, f64)>>(iter: I) -> Self {
        let mut totals = KraTotals::default();
        for (kra, value) in iter {
            totals.set(kra, value);
        }
        totals
    }
}
