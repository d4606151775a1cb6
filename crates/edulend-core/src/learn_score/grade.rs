use serde::{Deserialize, Serialize};

/// Letter grade on the 8-band LearnScore scale.
///
/// Variants are declared lowest first, so `Ord` follows the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "F")]
    F,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

/// Descending lower bounds, inclusive.
const GRADE_CUTOFFS: [(u32, Grade); 7] = [
    (900, Grade::APlus),
    (800, Grade::A),
    (700, Grade::BPlus),
    (600, Grade::B),
    (500, Grade::CPlus),
    (400, Grade::C),
    (300, Grade::D),
];

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// Display color used by the dashboard badge.
    pub fn color(&self) -> &'static str {
        match self {
            Self::APlus => "#10b981",
            Self::A => "#22c55e",
            Self::BPlus => "#84cc16",
            Self::B => "#eab308",
            Self::CPlus => "#f59e0b",
            Self::C => "#f97316",
            Self::D => "#ef4444",
            Self::F => "#dc2626",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a total LearnScore to its letter grade. A score sitting exactly on a
/// cutoff takes the higher grade.
pub fn classify_grade(total: u32) -> Grade {
    GRADE_CUTOFFS
        .iter()
        .find(|(cutoff, _)| total >= *cutoff)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::F)
}
