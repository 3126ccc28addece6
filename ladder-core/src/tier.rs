//! The fixed 6-tier progression chain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the six ordered progression tiers.
///
/// Automated promotion only ever moves one tier forward; `Legend` is
/// terminal. Only a manual override may move backward or skip tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Novice,
    Apprentice,
    Analyst,
    Forecaster,
    Oracle,
    Legend,
}

impl Tier {
    /// All tiers in ladder order, lowest first.
    pub const ORDERED: [Tier; 6] = [
        Tier::Novice,
        Tier::Apprentice,
        Tier::Analyst,
        Tier::Forecaster,
        Tier::Oracle,
        Tier::Legend,
    ];

    /// The tier assigned at signup.
    pub const fn lowest() -> Tier {
        Tier::Novice
    }

    /// Zero-based position in the chain.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The next tier up, or `None` for the terminal tier.
    pub fn next(self) -> Option<Tier> {
        Self::ORDERED.get(self.index() + 1).copied()
    }

    /// Whether this is the terminal tier.
    pub fn is_terminal(self) -> bool {
        self == Tier::Legend
    }

    /// Stable string form used in storage and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Novice => "novice",
            Tier::Apprentice => "apprentice",
            Tier::Analyst => "analyst",
            Tier::Forecaster => "forecaster",
            Tier::Oracle => "oracle",
            Tier::Legend => "legend",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "novice" => Ok(Tier::Novice),
            "apprentice" => Ok(Tier::Apprentice),
            "analyst" => Ok(Tier::Analyst),
            "forecaster" => Ok(Tier::Forecaster),
            "oracle" => Ok(Tier::Oracle),
            "legend" => Ok(Tier::Legend),
            other => Err(format!("unknown tier: {other}")),
        }
    }
}
