//! Match tiers derived from a 0-100 score

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discrete compatibility label, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchTier {
    Baja,
    Media,
    Alta,
    Perfecta,
}

impl MatchTier {
    /// Every tier, best first.
    pub const ALL: [MatchTier; 4] = [
        MatchTier::Perfecta,
        MatchTier::Alta,
        MatchTier::Media,
        MatchTier::Baja,
    ];

    /// Lowest score that earns this tier.
    pub fn lower_bound(self) -> u8 {
        match self {
            MatchTier::Perfecta => 80,
            MatchTier::Alta => 60,
            MatchTier::Media => 30,
            MatchTier::Baja => 0,
        }
    }

    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => MatchTier::Perfecta,
            60..=79 => MatchTier::Alta,
            30..=59 => MatchTier::Media,
            _ => MatchTier::Baja,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchTier::Perfecta => "Perfecta",
            MatchTier::Alta => "Alta",
            MatchTier::Media => "Media",
            MatchTier::Baja => "Baja",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MatchTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "perfecta" => Ok(MatchTier::Perfecta),
            "alta" => Ok(MatchTier::Alta),
            "media" => Ok(MatchTier::Media),
            "baja" => Ok(MatchTier::Baja),
            _ => Err(format!(
                "Invalid tier: {}. Supported: perfecta, alta, media, baja",
                s
            )),
        }
    }
}
