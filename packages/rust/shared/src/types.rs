//! Core domain types for league standings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StandingsError;

// ---------------------------------------------------------------------------
// Division
// ---------------------------------------------------------------------------

/// A league tier. Each division has its own report directory, output page,
/// and relegation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Division {
    /// División de Honor, the top tier.
    Honor,
    /// Primera División.
    Primera,
}

impl Division {
    /// Every division, in processing order.
    pub const ALL: [Division; 2] = [Division::Primera, Division::Honor];

    /// Directory and file-name slug (`honor`, `primera`).
    pub fn slug(self) -> &'static str {
        match self {
            Division::Honor => "honor",
            Division::Primera => "primera",
        }
    }

    /// Human-readable name used in page headers.
    pub fn display_name(self) -> &'static str {
        match self {
            Division::Honor => "División de Honor",
            Division::Primera => "Primera División",
        }
    }

    /// File name of the generated page (e.g., `honor_standings_last.html`).
    pub fn output_file_name(self) -> String {
        format!("{}_standings_last.html", self.slug())
    }

    /// Number of bottom positions marked for relegation by default.
    pub fn default_relegation_slots(self) -> usize {
        match self {
            Division::Honor => 2,
            Division::Primera => 0,
        }
    }
}

impl std::fmt::Display for Division {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Division {
    type Err = StandingsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "honor" => Ok(Division::Honor),
            "primera" => Ok(Division::Primera),
            other => Err(StandingsError::validation(format!(
                "unknown division '{other}': expected 'honor' or 'primera'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// StandingRow
// ---------------------------------------------------------------------------

/// One team's line in a standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    /// Rank within the division.
    pub position: u32,
    /// Team name as printed in the report (uppercase, may carry accents).
    pub name: String,
    /// Matches played (PJ).
    pub played: u32,
    /// Matches won (PG).
    pub won: u32,
    /// Matches lost (PP).
    pub lost: u32,
    /// Games for (JF).
    pub games_for: u32,
    /// Games against (JC).
    pub games_against: u32,
    /// Points scored (TF).
    pub points_for: u32,
    /// Points conceded (TC).
    pub points_against: u32,
    /// Point differential (Dif), may be negative.
    pub diff: i32,
    /// League points (Puntos).
    pub total: u32,
}

impl StandingRow {
    /// Team name for display: a trailing `" A"` team marker is dropped.
    pub fn display_name(&self) -> &str {
        self.name.strip_suffix(" A").unwrap_or(&self.name)
    }

    /// Whether this row sits in the bottom `slots` positions of a table
    /// with `team_count` teams.
    pub fn is_relegated(&self, team_count: usize, slots: usize) -> bool {
        if slots == 0 {
            return false;
        }
        self.position as usize > team_count.saturating_sub(slots)
    }
}

// ---------------------------------------------------------------------------
// MatchdayFile / Standings
// ---------------------------------------------------------------------------

/// A report file selected for a division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchdayFile {
    /// Matchday (jornada) number embedded in the file name.
    pub number: u32,
    /// Bare file name, e.g. `J7 - Clasificación.pdf`.
    pub file_name: String,
    /// Full path to the file.
    pub path: PathBuf,
}

/// A division's table for one matchday.
#[derive(Debug, Clone)]
pub struct Standings {
    pub division: Division,
    pub matchday: u32,
    pub rows: Vec<StandingRow>,
}
