//! Standings row extraction from laid-out report text.
//!
//! Report tables come out of text extraction as one line per team:
//! position, team name in capitals, then nine counters (the differential
//! may be negative). A single positional pattern picks those lines out of
//! the surrounding headings and notes.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use standings_shared::{Result, StandingRow, StandingsError};

static ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d+)\s+([A-ZÁÉÍÓÚÑ\s]+)\s+(\d+)\s+(\d+)\s+(\d+)\s+(\d+)\s+(\d+)\s+(\d+)\s+(\d+)\s+([-]?\d+)\s+(\d+)",
    )
    .expect("valid regex")
});

/// Extract every standings row found in one page of text, in order.
pub fn extract_rows(text: &str) -> Result<Vec<StandingRow>> {
    let rows = ROW_RE
        .captures_iter(text)
        .map(|caps| row_from_captures(&caps))
        .collect::<Result<Vec<_>>>()?;

    debug!(rows = rows.len(), "extracted rows from page");
    Ok(rows)
}

/// Extract rows from every page of a document, concatenated in page order.
pub fn extract_rows_from_pages<S: AsRef<str>>(pages: &[S]) -> Result<Vec<StandingRow>> {
    let mut rows = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        let page_rows = extract_rows(page.as_ref()).map_err(|e| match e {
            StandingsError::Parse { message } => {
                StandingsError::parse(format!("page {}: {message}", i + 1))
            }
            other => other,
        })?;
        rows.extend(page_rows);
    }
    Ok(rows)
}

/// Check that positions run 1, 2, 3, ... without gaps.
///
/// Returns `false` (and logs the first offending row) when they don't; callers
/// still render such tables, the check only surfaces suspicious extractions.
pub fn check_positions(rows: &[StandingRow]) -> bool {
    for (i, row) in rows.iter().enumerate() {
        let expected = i as u32 + 1;
        if row.position != expected {
            warn!(
                expected,
                found = row.position,
                team = %row.name,
                "positions are not a dense ranking"
            );
            return false;
        }
    }
    true
}

fn row_from_captures(caps: &Captures<'_>) -> Result<StandingRow> {
    Ok(StandingRow {
        position: field(caps, 1, "position")?,
        name: caps[2].trim().to_string(),
        played: field(caps, 3, "played")?,
        won: field(caps, 4, "won")?,
        lost: field(caps, 5, "lost")?,
        games_for: field(caps, 6, "games for")?,
        games_against: field(caps, 7, "games against")?,
        points_for: field(caps, 8, "points for")?,
        points_against: field(caps, 9, "points against")?,
        diff: field(caps, 10, "difference")?,
        total: field(caps, 11, "points")?,
    })
}

fn field<T: FromStr>(caps: &Captures<'_>, index: usize, label: &str) -> Result<T> {
    let raw = &caps[index];
    raw.parse().map_err(|_| {
        StandingsError::parse(format!("{label} '{raw}' is not a valid number"))
    })
}
