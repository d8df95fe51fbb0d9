//! Latest-matchday report selection.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use standings_shared::{MatchdayFile, Result, StandingsError};

/// Report file names: `J<number> - <anything>.pdf`.
static MATCHDAY_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^J(\d+) - .+\.pdf$").expect("valid regex"));

/// Matchday number embedded in a report file name, if the name qualifies.
pub fn parse_matchday(file_name: &str) -> Option<u32> {
    let caps = MATCHDAY_FILE_RE.captures(file_name)?;
    match caps[1].parse() {
        Ok(number) => Some(number),
        Err(_) => {
            debug!(file = file_name, "matchday number out of range, ignoring report");
            None
        }
    }
}

/// Pick the report with the highest matchday number.
///
/// Names that do not follow the report pattern are ignored. When two reports
/// carry the same number, the lexicographically smallest name wins so that
/// reruns are stable.
pub fn select_latest<'a, I>(names: I) -> Option<(u32, &'a str)>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .filter_map(|name| parse_matchday(name).map(|n| (n, name)))
        .max_by(|(na, a), (nb, b)| na.cmp(nb).then_with(|| b.cmp(a)))
}

/// Find the newest matchday report in `dir`.
///
/// Returns `Ok(None)` when the directory exists but holds no report.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn find_latest_pdf(dir: &Path) -> Result<Option<MatchdayFile>> {
    let entries = std::fs::read_dir(dir).map_err(|e| StandingsError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StandingsError::io(dir, e))?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!(name = ?raw, "skipping non UTF-8 file name"),
        }
    }

    let latest = select_latest(names.iter().map(String::as_str)).map(|(number, name)| {
        MatchdayFile {
            number,
            file_name: name.to_string(),
            path: dir.join(name),
        }
    });

    match &latest {
        Some(file) => debug!(matchday = file.number, file = %file.file_name, "latest report"),
        None => debug!(candidates = names.len(), "no matchday report found"),
    }

    Ok(latest)
}
