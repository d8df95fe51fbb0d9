//! End-to-end generation: latest report → rows → HTML page, per division.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{error, info, instrument, warn};

use standings_extract::{check_positions, extract_pdf_pages, extract_rows_from_pages, find_latest_pdf};
use standings_render::{BadgeResolver, RenderOptions, render_standings};
use standings_shared::{AppConfig, Division, Result, SiteConfig, Standings, StandingsError};

use crate::writer::{WriteStatus, write_page};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Per-division settings for a run.
#[derive(Debug, Clone)]
pub struct DivisionSettings {
    pub division: Division,
    /// Name shown in the page heading.
    pub display_name: String,
    /// Bottom positions highlighted as relegation places.
    pub relegation_slots: usize,
}

/// Configuration for [`generate_all`].
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Root holding `<division>/J<N> - *.pdf` reports.
    pub docs_dir: PathBuf,
    /// Badge image directory (also the prefix of badge links).
    pub img_dir: String,
    /// Placeholder badge file name.
    pub default_badge: String,
    /// Where pages are written.
    pub output_dir: PathBuf,
    /// Page texts and asset links.
    pub site: SiteConfig,
    /// Divisions to process, in order.
    pub divisions: Vec<DivisionSettings>,
}

impl From<&AppConfig> for GenerateConfig {
    fn from(config: &AppConfig) -> Self {
        let divisions = Division::ALL
            .iter()
            .map(|&division| {
                let entry = config.divisions.get(division);
                DivisionSettings {
                    division,
                    display_name: entry
                        .display_name
                        .clone()
                        .unwrap_or_else(|| division.display_name().to_string()),
                    relegation_slots: entry.relegation_slots,
                }
            })
            .collect();

        Self {
            docs_dir: PathBuf::from(&config.paths.docs_dir),
            img_dir: config.paths.img_dir.clone(),
            default_badge: config.paths.default_badge.clone(),
            output_dir: PathBuf::from(&config.paths.output_dir),
            site: config.site.clone(),
            divisions,
        }
    }
}

impl GenerateConfig {
    /// Keep only the listed divisions. An empty list keeps all of them.
    pub fn only(mut self, divisions: &[Division]) -> Self {
        if !divisions.is_empty() {
            self.divisions.retain(|s| divisions.contains(&s.division));
        }
        self
    }

    /// Output page path for a division.
    pub fn output_path(&self, division: Division) -> PathBuf {
        self.output_dir.join(division.output_file_name())
    }
}

// ---------------------------------------------------------------------------
// Page source
// ---------------------------------------------------------------------------

/// Turns a report file into per-page text.
pub trait PageSource {
    fn pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// Reads report PDFs with `pdf-extract`.
pub struct PdfPages;

impl PageSource for PdfPages {
    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        extract_pdf_pages(path)
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of one division.
#[derive(Debug, Clone)]
pub enum DivisionOutcome {
    /// The page was written (new or changed).
    Written {
        path: PathBuf,
        matchday: u32,
        teams: usize,
    },
    /// The page already held identical content.
    Unchanged {
        path: PathBuf,
        matchday: u32,
        teams: usize,
    },
    /// No report to process.
    Skipped { reason: String },
    /// Processing failed; the error was logged and swallowed.
    Failed { error: String },
}

/// A division paired with its outcome.
#[derive(Debug, Clone)]
pub struct DivisionReport {
    pub division: Division,
    pub outcome: DivisionOutcome,
}

/// Result of [`generate_all`].
#[derive(Debug)]
pub struct GenerateReport {
    pub divisions: Vec<DivisionReport>,
    pub elapsed: std::time::Duration,
}

impl GenerateReport {
    /// Number of divisions whose processing failed.
    pub fn failed(&self) -> usize {
        self.divisions
            .iter()
            .filter(|r| matches!(r.outcome, DivisionOutcome::Failed { .. }))
            .count()
    }
}

/// Progress callback for reporting run status.
pub trait ProgressReporter: Send + Sync {
    /// Called when a division starts.
    fn phase(&self, name: &str);
    /// Called after each division, whatever its outcome.
    fn division_done(&self, report: &DivisionReport);
    /// Called when the run completes.
    fn done(&self, report: &GenerateReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn division_done(&self, _report: &DivisionReport) {}
    fn done(&self, _report: &GenerateReport) {}
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Generate the page of every configured division, one after the other.
///
/// A division without a report is skipped; any other error is logged and
/// recorded as a failure, and the remaining divisions still run.
#[instrument(skip_all, fields(divisions = config.divisions.len()))]
pub fn generate_all(
    config: &GenerateConfig,
    source: &dyn PageSource,
    progress: &dyn ProgressReporter,
) -> GenerateReport {
    let start = Instant::now();
    let mut reports = Vec::with_capacity(config.divisions.len());

    for settings in &config.divisions {
        let division = settings.division;
        progress.phase(&format!("Generating {}", settings.display_name));

        let outcome = match generate_division(config, settings, source) {
            Ok(outcome) => outcome,
            Err(StandingsError::NoMatchdayFile { dir, .. }) => {
                warn!(%division, dir = %dir.display(), "no matchday PDF found, skipping division");
                DivisionOutcome::Skipped {
                    reason: format!("no matchday PDF in {}", dir.display()),
                }
            }
            Err(e) => {
                error!(%division, error = %e, "division failed");
                DivisionOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        let report = DivisionReport { division, outcome };
        progress.division_done(&report);
        reports.push(report);
    }

    let report = GenerateReport {
        divisions: reports,
        elapsed: start.elapsed(),
    };
    info!(
        failed = report.failed(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "generation complete"
    );
    progress.done(&report);
    report
}

/// Generate one division's page from its newest report.
#[instrument(skip_all, fields(division = %settings.division))]
pub fn generate_division(
    config: &GenerateConfig,
    settings: &DivisionSettings,
    source: &dyn PageSource,
) -> Result<DivisionOutcome> {
    let division = settings.division;
    let dir = config.docs_dir.join(division.slug());

    let latest = if dir.is_dir() {
        find_latest_pdf(&dir)?
    } else {
        None
    };
    let Some(file) = latest else {
        return Err(StandingsError::NoMatchdayFile { division, dir });
    };

    info!(matchday = file.number, file = %file.file_name, "processing report");

    let pages = source.pages(&file.path)?;
    let rows = extract_rows_from_pages(pages.as_slice())?;
    if rows.is_empty() {
        return Err(StandingsError::validation(format!(
            "no standings rows found in {}",
            file.file_name
        )));
    }
    check_positions(&rows);

    let standings = Standings {
        division,
        matchday: file.number,
        rows,
    };
    let teams = standings.rows.len();

    let opts = RenderOptions::from_site(
        &config.site,
        settings.display_name.clone(),
        settings.relegation_slots,
    );
    let badges = BadgeResolver::new(config.img_dir.clone(), config.default_badge.clone());
    let html = render_standings(&standings, &opts, &badges)?;

    let path = config.output_path(division);
    let matchday = standings.matchday;
    let outcome = match write_page(&path, &html)? {
        WriteStatus::Written => {
            info!(path = %path.display(), matchday, teams, "standings page written");
            DivisionOutcome::Written {
                path,
                matchday,
                teams,
            }
        }
        WriteStatus::Unchanged => {
            info!(path = %path.display(), matchday, "standings page unchanged");
            DivisionOutcome::Unchanged {
                path,
                matchday,
                teams,
            }
        }
    };

    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
