//! PDF text extraction wrapper.
//!
//! Wraps the `pdf-extract` crate, which lays text out roughly as printed,
//! one string per page. Malformed or unusual PDFs can make it panic, so the
//! call is isolated and the panic surfaces as a [`StandingsError::Pdf`].

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, instrument};

use standings_shared::{Result, StandingRow, StandingsError};

use crate::rows::extract_rows_from_pages;

/// Extract the text of every page that has any, in document order.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn extract_pdf_pages(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| StandingsError::io(path, e))?;

    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    }))
    .map_err(|payload| StandingsError::pdf(path, panic_message(payload.as_ref())))?
    .map_err(|e| StandingsError::pdf(path, e.to_string()))?;

    let total = pages.len();
    let pages: Vec<String> = pages
        .into_iter()
        .filter(|text| !text.trim().is_empty())
        .collect();

    debug!(total, with_text = pages.len(), "extracted PDF text");
    Ok(pages)
}

/// Extract the standings rows of a report PDF.
pub fn extract_pdf_rows(path: &Path) -> Result<Vec<StandingRow>> {
    let pages = extract_pdf_pages(path)?;
    extract_rows_from_pages(pages.as_slice())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("text extraction panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("text extraction panicked: {s}")
    } else {
        "text extraction panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "standings-pdf-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn fixture_path(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/pdf")
            .join(name)
    }

    #[test]
    fn blank_pages_are_dropped() {
        let pages = extract_pdf_pages(&fixture_path("honor_j7.pdf")).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("CLUB FRONTENIS VALLADOLID A"));
    }

    #[test]
    fn rows_from_report_pdf() {
        let rows = extract_pdf_rows(&fixture_path("honor_j7.pdf")).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            StandingRow {
                position: 1,
                name: "CLUB FRONTENIS VALLADOLID A".into(),
                played: 7,
                won: 6,
                lost: 1,
                games_for: 13,
                games_against: 4,
                points_for: 412,
                points_against: 301,
                diff: 111,
                total: 19,
            }
        );
        assert_eq!(rows[1].name, "LEÓN");
        assert_eq!(rows[1].total, 16);
        assert_eq!(rows[2].name, "ÁVILA");
        assert_eq!(
            rows[3],
            StandingRow {
                position: 4,
                name: "ZAMORA".into(),
                played: 7,
                won: 0,
                lost: 7,
                games_for: 1,
                games_against: 14,
                points_for: 250,
                points_against: 361,
                diff: -111,
                total: 7,
            }
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = extract_pdf_pages(Path::new("/nonexistent/J1 - Clasificación.pdf")).unwrap_err();
        assert!(matches!(err, StandingsError::Io { .. }));
    }

    #[test]
    fn garbage_is_pdf_error() {
        let path = temp_file("J1 - Clasificación.pdf", b"this is not a pdf at all");
        let err = extract_pdf_pages(&path).unwrap_err();
        assert!(matches!(err, StandingsError::Pdf { .. }), "got {err}");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn panic_messages() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("bad xref");
        assert_eq!(panic_message(payload.as_ref()), "text extraction panicked: bad xref");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "text extraction panicked");
    }
}
