//! Standings extraction from published matchday reports.
//!
//! Each division publishes one PDF per matchday, named `J<N> - <title>.pdf`.
//! This crate picks the newest report in a directory, pulls its text page by
//! page, and turns the table lines into typed [`StandingRow`]s.
//!
//! [`StandingRow`]: standings_shared::StandingRow

mod matchday;
mod pdf;
mod rows;

pub use matchday::{find_latest_pdf, parse_matchday, select_latest};
pub use pdf::{extract_pdf_pages, extract_pdf_rows};
pub use rows::{check_positions, extract_rows, extract_rows_from_pages};
