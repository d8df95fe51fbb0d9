//! HTML rendering of division standings.
//!
//! Produces one self-contained static page per division: league heading,
//! the table with a badge per team, and a toggle that reveals the detailed
//! columns (the page script flips the `hidden` class on those cells).

mod badge;

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use tracing::{debug, instrument};

use standings_shared::{Result, SiteConfig, Standings, StandingsError};

pub use badge::{BadgeResolver, badge_stem};

/// Row class for relegation positions.
const DESCENT_CLASS: &str = "descent";

/// Stat columns after the team name: label, tooltip, hidden in compact view.
const STAT_COLUMNS: [(&str, Option<&str>, bool); 9] = [
    ("PJ", Some("Partidos Jugados"), false),
    ("PG", Some("Partidos Ganados"), false),
    ("PP", Some("Partidos Perdidos"), false),
    ("JF", Some("Juegos a Favor"), true),
    ("JC", Some("Juegos en Contra"), true),
    ("TF", Some("Tantos a Favor"), true),
    ("TC", Some("Tantos en Contra"), true),
    ("Dif", Some("Diferencia de tantos"), true),
    ("Puntos", None, false),
];

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Everything the page needs besides the table itself.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Browser `<title>`.
    pub page_title: String,
    /// Heading above the division title.
    pub league_title: String,
    /// Division name shown in the `<h1>`.
    pub division_name: String,
    /// Stylesheet href.
    pub stylesheet: String,
    /// Script src.
    pub script: String,
    /// Badge width in pixels.
    pub badge_width: u32,
    /// Bottom positions highlighted as relegation places.
    pub relegation_slots: usize,
}

impl RenderOptions {
    /// Build options from the `[site]` config plus division specifics.
    pub fn from_site(
        site: &SiteConfig,
        division_name: impl Into<String>,
        relegation_slots: usize,
    ) -> Self {
        Self {
            page_title: site.page_title.clone(),
            league_title: site.league_title.clone(),
            division_name: division_name.into(),
            stylesheet: site.stylesheet.clone(),
            script: site.script.clone(),
            badge_width: site.badge_width,
            relegation_slots,
        }
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Render a division's standings page.
#[instrument(skip_all, fields(division = %standings.division, matchday = standings.matchday))]
pub fn render_standings(
    standings: &Standings,
    opts: &RenderOptions,
    badges: &BadgeResolver,
) -> Result<String> {
    let mut html = String::with_capacity(4096 + standings.rows.len() * 768);
    write_document(&mut html, standings, opts, badges)
        .map_err(|e| StandingsError::Render(format!("failed to format page: {e}")))?;

    debug!(bytes = html.len(), rows = standings.rows.len(), "rendered page");
    Ok(html)
}

fn write_document(
    out: &mut String,
    standings: &Standings,
    opts: &RenderOptions,
    badges: &BadgeResolver,
) -> std::fmt::Result {
    write_head(out, standings, opts)?;

    let team_count = standings.rows.len();
    for row in &standings.rows {
        // Badge lookup keys on the full printed name, including any " A".
        let badge = badges.resolve(&row.name);
        let name = row.display_name();

        if row.is_relegated(team_count, opts.relegation_slots) {
            writeln!(out, "                <tr class=\"{DESCENT_CLASS}\">")?;
        } else {
            writeln!(out, "                <tr>")?;
        }
        writeln!(out, "                    <td>{}</td>", row.position)?;
        writeln!(
            out,
            "                    <td><img src=\"{}\" alt=\"Escudo {}\" width=\"{}\"></td>",
            attr(&badge),
            attr(name),
            opts.badge_width
        )?;
        writeln!(out, "                    <td>{}</td>", text(name))?;

        let values = [
            row.played.to_string(),
            row.won.to_string(),
            row.lost.to_string(),
            row.games_for.to_string(),
            row.games_against.to_string(),
            row.points_for.to_string(),
            row.points_against.to_string(),
            row.diff.to_string(),
            row.total.to_string(),
        ];
        for ((_, _, hidden), value) in STAT_COLUMNS.iter().zip(values) {
            if *hidden {
                writeln!(out, "                    <td class=\"hidden\">{value}</td>")?;
            } else {
                writeln!(out, "                    <td>{value}</td>")?;
            }
        }
        writeln!(out, "                </tr>")?;
    }

    write_tail(out, opts)
}

fn write_head(out: &mut String, standings: &Standings, opts: &RenderOptions) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"es\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "    <meta charset=\"UTF-8\">")?;
    writeln!(
        out,
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(out, "    <title>{}</title>", text(&opts.page_title))?;
    writeln!(out, "    <link rel=\"stylesheet\" href=\"{}\">", attr(&opts.stylesheet))?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "    <div class=\"container\">")?;
    writeln!(out, "        <div class=\"header\">")?;
    writeln!(out, "            <h2>{}</h2>", text(&opts.league_title))?;
    writeln!(
        out,
        "            <h1>Clasificación {} | Jornada {}</h1>",
        text(&opts.division_name),
        standings.matchday
    )?;
    writeln!(out, "        </div>")?;
    writeln!(out, "        <table>")?;
    writeln!(out, "            <thead>")?;
    writeln!(out, "                <tr>")?;
    writeln!(out, "                    <th></th>")?;
    writeln!(out, "                    <th></th>")?;
    writeln!(out, "                    <th>Equipo</th>")?;
    for (label, tooltip, hidden) in STAT_COLUMNS {
        out.push_str("                    <th");
        if hidden {
            out.push_str(" class=\"hidden\"");
        }
        if let Some(tip) = tooltip {
            write!(out, " data-tooltip=\"{tip}\"")?;
        }
        writeln!(out, ">{label}</th>")?;
    }
    writeln!(out, "                </tr>")?;
    writeln!(out, "            </thead>")?;
    writeln!(out, "            <tbody>")
}

fn write_tail(out: &mut String, opts: &RenderOptions) -> std::fmt::Result {
    writeln!(out, "            </tbody>")?;
    writeln!(out, "        </table>")?;
    writeln!(out, "        <div class=\"toggle-container\">")?;
    writeln!(out, "            <button id=\"toggleView\">Ver Detalles</button>")?;
    writeln!(out, "        </div>")?;
    writeln!(out, "    </div>")?;
    writeln!(out, "    <script src=\"{}\"></script>", attr(&opts.script))?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};
    use standings_shared::{Division, StandingRow};

    fn row(position: u32, name: &str, diff: i32, total: u32) -> StandingRow {
        StandingRow {
            position,
            name: name.into(),
            played: 7,
            won: 4,
            lost: 3,
            games_for: 9,
            games_against: 8,
            points_for: 360,
            points_against: 355,
            diff,
            total,
        }
    }

    fn honor_standings() -> Standings {
        Standings {
            division: Division::Honor,
            matchday: 7,
            rows: vec![
                row(1, "CLUB FRONTENIS VALLADOLID A", 111, 19),
                row(2, "LEÓN", 58, 17),
                row(3, "ÁVILA", 5, 15),
                row(4, "BURGOS", -58, 11),
                row(5, "ZAMORA", -111, 9),
            ],
        }
    }

    fn opts(slots: usize) -> RenderOptions {
        RenderOptions::from_site(&SiteConfig::default(), "División de Honor", slots)
    }

    fn badges() -> BadgeResolver {
        BadgeResolver::new("/nonexistent/standings-img", "default_badge.png")
    }

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    fn cell_texts(doc: &Html, row_index: usize) -> Vec<String> {
        let tr = doc.select(&sel("tbody tr")).nth(row_index).expect("row");
        tr.select(&sel("td"))
            .map(|td| td.text().collect::<String>())
            .collect()
    }

    #[test]
    fn renders_header_and_titles() {
        let html = render_standings(&honor_standings(), &opts(2), &badges()).unwrap();
        let doc = Html::parse_document(&html);

        let h1: String = doc.select(&sel("h1")).next().unwrap().text().collect();
        assert_eq!(h1, "Clasificación División de Honor | Jornada 7");

        let h2: String = doc.select(&sel("h2")).next().unwrap().text().collect();
        assert_eq!(h2, "Liga Regional de Frontenis Castilla y León");

        let title: String = doc.select(&sel("title")).next().unwrap().text().collect();
        assert_eq!(title, "Clasificación Liga Frontenis Castilla y León");

        let html_el = doc.select(&sel("html")).next().unwrap();
        assert_eq!(html_el.value().attr("lang"), Some("es"));
    }

    #[test]
    fn renders_column_headers() {
        let html = render_standings(&honor_standings(), &opts(2), &badges()).unwrap();
        let doc = Html::parse_document(&html);

        let headers: Vec<String> = doc
            .select(&sel("thead th"))
            .map(|th| th.text().collect())
            .collect();
        assert_eq!(
            headers,
            ["", "", "Equipo", "PJ", "PG", "PP", "JF", "JC", "TF", "TC", "Dif", "Puntos"]
        );

        let hidden: Vec<String> = doc
            .select(&sel("thead th.hidden"))
            .map(|th| th.text().collect())
            .collect();
        assert_eq!(hidden, ["JF", "JC", "TF", "TC", "Dif"]);

        let tc = doc
            .select(&sel("thead th"))
            .find(|th| th.text().collect::<String>() == "TC")
            .unwrap();
        assert_eq!(tc.value().attr("data-tooltip"), Some("Tantos en Contra"));
    }

    #[test]
    fn renders_one_row_per_team() {
        let html = render_standings(&honor_standings(), &opts(2), &badges()).unwrap();
        let doc = Html::parse_document(&html);

        assert_eq!(doc.select(&sel("tbody tr")).count(), 5);
        assert_eq!(
            cell_texts(&doc, 1),
            ["2", "", "LEÓN", "7", "4", "3", "9", "8", "360", "355", "58", "17"]
        );
        assert_eq!(cell_texts(&doc, 4)[10], "-111");
        assert_eq!(doc.select(&sel("tbody td.hidden")).count(), 5 * 5);
    }

    #[test]
    fn a_suffix_is_stripped_for_display() {
        let html = render_standings(&honor_standings(), &opts(2), &badges()).unwrap();
        let doc = Html::parse_document(&html);

        assert_eq!(cell_texts(&doc, 0)[2], "CLUB FRONTENIS VALLADOLID");
        let img = doc.select(&sel("tbody tr img")).next().unwrap();
        assert_eq!(img.value().attr("alt"), Some("Escudo CLUB FRONTENIS VALLADOLID"));
        assert_eq!(img.value().attr("width"), Some("30"));
    }

    #[test]
    fn missing_badges_use_placeholder() {
        let html = render_standings(&honor_standings(), &opts(2), &badges()).unwrap();
        let doc = Html::parse_document(&html);

        for img in doc.select(&sel("tbody img")) {
            assert_eq!(
                img.value().attr("src"),
                Some("/nonexistent/standings-img/default_badge.png")
            );
        }
    }

    #[test]
    fn badge_lookup_uses_full_name() {
        let dir = std::env::temp_dir().join(format!(
            "standings-render-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("club_frontenis_valladolid_a.png"), b"img").unwrap();
        let dir = dir.to_string_lossy().to_string();

        let badges = BadgeResolver::new(&dir, "default_badge.png");
        let html = render_standings(&honor_standings(), &opts(2), &badges).unwrap();
        let doc = Html::parse_document(&html);

        let img = doc.select(&sel("tbody tr img")).next().unwrap();
        let expected = format!("{dir}/club_frontenis_valladolid_a.png");
        assert_eq!(img.value().attr("src"), Some(expected.as_str()));
    }

    #[test]
    fn relegation_rows_marked() {
        let html = render_standings(&honor_standings(), &opts(2), &badges()).unwrap();
        let doc = Html::parse_document(&html);

        let classes: Vec<Option<&str>> = doc
            .select(&sel("tbody tr"))
            .map(|tr| tr.value().attr("class"))
            .collect();
        assert_eq!(classes, [None, None, None, Some("descent"), Some("descent")]);
    }

    #[test]
    fn no_relegation_without_slots() {
        let html = render_standings(&honor_standings(), &opts(0), &badges()).unwrap();
        let doc = Html::parse_document(&html);
        assert_eq!(doc.select(&sel("tbody tr.descent")).count(), 0);
    }

    #[test]
    fn toggle_and_assets_linked() {
        let html = render_standings(&honor_standings(), &opts(2), &badges()).unwrap();
        let doc = Html::parse_document(&html);

        let button: String = doc.select(&sel("#toggleView")).next().unwrap().text().collect();
        assert_eq!(button, "Ver Detalles");

        let script = doc.select(&sel("script")).next().unwrap();
        assert_eq!(script.value().attr("src"), Some("static/script.js"));

        let link = doc.select(&sel("link[rel=stylesheet]")).next().unwrap();
        assert_eq!(link.value().attr("href"), Some("static/style.css"));
    }

    #[test]
    fn empty_table_still_renders() {
        let standings = Standings {
            division: Division::Primera,
            matchday: 1,
            rows: vec![],
        };
        let html = render_standings(&standings, &opts(0), &badges()).unwrap();
        let doc = Html::parse_document(&html);
        assert_eq!(doc.select(&sel("tbody tr")).count(), 0);
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn text_is_escaped() {
        let mut site = SiteConfig::default();
        site.league_title = "Liga <Regional> & Copa".into();
        let opts = RenderOptions::from_site(&site, "Honor \"A\"", 0);
        let html = render_standings(&honor_standings(), &opts, &badges()).unwrap();

        assert!(html.contains("Liga &lt;Regional&gt; &amp; Copa"));
        let doc = Html::parse_document(&html);
        let h2: String = doc.select(&sel("h2")).next().unwrap().text().collect();
        assert_eq!(h2, "Liga <Regional> & Copa");
    }
}
