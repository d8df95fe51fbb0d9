//! Team badge lookup.

use std::path::Path;

use tracing::debug;

/// Image extensions tried, in order.
const EXTENSIONS: [&str; 2] = ["png", "jpg"];

/// Reserve-team markers dropped when a badge for the full name is missing.
const TEAM_SUFFIXES: [&str; 3] = ["_a", "_b", "_c"];

/// Resolves team names to badge image paths inside an image directory.
#[derive(Debug, Clone)]
pub struct BadgeResolver {
    img_dir: String,
    default_badge: String,
}

impl BadgeResolver {
    /// `img_dir` is used both for lookups and as the prefix of returned paths.
    pub fn new(img_dir: impl Into<String>, default_badge: impl Into<String>) -> Self {
        let img_dir: String = img_dir.into();
        Self {
            img_dir: img_dir.trim_end_matches('/').to_string(),
            default_badge: default_badge.into(),
        }
    }

    /// Badge path for `team_name`.
    ///
    /// The name is lower-cased with spaces turned into underscores. For each
    /// extension the full name is tried first, then the name without a
    /// trailing `_a`/`_b`/`_c`. Falls back to the placeholder badge.
    pub fn resolve(&self, team_name: &str) -> String {
        let base = badge_stem(team_name);
        let stripped = TEAM_SUFFIXES
            .iter()
            .find_map(|suffix| base.strip_suffix(suffix));

        for ext in EXTENSIONS {
            let candidate = self.path_for(&base, ext);
            if Path::new(&candidate).exists() {
                return candidate;
            }

            if let Some(stem) = stripped {
                let candidate = self.path_for(stem, ext);
                if Path::new(&candidate).exists() {
                    return candidate;
                }
            }
        }

        debug!(team = team_name, "no badge found, using placeholder");
        self.default_path()
    }

    /// Path of the placeholder badge.
    pub fn default_path(&self) -> String {
        format!("{}/{}", self.img_dir, self.default_badge)
    }

    fn path_for(&self, stem: &str, ext: &str) -> String {
        format!("{}/{stem}.{ext}", self.img_dir)
    }
}

/// File stem for a team's badge: lower-case, spaces as underscores.
pub fn badge_stem(team_name: &str) -> String {
    team_name.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_img_dir(files: &[&str]) -> String {
        let dir = std::env::temp_dir().join(format!(
            "standings-badge-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        for file in files {
            std::fs::write(dir.join(file), b"img").unwrap();
        }
        dir.to_string_lossy().to_string()
    }

    #[test]
    fn stem_lowercases_accents() {
        assert_eq!(badge_stem("CLUB FRONTENIS VALLADOLID A"), "club_frontenis_valladolid_a");
        assert_eq!(badge_stem("ÁVILA"), "ávila");
        assert_eq!(badge_stem("SALAMANCA FRONTÓN"), "salamanca_frontón");
    }

    #[test]
    fn exact_png_match() {
        let dir = temp_img_dir(&["león.png", "león.jpg"]);
        let badges = BadgeResolver::new(&dir, "default_badge.png");
        assert_eq!(badges.resolve("LEÓN"), format!("{dir}/león.png"));
    }

    #[test]
    fn jpg_when_no_png() {
        let dir = temp_img_dir(&["burgos.jpg"]);
        let badges = BadgeResolver::new(&dir, "default_badge.png");
        assert_eq!(badges.resolve("BURGOS"), format!("{dir}/burgos.jpg"));
    }

    #[test]
    fn team_suffix_falls_back_to_club_badge() {
        let dir = temp_img_dir(&["zamora.png"]);
        let badges = BadgeResolver::new(&dir, "default_badge.png");
        assert_eq!(badges.resolve("ZAMORA B"), format!("{dir}/zamora.png"));
        assert_eq!(badges.resolve("ZAMORA C"), format!("{dir}/zamora.png"));
        assert_eq!(badges.resolve("ZAMORA A"), format!("{dir}/zamora.png"));
    }

    #[test]
    fn suffix_png_beats_full_name_jpg() {
        let dir = temp_img_dir(&["soria_b.jpg", "soria.png"]);
        let badges = BadgeResolver::new(&dir, "default_badge.png");
        assert_eq!(badges.resolve("SORIA B"), format!("{dir}/soria.png"));
    }

    #[test]
    fn missing_badge_uses_placeholder() {
        let dir = temp_img_dir(&["león.png"]);
        let badges = BadgeResolver::new(format!("{dir}/"), "default_badge.png");
        assert_eq!(badges.resolve("SEGOVIA"), format!("{dir}/default_badge.png"));
        // "_d" is not a team marker.
        assert_eq!(badges.resolve("LEÓN D"), format!("{dir}/default_badge.png"));
    }
}
