use lazy_regex::{regex, regex_captures, regex_is_match};

/// Venue shown for away games.
pub const AWAY_VENUE: &str = "Extérieur";

/// How the club appears in federation exports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClubProfile {
    /// Upper-case fragments identifying the club in a team name.
    pub name_patterns: Vec<String>,
    /// Team used when a line doesn't name the club, e.g. copied from a team page.
    pub default_team: String,
    /// Lower-case venue fragments meaning "this is a home game".
    pub home_venue_keywords: Vec<String>,
}

impl Default for ClubProfile {
    fn default() -> Self {
        ClubProfile {
            name_patterns: vec![
                "SCBA".to_string(),
                "STADE CLERMONT".to_string(),
                "SC BASKET AUVERGNE".to_string(),
            ],
            default_team: "SENIOR M1".to_string(),
            home_venue_keywords: vec![
                "maison des sports".to_string(),
                "clermont".to_string(),
                "fleury".to_string(),
            ],
        }
    }
}

impl ClubProfile {
    pub fn is_club_team(&self, team: &str) -> bool {
        let team = team.to_uppercase();
        self.name_patterns
            .iter()
            .any(|pattern| team.contains(pattern.as_str()))
    }

    pub fn is_home_venue(&self, venue: &str) -> bool {
        let venue = venue.to_lowercase();
        self.home_venue_keywords
            .iter()
            .any(|keyword| venue.contains(keyword.as_str()))
    }

    /// `SCBA U11-1` gives `U11 M1`, `STADE CLERMONT SM2` gives `SENIOR M2`.
    /// Other names lose the club prefix.
    pub fn normalize_team(&self, team: &str) -> String {
        let upper = team.to_uppercase();

        if regex_is_match!(r"SENIOR|\bSM\d?\b", &upper) {
            let number = regex_captures!(r"(\d)", &upper)
                .map(|(_, digit)| digit)
                .unwrap_or("1");
            return format!("SENIOR M{number}");
        }

        if let Some((_, category, number)) = regex_captures!(r"U(\d+)[-\s]?M?(\d)?", &upper) {
            let number = if number.is_empty() { "1" } else { number };
            return format!("U{category} M{number}");
        }

        let mut name = upper;
        for pattern in &self.name_patterns {
            name = name.replace(pattern.as_str(), " ");
        }
        regex!(r"\s+").replace_all(name.trim(), " ").into_owned()
    }
}

/// Where a team plays at home when the import doesn't say.
pub fn default_home_venue(team: &str) -> &'static str {
    if team == "SENIOR M1" {
        "Gymnase Fleury"
    } else {
        "Maison des Sports"
    }
}
