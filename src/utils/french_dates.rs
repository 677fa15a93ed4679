use std::sync::OnceLock;

use bimap::BiMap;
use deunicode::deunicode;
use lazy_regex::regex_captures;
use time::{Date, Month, Time, Weekday};

fn months() -> &'static BiMap<Month, &'static str> {
    static MONTHS: OnceLock<BiMap<Month, &'static str>> = OnceLock::new();

    MONTHS.get_or_init(|| {
        BiMap::from_iter([
            (Month::January, "Janvier"),
            (Month::February, "Février"),
            (Month::March, "Mars"),
            (Month::April, "Avril"),
            (Month::May, "Mai"),
            (Month::June, "Juin"),
            (Month::July, "Juillet"),
            (Month::August, "Août"),
            (Month::September, "Septembre"),
            (Month::October, "Octobre"),
            (Month::November, "Novembre"),
            (Month::December, "Décembre"),
        ])
    })
}

/// Lowercase and strip accents, so `Décembre` and `decembre` compare equal.
pub fn fold(text: &str) -> String {
    deunicode(text).to_lowercase()
}

pub fn month_name(month: Month) -> &'static str {
    months().get_by_left(&month).copied().unwrap_or("?")
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Lundi",
        Weekday::Tuesday => "Mardi",
        Weekday::Wednesday => "Mercredi",
        Weekday::Thursday => "Jeudi",
        Weekday::Friday => "Vendredi",
        Weekday::Saturday => "Samedi",
        Weekday::Sunday => "Dimanche",
    }
}

/// Full or abbreviated month name, with or without accents: `décembre`, `Dec.`, `sept`.
pub fn parse_month(token: &str) -> Option<Month> {
    let token = fold(token.trim().trim_end_matches('.'));
    if token.len() < 3 {
        return None;
    }

    let names: Vec<(Month, String)> = months()
        .iter()
        .map(|(month, name)| (*month, fold(name)))
        .collect();

    names
        .iter()
        .find(|(_, name)| *name == token)
        .or_else(|| names.iter().find(|(_, name)| name.starts_with(&token)))
        .map(|(month, _)| *month)
}

/// Parses `2024-12-14`, `14/12/2024`, `14/12` or `Samedi 14 Décembre 2024`.
///
/// `default_year` is used when the label carries no year. Returns `None` when the
/// label is not a date.
pub fn parse_french_date(label: &str, default_year: i32) -> Option<Date> {
    let label = label.trim();

    if let Some((_, year, month, day)) = regex_captures!(r"^(\d{4})-(\d{2})-(\d{2})$", label) {
        return calendar_date(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?);
    }

    if let Some((_, day, month, _, year)) =
        regex_captures!(r"^(\d{1,2})/(\d{1,2})(/(\d{2,4}))?$", label)
    {
        let year = match year {
            "" => default_year,
            short if short.len() == 2 => 2000 + short.parse::<i32>().ok()?,
            year => year.parse().ok()?,
        };
        return calendar_date(year, month.parse().ok()?, day.parse().ok()?);
    }

    if let Some((_, day, month, year)) =
        regex_captures!(r"(\d{1,2})\s+([^\s\d]+)(?:\s+(\d{4}))?", label)
    {
        let month = parse_month(month)?;
        let year = if year.is_empty() {
            default_year
        } else {
            year.parse().ok()?
        };
        return Date::from_calendar_date(year, month, day.parse().ok()?).ok();
    }

    None
}

fn calendar_date(year: i32, month: u8, day: u8) -> Option<Date> {
    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

/// Parses `15H00`, `9h30`, `20:45` or `15h`.
pub fn parse_time_label(label: &str) -> Option<Time> {
    let (_, hour, minute) = regex_captures!(r"(\d{1,2})\s*[hH:]\s*(\d{2})?", label)?;
    let minute = if minute.is_empty() {
        0
    } else {
        minute.parse().ok()?
    };

    Time::from_hms(hour.parse().ok()?, minute, 0).ok()
}

/// `Samedi 14 Décembre 2024`
pub fn format_date_label(date: Date) -> String {
    format!(
        "{} {} {} {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date.month()),
        date.year()
    )
}

/// `15H00`
pub fn format_time_label(time: Time) -> String {
    format!("{:02}H{:02}", time.hour(), time.minute())
}

/// `Décembre 2024`
pub fn month_label(date: Date) -> String {
    format!("{} {}", month_name(date.month()), date.year())
}

/// Basketball seasons run from August to July: a date without a year falls in the
/// season containing `today`.
pub fn season_year(month: Month, today: Date) -> i32 {
    let season_start = if today.month() as u8 >= Month::August as u8 {
        today.year()
    } else {
        today.year() - 1
    };

    if month as u8 >= Month::August as u8 {
        season_start
    } else {
        season_start + 1
    }
}

#[cfg(test)]
mod tests {
    use time::{
        macros::{date, time},
        Month,
    };

    use super::*;

    #[test]
    fn parses_all_label_shapes() {
        assert_eq!(parse_french_date("2024-12-14", 2000), Some(date!(2024 - 12 - 14)));
        assert_eq!(parse_french_date("14/12/2024", 2000), Some(date!(2024 - 12 - 14)));
        assert_eq!(parse_french_date("14/12", 2025), Some(date!(2025 - 12 - 14)));
        assert_eq!(
            parse_french_date("Samedi 13 Décembre 2025", 2000),
            Some(date!(2025 - 12 - 13))
        );
        assert_eq!(
            parse_french_date("dimanche 2 fevrier", 2026),
            Some(date!(2026 - 02 - 02))
        );
    }

    #[test]
    fn unparseable_label_is_none() {
        assert_eq!(parse_french_date("bientôt", 2025), None);
        assert_eq!(parse_french_date("Samedi 13 Brumaire 2025", 2025), None);
        assert_eq!(parse_french_date("31/02/2025", 2025), None);
        assert_eq!(parse_french_date("", 2025), None);
    }

    #[test]
    fn abbreviated_months() {
        assert_eq!(parse_month("sept."), Some(Month::September));
        assert_eq!(parse_month("janv"), Some(Month::January));
        assert_eq!(parse_month("Déc."), Some(Month::December));
        assert_eq!(parse_month("août"), Some(Month::August));
        assert_eq!(parse_month("ja"), None);
    }

    #[test]
    fn time_labels() {
        assert_eq!(parse_time_label("15H00"), Some(time!(15:00)));
        assert_eq!(parse_time_label("9h30"), Some(time!(9:30)));
        assert_eq!(parse_time_label("20:45"), Some(time!(20:45)));
        assert_eq!(parse_time_label("15h"), Some(time!(15:00)));
        assert_eq!(parse_time_label("TBD"), None);
        assert_eq!(parse_time_label("25h00"), None);
    }

    #[test]
    fn formats_labels() {
        assert_eq!(format_date_label(date!(2024 - 12 - 14)), "Samedi 14 Décembre 2024");
        assert_eq!(format_time_label(time!(9:05)), "09H05");
        assert_eq!(month_label(date!(2025 - 08 - 01)), "Août 2025");
    }

    #[test]
    fn season_year_splits_in_august() {
        let autumn = date!(2025 - 10 - 01);
        assert_eq!(season_year(Month::September, autumn), 2025);
        assert_eq!(season_year(Month::January, autumn), 2026);

        let spring = date!(2026 - 03 - 01);
        assert_eq!(season_year(Month::December, spring), 2025);
        assert_eq!(season_year(Month::May, spring), 2026);
    }
}
