use icalendar::{Alarm, Calendar, Component, Event, EventLike, EventStatus};
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

use crate::{
    models::{Game, UserRegistration},
    projection::known_date,
    settings::ClubSettings,
    utils::{formatting::game_title, french_dates::parse_time_label},
};

/// Length given to every game in calendars.
pub const GAME_LENGTH: Duration = Duration::hours(2);

const CALENDAR_NAME: &str = "Bénévoles du club";
const UID_DOMAIN: &str = "volunteer-roster-bot";

/// One calendar event, times as absolute instants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarEntry {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: OffsetDateTime,
}

fn local_kickoff(date: Option<time::Date>, time_label: &str) -> Option<PrimitiveDateTime> {
    Some(PrimitiveDateTime::new(date?, parse_time_label(time_label)?))
}

/// A game with a known day and kickoff time.
pub fn game_entry(game: &Game, settings: &ClubSettings) -> Option<CalendarEntry> {
    let date = known_date(game, settings.today().year());
    let kickoff = local_kickoff(date, &game.fixture.time_label)?;

    Some(CalendarEntry {
        uid: format!("game-{}@{UID_DOMAIN}", game.id),
        summary: format!("🏀 {}", game_title(&game.fixture)),
        description: format!(
            "Match de basket : {} contre {}",
            game.fixture.team, game.fixture.opponent
        ),
        location: game.fixture.location.clone(),
        start: settings.to_instant(kickoff),
    })
}

/// A volunteer's mission, as listed by `/matchs missions`.
pub fn mission_entry(
    registration: &UserRegistration,
    settings: &ClubSettings,
) -> Option<CalendarEntry> {
    let kickoff = local_kickoff(registration.game_date, &registration.game_time)?;

    Some(CalendarEntry {
        uid: format!("mission-{}@{UID_DOMAIN}", registration.id.0),
        summary: format!(
            "🏀 {} · {} vs {}",
            registration.role_name, registration.team, registration.opponent
        ),
        description: format!(
            "Bénévolat au poste {} pour {}",
            registration.role_name, registration.volunteer_name
        ),
        location: registration.location.clone(),
        start: settings.to_instant(kickoff),
    })
}

fn to_chrono(instant: OffsetDateTime) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(instant.unix_timestamp(), 0)
}

/// An `.ics` document with one event per entry and a reminder an hour before each.
pub fn to_ics(entries: &[CalendarEntry]) -> String {
    let mut calendar = Calendar::new();
    calendar.name(CALENDAR_NAME);

    for entry in entries {
        let start = to_chrono(entry.start);
        let end = to_chrono(entry.start + GAME_LENGTH);
        let (Some(start), Some(end)) = (start, end) else {
            continue;
        };

        calendar.push(
            Event::new()
                .uid(&entry.uid)
                .summary(&entry.summary)
                .description(&entry.description)
                .location(&entry.location)
                .starts(start)
                .ends(end)
                .status(EventStatus::Confirmed)
                .alarm(Alarm::display(
                    "Rappel : match dans 1 heure",
                    -chrono::Duration::hours(1),
                ))
                .done(),
        );
    }

    calendar.done().to_string()
}

/// `match-U11-M1-vs-ROYAT-BC.ics`
pub fn file_name(game: &Game) -> String {
    let slug = |text: &str| text.split_whitespace().collect::<Vec<_>>().join("-");
    format!(
        "match-{}-vs-{}.ics",
        slug(&game.fixture.team),
        slug(&game.fixture.opponent)
    )
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        models::{Fixture, Game, GameId},
        settings::ClubSettings,
    };

    use super::{file_name, game_entry, to_ics};

    fn game(date: Option<time::Date>, date_label: &str, time_label: &str) -> Game {
        Game {
            id: GameId(12),
            fixture: Fixture {
                team: "U11 M1".to_string(),
                opponent: "ROYAT BC".to_string(),
                date_label: date_label.to_string(),
                date,
                time_label: time_label.to_string(),
                location: "Maison des Sports".to_string(),
                is_home: true,
            },
            roles: vec![],
            carpool: vec![],
        }
    }

    #[test]
    fn game_becomes_a_two_hour_event() {
        let game = game(Some(date!(2024 - 12 - 14)), "Samedi 14 Décembre 2024", "15H00");
        let entry = game_entry(&game, &ClubSettings::default()).unwrap();

        // 15:00 in Paris in winter.
        assert_eq!(entry.start.unix_timestamp(), 1734184800);

        let ics = to_ics(&[entry]);
        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.contains("UID:game-12@volunteer-roster-bot"));
        assert!(ics.contains("DTSTART:20241214T140000Z"));
        assert!(ics.contains("DTEND:20241214T160000Z"));
        assert!(ics.contains("LOCATION:Maison des Sports"));
        assert!(ics.contains("BEGIN:VALARM"));
    }

    #[test]
    fn label_only_dates_are_enough() {
        let game = game(None, "Samedi 14 Décembre 2024", "15H00");

        assert!(game_entry(&game, &ClubSettings::default()).is_some());
    }

    #[test]
    fn no_event_without_a_kickoff_time() {
        let game = game(Some(date!(2024 - 12 - 14)), "Samedi 14 Décembre 2024", "à définir");

        assert_eq!(game_entry(&game, &ClubSettings::default()), None);
    }

    #[test]
    fn file_names_have_no_spaces() {
        let game = game(None, "", "");

        assert_eq!(file_name(&game), "match-U11-M1-vs-ROYAT-BC.ics");
    }
}
