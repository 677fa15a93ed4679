use std::fmt::Write;

use time::PrimitiveDateTime;

use crate::{
    ledger::remaining_seats,
    models::{Announcement, CarpoolEntry, CarpoolKind, CarpoolStatus, Fixture, Game, Role, UserRegistration},
    projection::{carpool_summary, compute_occupancy, is_urgent, missing_roles},
    settings::ClubSettings,
};

use super::{timestamp, TimestampStyle};

/// Discord's limit for a message body.
pub const MESSAGE_LIMIT: usize = 2000;

pub fn side_emoji(is_home: bool) -> &'static str {
    if is_home {
        "🏠"
    } else {
        "🚗"
    }
}

pub fn game_title(fixture: &Fixture) -> String {
    format!("{} vs {}", fixture.team, fixture.opponent)
}

/// `Samedi 14 Décembre 2024 à 15H00`, with a relative Discord timestamp when the date is known.
pub fn kickoff_line(fixture: &Fixture, settings: &ClubSettings) -> String {
    let mut line = format!("{} à {}", fixture.date_label, fixture.time_label);

    if let Some(kickoff) = fixture.kickoff() {
        let _ = write!(
            line,
            " ({})",
            timestamp(settings.to_instant(kickoff), TimestampStyle::RelativeTime)
        );
    }

    line
}

/// One line of a game list.
pub fn game_line(game: &Game, now_local: PrimitiveDateTime) -> String {
    let fixture = &game.fixture;
    let mut line = format!(
        "`#{}` {} **{}** vs {} · {} {} · {}",
        game.id,
        side_emoji(fixture.is_home),
        fixture.team,
        fixture.opponent,
        fixture.date_label,
        fixture.time_label,
        fixture.location,
    );

    if fixture.is_home {
        let occupancy = compute_occupancy(game);
        let _ = write!(line, " · {} %", occupancy.percent);
        if occupancy.fully_staffed {
            line.push_str(" ✅");
        } else if is_urgent(game, now_local) {
            line.push_str(" 🚨");
        }
    } else if !game.carpool.is_empty() {
        let summary = carpool_summary(game);
        let _ = write!(
            line,
            " · {} place(s) offerte(s), {} demandée(s)",
            summary.seats_offered, summary.seats_requested
        );
    }

    line
}

/// `**Buvette** (1/2) : Marie, Paul`
pub fn role_line(role: &Role) -> String {
    let volunteers = if role.volunteers.is_empty() {
        "_personne_".to_string()
    } else {
        role.volunteers.join(", ")
    };

    format!(
        "`{}` **{}** ({}/{}) : {}",
        role.id,
        role.name,
        role.volunteers.len(),
        role.capacity,
        volunteers
    )
}

fn carpool_line(entry: &CarpoolEntry, entries: &[CarpoolEntry]) -> String {
    let mut line = match entry.kind {
        CarpoolKind::Driver => format!(
            "`{}` 🚙 **{}** · {} place(s) libre(s) sur {}",
            entry.id,
            entry.name,
            remaining_seats(entry, entries),
            entry.seats
        ),
        CarpoolKind::Passenger => format!(
            "`{}` 🙋 **{}** · {} place(s)",
            entry.id, entry.name, entry.seats
        ),
    };

    if let Some(departure) = &entry.departure {
        let _ = write!(line, " · départ : {departure}");
    }
    if let Some(phone) = &entry.phone {
        let _ = write!(line, " · {phone}");
    }

    match entry.status {
        CarpoolStatus::Available => {}
        CarpoolStatus::Pending => line.push_str(" · ⏳ en attente"),
        CarpoolStatus::Matched => line.push_str(" · ✅ confirmé"),
    }

    line
}

/// Roles for home games, carpool for away games (and any carpool posted on a home game).
pub fn game_details(game: &Game, settings: &ClubSettings) -> String {
    let fixture = &game.fixture;
    let now_local = settings.now_local();

    let mut details = format!(
        "## {} {}\n📅 {}\n📍 {}\n",
        side_emoji(fixture.is_home),
        game_title(fixture),
        kickoff_line(fixture, settings),
        fixture.location,
    );

    if !game.roles.is_empty() {
        let occupancy = compute_occupancy(game);
        let _ = writeln!(
            details,
            "\n**Bénévoles** · {}/{} ({} %)",
            occupancy.filled, occupancy.target, occupancy.percent
        );
        for role in &game.roles {
            let _ = writeln!(details, "{}", role_line(role));
        }

        if is_urgent(game, now_local) {
            let _ = writeln!(
                details,
                "🚨 **Urgent** : il manque encore du monde ({})",
                missing_roles(game).join(", ")
            );
        }
    }

    if !game.carpool.is_empty() || !fixture.is_home {
        let summary = carpool_summary(game);
        let _ = writeln!(
            details,
            "\n**Covoiturage** · {} conducteur(s), {} passager(s), solde {}",
            summary.drivers,
            summary.passengers,
            summary.balance()
        );
        for entry in &game.carpool {
            let _ = writeln!(details, "{}", carpool_line(entry, &game.carpool));
        }
    }

    truncate_message(details)
}

pub fn registration_line(registration: &UserRegistration) -> String {
    format!(
        "`#{}` **{}** pour {} · {} vs {} · {} {} · {}",
        registration.game_id,
        registration.role_name,
        registration.volunteer_name,
        registration.team,
        registration.opponent,
        registration.game_date_label,
        registration.game_time,
        registration.location,
    )
}

pub fn announcement_line(announcement: &Announcement) -> String {
    format!(
        "{} {} `#{}`",
        announcement.kind.emoji(),
        announcement.message,
        announcement.id.0
    )
}

/// Cuts a message to Discord's limit on a line boundary.
pub fn truncate_message(text: String) -> String {
    if text.chars().count() <= MESSAGE_LIMIT {
        return text;
    }

    const ELLIPSIS: &str = "\n…";
    let budget = MESSAGE_LIMIT - ELLIPSIS.chars().count();

    let mut truncated = String::new();
    for line in text.lines() {
        if truncated.chars().count() + line.chars().count() + 1 > budget {
            break;
        }
        truncated.push_str(line);
        truncated.push('\n');
    }

    truncated.truncate(truncated.trim_end().len());
    truncated.push_str(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::models::{default_roles_for, Fixture, Game, GameId};

    use super::{game_line, role_line, truncate_message, MESSAGE_LIMIT};

    fn game(is_home: bool) -> Game {
        Game {
            id: GameId(12),
            fixture: Fixture {
                team: "U11 M1".to_string(),
                opponent: "ROYAT BC".to_string(),
                date_label: "Samedi 14 Décembre 2024".to_string(),
                date: Some(date!(2024 - 12 - 14)),
                time_label: "15H00".to_string(),
                location: "Maison des Sports".to_string(),
                is_home,
            },
            roles: default_roles_for("U11 M1"),
            carpool: vec![],
        }
    }

    #[test]
    fn home_game_line_shows_staffing_and_urgency() {
        let mut game = game(true);
        game.roles[0].volunteers = vec!["Marie".to_string(), "Paul".to_string()];

        assert_eq!(
            game_line(&game, datetime!(2024-12-13 15:00)),
            "`#12` 🏠 **U11 M1** vs ROYAT BC · Samedi 14 Décembre 2024 15H00 · Maison des Sports · 33 % 🚨"
        );
        assert!(!game_line(&game, datetime!(2024-12-01 15:00)).contains("🚨"));
    }

    #[test]
    fn role_line_lists_volunteers() {
        let mut game = game(true);
        game.roles[1].volunteers.push("Léo".to_string());

        assert_eq!(role_line(&game.roles[1]), "`2` **Chrono** (1/1) : Léo");
        assert_eq!(role_line(&game.roles[3]), "`4` **Goûter** (0/illimité) : _personne_");
    }

    #[test]
    fn long_messages_are_cut_on_lines() {
        let text = (0..500).map(|n| format!("ligne {n}")).collect::<Vec<_>>().join("\n");

        let truncated = truncate_message(text);

        assert!(truncated.chars().count() <= MESSAGE_LIMIT);
        assert!(truncated.ends_with("\n…"));
        assert!(truncated.starts_with("ligne 0\nligne 1\n"));
    }
}
