use poise::serenity_prelude::UserId;
use time::Date;

use super::{types::UtcDateTime, Game, GameId, RoleId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegistrationId(pub u64);

/// A member's own copy of one volunteer entry, with enough game details to list
/// their missions without reading the games.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRegistration {
    pub id: RegistrationId,
    pub member: UserId,
    pub game_id: GameId,
    pub role_id: RoleId,
    pub role_name: String,
    pub volunteer_name: String,
    pub game_date_label: String,
    pub game_date: Option<Date>,
    pub game_time: String,
    pub location: String,
    pub team: String,
    pub opponent: String,
    pub created_at: UtcDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRegistration {
    pub member: UserId,
    pub game_id: GameId,
    pub role_id: RoleId,
    pub role_name: String,
    pub volunteer_name: String,
    pub game_date_label: String,
    pub game_date: Option<Date>,
    pub game_time: String,
    pub location: String,
    pub team: String,
    pub opponent: String,
    pub created_at: UtcDateTime,
}

impl NewRegistration {
    pub fn for_role(
        member: UserId,
        game: &Game,
        role_id: RoleId,
        volunteer_name: &str,
        created_at: UtcDateTime,
    ) -> NewRegistration {
        let role_name = game
            .role(role_id)
            .map(|role| role.name.clone())
            .unwrap_or_else(|| "Bénévole".to_string());

        NewRegistration {
            member,
            game_id: game.id,
            role_id,
            role_name,
            volunteer_name: volunteer_name.to_string(),
            game_date_label: game.fixture.date_label.clone(),
            game_date: game.fixture.date,
            game_time: game.fixture.time_label.clone(),
            location: game.fixture.location.clone(),
            team: game.fixture.team.clone(),
            opponent: game.fixture.opponent.clone(),
            created_at,
        }
    }
}
