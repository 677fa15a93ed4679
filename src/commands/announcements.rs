use poise::CreateReply;

use crate::{
    commands::{internal_err, ApplicationContext, CommandResult},
    models::{sort_for_display, types::UtcDateTime, Announcement, AnnouncementTarget},
    utils::formatting::{announcement_line, truncate_message},
};

/// Whether an announcement is meant for this reader.
fn is_addressed_to(announcement: &Announcement, is_admin: bool, is_volunteer: bool) -> bool {
    match announcement.target {
        AnnouncementTarget::All => true,
        AnnouncementTarget::Volunteers => is_volunteer || is_admin,
        AnnouncementTarget::Admins => is_admin,
    }
}

/// Les annonces du club en cours.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, guild_only, rename = "annonces")]
pub async fn announcements(ctx: ApplicationContext<'_>) -> CommandResult {
    let mut announcements = ctx
        .data
        .announcement_repository
        .list_active(UtcDateTime::now())
        .await
        .map_err(|err| internal_err(format!("Impossible de lire les annonces : {err}")))?;

    let is_admin = ctx
        .interaction
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator());

    let is_volunteer = !ctx
        .data
        .registration_repository
        .member_game_ids(ctx.author().id)
        .await
        .map_err(|err| internal_err(format!("Impossible de lire vos inscriptions : {err}")))?
        .is_empty();

    announcements.retain(|announcement| is_addressed_to(announcement, is_admin, is_volunteer));
    sort_for_display(&mut announcements);

    let content = if announcements.is_empty() {
        "Aucune annonce en cours.".to_string()
    } else {
        let list = announcements.iter().fold(String::new(), |acc, announcement| {
            acc + &announcement_line(announcement) + "\n"
        });
        truncate_message(format!("# Annonces\n{list}"))
    };

    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude::UserId;
    use time::macros::datetime;

    use crate::models::{
        types::UtcDateTime, Announcement, AnnouncementId, AnnouncementKind, AnnouncementTarget,
    };

    use super::is_addressed_to;

    fn announcement(target: AnnouncementTarget) -> Announcement {
        Announcement {
            id: AnnouncementId(1),
            message: "Assemblée générale vendredi".to_string(),
            kind: AnnouncementKind::Info,
            active: true,
            created_at: UtcDateTime::assume_utc(datetime!(2024-12-01 10:00)),
            expires_at: UtcDateTime::assume_utc(datetime!(2024-12-08 10:00)),
            created_by: UserId::new(1),
            target,
        }
    }

    #[test]
    fn everyone_sees_public_announcements() {
        assert!(is_addressed_to(&announcement(AnnouncementTarget::All), false, false));
    }

    #[test]
    fn volunteer_announcements() {
        let announcement = announcement(AnnouncementTarget::Volunteers);
        assert!(!is_addressed_to(&announcement, false, false));
        assert!(is_addressed_to(&announcement, false, true));
        assert!(is_addressed_to(&announcement, true, false));
    }

    #[test]
    fn admin_announcements() {
        let announcement = announcement(AnnouncementTarget::Admins);
        assert!(!is_addressed_to(&announcement, false, true));
        assert!(is_addressed_to(&announcement, true, false));
    }
}
