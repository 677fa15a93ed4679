use poise::CreateReply;
use time::Duration;

use crate::{
    commands::{
        arguments::TrimmedString, internal_err, user_err, ApplicationContext, CommandResult,
    },
    models::{types::UtcDateTime, AnnouncementKind, AnnouncementTarget, NewAnnouncement},
    utils::{formatting::announcement_line, timestamp, TimestampStyle},
};

const DEFAULT_DURATION_DAYS: u32 = 7;

/// Publier une annonce visible dans `/annonces`.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "annonce")]
pub async fn announce(
    ctx: ApplicationContext<'_>,

    #[description = "Par exemple : Match M1 annulé ce soir."]
    message: TrimmedString,

    #[rename = "type"]
    #[description = "Information par défaut."]
    kind: Option<AnnouncementKind>,

    #[rename = "pour"]
    #[description = "Qui voit l'annonce. Tout le monde par défaut."]
    target: Option<AnnouncementTarget>,

    #[rename = "jours"]
    #[description = "Durée d'affichage en jours. 7 par défaut."]
    #[min = 1]
    #[max = 90]
    days: Option<u32>,
) -> CommandResult {
    if message.is_empty() {
        return Err(user_err("Le message est vide."));
    }

    let now = UtcDateTime::now();
    let expires_at = now + Duration::days(days.unwrap_or(DEFAULT_DURATION_DAYS).into());

    let announcement = ctx
        .data
        .announcement_repository
        .create(&NewAnnouncement {
            message: message.into(),
            kind: kind.unwrap_or(AnnouncementKind::Info),
            created_at: now,
            expires_at,
            created_by: ctx.author().id,
            target: target.unwrap_or_default(),
        })
        .await
        .map_err(|err| internal_err(format!("Impossible de publier l'annonce : {err}")))?;

    ctx.send(
        CreateReply::default()
            .content(format!(
                "Annonce publiée jusqu'au {} :\n{}",
                timestamp(expires_at.into(), TimestampStyle::ShortDateTime),
                announcement_line(&announcement)
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
