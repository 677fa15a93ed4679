use poise::CreateReply;

use crate::{
    commands::{internal_err, user_err, ApplicationContext, CommandResult},
    models::AnnouncementId,
};

/// Retirer une annonce avant son expiration.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "annonce-desactiver")]
pub async fn deactivate_announcement(
    ctx: ApplicationContext<'_>,

    #[rename = "numero"]
    #[description = "Le numéro affiché à la fin de l'annonce dans `/annonces`."]
    id: u64,
) -> CommandResult {
    let deactivated = ctx
        .data
        .announcement_repository
        .set_active(AnnouncementId(id), false)
        .await
        .map_err(|err| internal_err(format!("Impossible de retirer l'annonce #{id} : {err}")))?;

    if !deactivated {
        return Err(user_err(format!("L'annonce #{id} n'existe pas.")));
    }

    ctx.send(
        CreateReply::default()
            .content(format!("Annonce #{id} retirée."))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
