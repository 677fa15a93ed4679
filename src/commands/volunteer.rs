use poise::CreateReply;

use crate::{
    commands::{
        arguments::{GameRef, TrimmedString},
        autocomplete_home_game, autocomplete_role, display_name, find_game, find_role, user_err,
        ApplicationContext, CommandResult, Context,
    },
    ledger::{Registrant, RenameOutcome},
    utils::formatting::game_title,
};

#[poise::command(
    slash_command,
    guild_only,
    rename = "benevole",
    subcommands("sign_up", "withdraw", "rename")
)]
pub async fn volunteer(_ctx: Context<'_>) -> CommandResult {
    Err(user_err("Utilisez `/benevole inscrire`, `/benevole retirer` ou `/benevole modifier`."))
}

/// S'inscrire sur un poste de bénévole d'un match à domicile.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "inscrire")]
pub async fn sign_up(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_home_game"]
    game: GameRef,

    #[rename = "poste"]
    #[description = "Numéro ou nom du poste, par exemple `Buvette`."]
    #[autocomplete = "autocomplete_role"]
    role: String,

    #[rename = "noms"]
    #[description = "Qui vient ? Plusieurs noms possibles : `Marie et Paul`. Par défaut, votre pseudo."]
    names: Option<TrimmedString>,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;
    let role = find_role(&game, &role)?;

    if role.is_full() {
        return Err(user_err(format!(
            "Le poste **{}** est déjà complet ({}/{}). Merci quand même !",
            role.name,
            role.volunteers.len(),
            role.capacity
        )));
    }

    let names = names
        .filter(|names| !names.is_empty())
        .map(String::from)
        .unwrap_or_else(|| display_name(&ctx));

    let added = ctx
        .data
        .ledger
        .sign_up(
            game.id,
            role.id,
            &names,
            Registrant::Member(ctx.author().id),
        )
        .await?;

    ctx.send(
        CreateReply::default()
            .content(format!(
                "✅ Merci {} ! Inscription au poste **{}** pour {} ({} à {}).",
                added.join(", "),
                role.name,
                game_title(&game.fixture),
                game.fixture.date_label,
                game.fixture.time_label,
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Se retirer d'un poste de bénévole.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "retirer")]
pub async fn withdraw(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_home_game"]
    game: GameRef,

    #[rename = "poste"]
    #[description = "Numéro ou nom du poste."]
    #[autocomplete = "autocomplete_role"]
    role: String,

    #[rename = "nom"]
    #[description = "Le nom à retirer, tel qu'il apparaît sur le planning. Par défaut, votre pseudo."]
    name: Option<TrimmedString>,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;
    let role = find_role(&game, &role)?;

    let name = name
        .filter(|name| !name.is_empty())
        .map(String::from)
        .unwrap_or_else(|| display_name(&ctx));

    let removed = ctx
        .data
        .ledger
        .withdraw(game.id, role.id, &name, Registrant::Member(ctx.author().id))
        .await?;

    let content = if removed {
        format!(
            "👋 {name} ne fait plus partie du poste **{}** pour {}.",
            role.name,
            game_title(&game.fixture)
        )
    } else {
        format!(
            "« {name} » n'était pas inscrit(e) au poste **{}**, rien à faire.",
            role.name
        )
    };

    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}

/// Corriger un nom sur le planning, ou remplacer une personne par plusieurs.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "modifier")]
pub async fn rename(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_home_game"]
    game: GameRef,

    #[rename = "poste"]
    #[description = "Numéro ou nom du poste."]
    #[autocomplete = "autocomplete_role"]
    role: String,

    #[rename = "ancien"]
    #[description = "Le nom actuel sur le planning."]
    old_name: TrimmedString,

    #[rename = "nouveau"]
    #[description = "Le ou les nouveaux noms, par exemple `Marie et Paul`."]
    new_names: TrimmedString,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;
    let role = find_role(&game, &role)?;

    let outcome = ctx
        .data
        .ledger
        .rename(
            game.id,
            role.id,
            old_name.as_ref(),
            new_names.as_ref(),
            Registrant::Member(ctx.author().id),
        )
        .await?;

    let content = match outcome {
        RenameOutcome::Unchanged => "Le nom est identique, rien à modifier.".to_string(),
        RenameOutcome::Replaced => format!(
            "✏️ « {old_name} » devient « {new_names} » au poste **{}**.",
            role.name
        ),
        RenameOutcome::Split(names) => format!(
            "✏️ « {old_name} » est remplacé(e) par {} au poste **{}**.",
            names.join(", "),
            role.name
        ),
    };

    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}
