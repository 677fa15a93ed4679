use indoc::indoc;
use poise::samples::HelpConfiguration;

use crate::commands::{CommandResult, Context};

const HELP_FOOTER: &str = indoc! {"
    Les matchs se choisissent dans la liste proposée, ou par leur numéro (`#12`).
    Pour inscrire plusieurs personnes d'un coup : `Marie et Paul`, `Marie, Paul`.
"};

/// Obtenir de l'aide sur les commandes du bot.
#[poise::command(slash_command, ephemeral, rename = "aide")]
pub async fn help(
    ctx: Context<'_>,

    #[rename = "commande"]
    #[description = "La commande sur laquelle obtenir de l'aide."]
    #[autocomplete = "poise::builtins::autocomplete_command"]
    command: Option<String>,
) -> CommandResult {
    let config = HelpConfiguration {
        extra_text_at_bottom: HELP_FOOTER,
        ..Default::default()
    };

    poise::builtins::help(ctx, command.as_deref(), config).await?;

    Ok(())
}
