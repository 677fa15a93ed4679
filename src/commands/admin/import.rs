use std::fmt::Write;

use poise::{serenity_prelude::Attachment, CreateReply};

use crate::{
    commands::{internal_err, sorted_games, user_err, ApplicationContext, CommandResult},
    import::{parse_fixtures, ImportReport},
    utils::formatting::{side_emoji, truncate_message},
};

/// Largest attachment accepted, in bytes.
const MAX_ATTACHMENT_SIZE: u32 = 256 * 1024;

fn render_report(report: &ImportReport, created: Option<usize>) -> String {
    let mut content = match created {
        Some(created) => format!("# Import terminé\n{created} match(s) ajouté(s)"),
        None => format!("# Aperçu de l'import\n{} match(s) à ajouter", report.fixtures.len()),
    };
    let _ = writeln!(
        content,
        ", {} doublon(s) ignoré(s), {} ligne(s) rejetée(s).",
        report.duplicates,
        report.errors.len()
    );

    if created.is_none() {
        for fixture in &report.fixtures {
            let _ = writeln!(
                content,
                " - {} **{}** vs {} · {} {} · {}",
                side_emoji(fixture.is_home),
                fixture.team,
                fixture.opponent,
                fixture.date_label,
                fixture.time_label,
                fixture.location
            );
        }
    }

    if !report.errors.is_empty() {
        content.push_str("### Lignes rejetées\n");
        for error in &report.errors {
            let _ = writeln!(
                content,
                " - Ligne {} : {} · `{}`",
                error.line, error.error, error.content
            );
        }
    }

    truncate_message(content)
}

/// Importer des matchs copiés depuis le site de la fédération.
#[tracing::instrument(skip(ctx, file))]
#[poise::command(slash_command, rename = "import")]
pub async fn import(
    ctx: ApplicationContext<'_>,

    #[rename = "texte"]
    #[description = "Les lignes à importer, séparées par `;`, des tabulations ou des virgules."]
    text: Option<String>,

    #[rename = "fichier"]
    #[description = "Un fichier texte ou CSV à importer."]
    file: Option<Attachment>,

    #[rename = "apercu"]
    #[description = "Afficher le résultat sans rien enregistrer."]
    preview: Option<bool>,
) -> CommandResult {
    let text = match (text, file) {
        (_, Some(file)) => {
            if file.size > MAX_ATTACHMENT_SIZE {
                return Err(user_err(format!(
                    "Le fichier est trop gros ({} Ko, maximum {} Ko).",
                    file.size / 1024,
                    MAX_ATTACHMENT_SIZE / 1024
                )));
            }

            let bytes = file.download().await?;
            String::from_utf8(bytes)
                .map_err(|_| user_err("Le fichier doit être un texte encodé en UTF-8."))?
        }
        (Some(text), None) => text,
        (None, None) => {
            return Err(user_err("Collez le texte à importer ou joignez un fichier."));
        }
    };

    let settings = &ctx.data.settings;
    let existing = sorted_games(&ctx).await?;
    let report = parse_fixtures(&text, &settings.profile, settings.today()).without_duplicates(&existing);

    if preview.unwrap_or(false) || report.fixtures.is_empty() {
        ctx.send(
            CreateReply::default()
                .content(render_report(&report, None))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let summary = ImportReport {
        fixtures: Vec::new(),
        ..report.clone()
    };
    let created = ctx
        .data
        .game_repository
        .create_games(&report.into_new_games())
        .await
        .map_err(|err| internal_err(format!("Impossible d'enregistrer les matchs : {err}")))?;

    tracing::info!("Imported {} games", created.len());

    ctx.send(
        CreateReply::default()
            .content(render_report(&summary, Some(created.len())))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
