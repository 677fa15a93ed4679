use std::fmt::Write;

use poise::CreateReply;

use crate::{
    commands::{sorted_games, ApplicationContext, CommandResult},
    projection::{filter_upcoming, roster_stats, RosterStats},
    utils::formatting::truncate_message,
};

/// Games listed under the club-wide figures, least staffed first.
const LISTED_GAMES: usize = 15;

fn render_stats(stats: &RosterStats) -> String {
    let mut content = format!(
        "# Remplissage des matchs à domicile\n\
         {} match(s) · {}/{} postes pourvus · **{} %**\n",
        stats.home_games, stats.filled, stats.target, stats.percent
    );

    for game in stats.games.iter().take(LISTED_GAMES) {
        let marker = if game.occupancy.fully_staffed {
            "✅"
        } else {
            "⚠️"
        };
        let _ = writeln!(
            content,
            " - {marker} `#{}` {} · {}/{} ({} %)",
            game.id,
            game.label,
            game.occupancy.filled,
            game.occupancy.target,
            game.occupancy.percent
        );
    }

    truncate_message(content)
}

/// Taux de remplissage des postes de bénévoles.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "stats")]
pub async fn stats(ctx: ApplicationContext<'_>) -> CommandResult {
    let games = filter_upcoming(sorted_games(&ctx).await?, ctx.data.settings.now_local());
    let stats = roster_stats(&games);

    ctx.send(
        CreateReply::default()
            .content(render_stats(&stats))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
