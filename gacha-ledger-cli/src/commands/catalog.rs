use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gacha_ledger_import::refresh_catalogs;
use gacha_ledger_scraper::HttpClient;

use crate::commands::{AppContext, build_runtime, select_games};
use crate::error::CliError;
use crate::spinner::Spinner;

/// Refresh the catalog mirrors of the selected games.
pub(crate) fn run_catalog(ctx: &AppContext, game: Option<String>) -> Result<(), CliError> {
    let Some(games) = select_games(&ctx.registry, game.as_deref()) else {
        return Ok(());
    };

    let client = HttpClient::new(&ctx.settings.client_options())?;
    let rt = build_runtime()?;
    let spinner = Spinner::new(ctx.quiet);
    let report = rt.block_on(refresh_catalogs(&client, &games, &ctx.data_dir, &spinner));
    spinner.finish();

    log::info!("");
    for outcome in &report.menus {
        match &outcome.result {
            Ok(summary) => log::info!(
                "  {} {}/{}: {} entries -> {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                outcome.game,
                outcome.menu_id,
                summary.entries,
                summary
                    .path
                    .display()
                    .if_supports_color(Stdout, |t| t.cyan()),
            ),
            Err(e) => log::warn!(
                "  {} {}/{}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                outcome.game,
                outcome.menu_id,
                e,
            ),
        }
    }

    log::info!("");
    log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  {} mirrors written", report.written());
    if report.failed() > 0 {
        log::warn!("  {} mirrors failed", report.failed());
    }

    Ok(())
}
