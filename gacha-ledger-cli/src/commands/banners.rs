use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gacha_ledger_import::{
    CategoryOutcome, GameOutcome, HarvestOptions, ReconcileAction, RunReport, harvest_games,
};
use gacha_ledger_scraper::HttpClient;

use crate::commands::{AppContext, build_runtime, select_games};
use crate::error::CliError;
use crate::spinner::Spinner;

/// Run the banners command.
pub(crate) fn run_banners(
    ctx: &AppContext,
    game: Option<String>,
    dry_run: bool,
    report_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let Some(games) = select_games(&ctx.registry, game.as_deref()) else {
        return Ok(());
    };

    let client = HttpClient::new(&ctx.settings.client_options())?;
    let options = HarvestOptions {
        data_dir: ctx.data_dir.clone(),
        dry_run,
    };

    log::info!(
        "Banner histories in {}{}",
        ctx.data_dir
            .join("manual")
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
        if dry_run {
            format!(" {}", "(dry run)".if_supports_color(Stdout, |t| t.yellow()))
        } else {
            String::new()
        },
    );
    log::info!("");

    let rt = build_runtime()?;
    let spinner = Spinner::new(ctx.quiet);
    let report = rt.block_on(harvest_games(&client, &games, &options, &spinner));
    spinner.finish();

    print_report(&report, dry_run);

    if let Some(path) = report_path {
        match report.write_to_file(&path) {
            Ok(()) => log::info!("Run report written to {}", path.display()),
            Err(e) => log::warn!("Failed to write run report to {}: {}", path.display(), e),
        }
    }

    Ok(())
}

fn print_report(report: &RunReport, dry_run: bool) {
    log::info!("");
    for game in &report.games {
        print_game(game, dry_run);
    }

    let summary = report.summary();
    log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  {} {} games processed, {} records appended, {} replaced",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.games_ok,
        summary.appended,
        summary.replaced,
    );
    if summary.games_failed > 0 {
        log::warn!(
            "  {} {} games failed",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            summary.games_failed,
        );
    }
    if summary.banner_failures > 0 {
        log::warn!(
            "  {} {} banners could not be fetched",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            summary.banner_failures,
        );
    }
    if summary.store_failures > 0 {
        log::warn!(
            "  {} {} history files could not be updated",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            summary.store_failures,
        );
    }
    if dry_run && (summary.appended > 0 || summary.replaced > 0) {
        log::info!(
            "  {}",
            "Dry run: no files were written".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

fn print_game(game: &GameOutcome, dry_run: bool) {
    let report = match &game.result {
        Ok(report) => report,
        Err(e) => {
            log::error!(
                "{} {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                game.name.if_supports_color(Stdout, |t| t.bold()),
                e,
            );
            log::info!("");
            return;
        }
    };

    log::info!("{}", game.name.if_supports_color(Stdout, |t| t.bold()));
    for category in &report.categories {
        print_category(category, dry_run);
    }
    log::info!("");
}

fn print_category(category: &CategoryOutcome, dry_run: bool) {
    let label = format!("{}:", category.category);
    match &category.reconcile {
        None => {
            log::info!(
                "  {} {}",
                label.if_supports_color(Stdout, |t| t.cyan()),
                "no banners observed".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        Some(Err(e)) => {
            log::error!(
                "  {} {} {}",
                label.if_supports_color(Stdout, |t| t.cyan()),
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
        }
        Some(Ok(result)) => {
            log::info!(
                "  {} {} observed, {} appended, {} replaced, {} unchanged ({} records)",
                label.if_supports_color(Stdout, |t| t.cyan()),
                category.observed,
                result.stats.appended,
                result.stats.replaced,
                result.stats.unchanged,
                result.total_records,
            );
            for detail in &result.details {
                let marker = match detail.action {
                    ReconcileAction::Appended => "+",
                    ReconcileAction::Replaced { .. } => "~",
                    ReconcileAction::Unchanged => continue,
                };
                let line = format!(
                    "    {} {} ~ {} {} (5\u{2605} {})",
                    marker, detail.from, detail.to, detail.name, detail.five
                );
                if dry_run {
                    log::info!("{}", line);
                } else {
                    log::debug!("{}", line);
                }
            }
        }
    }

    for failure in &category.failures {
        log::warn!(
            "    {} {}: {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            failure.banner,
            failure.error,
        );
    }
}
