use std::io::{self, Write};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::commands::AppContext;
use crate::settings::settings_path;

/// Show effective settings and their sources.
pub(crate) fn run_config_show(ctx: &AppContext) {
    let path = settings_path();

    log::info!(
        "{}",
        "gacha-ledger Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let source = format!("({})", ctx.data_dir_source);
    log::info!(
        "  {} {} {}",
        "data_dir:".if_supports_color(Stdout, |t| t.cyan()),
        ctx.data_dir.display(),
        source.if_supports_color(Stdout, |t| t.dimmed()),
    );

    let http = &ctx.settings.http;
    let timeout = http
        .timeout_secs
        .map(|s| format!("{}s", s))
        .unwrap_or_else(|| "none".to_string());
    log::info!(
        "  {} {}",
        "timeout:".if_supports_color(Stdout, |t| t.cyan()),
        timeout,
    );
    log::info!(
        "  {} {}",
        "user_agent:".if_supports_color(Stdout, |t| t.cyan()),
        http.user_agent.as_deref().unwrap_or("(reqwest default)"),
    );
    log::info!(
        "  {} {}",
        "games:".if_supports_color(Stdout, |t| t.cyan()),
        ctx.registry.keys().join(", "),
    );
}

/// Print the settings file path on stdout, even under `--quiet`.
pub(crate) fn run_config_path() {
    if let Err(e) = write_config_path(&mut std::io::stdout().lock()) {
        log::warn!("Failed to print settings path: {}", e);
    }
}

fn write_config_path(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", settings_path().display())
}
