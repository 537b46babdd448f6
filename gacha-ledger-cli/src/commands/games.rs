use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gacha_ledger_catalog::Category;
use gacha_ledger_scraper::Registry;

pub(crate) fn run_games(registry: &Registry) {
    log::info!("Configured games:");
    log::info!("");

    for game in &registry.games {
        let aliases = if game.aliases.is_empty() {
            String::new()
        } else {
            format!(
                " ({})",
                game.aliases
                    .join(", ")
                    .if_supports_color(Stdout, |t| t.dimmed())
            )
        };
        log::info!(
            "{} [{}]{}",
            game.key.if_supports_color(Stdout, |t| t.bold()),
            game.name.if_supports_color(Stdout, |t| t.cyan()),
            aliases,
        );

        for category in Category::ALL {
            let config = game.banner_config(category);
            let types: Vec<String> = config.banner_types.iter().map(|t| t.to_string()).collect();
            log::info!(
                "    {}: types {} -> manual/{}",
                category,
                types.join(", "),
                config.manual_file,
            );
        }

        let menus: Vec<String> = game
            .catalog_menus
            .iter()
            .map(|m| format!("{} -> {}", m.menu_id, m.category))
            .collect();
        log::info!("    catalog: {}", menus.join(", "));
    }
}
