//! Dungeon combat client binary.
//!
//! Composition root: reads configuration from the environment, installs
//! file logging, loads content, then plays a run with either the terminal
//! menu or the auto-pilot choosing the player's actions.
//!
//! # Examples
//!
//! ```bash
//! # Three tier 1 rooms as a werewolf with a short sword
//! COMBAT_CLASS=werewolf COMBAT_WEAPON=short_sword cargo run -p dungeon-client
//!
//! # Unattended, reproducible boss fight
//! COMBAT_AUTO=1 COMBAT_BOSS=1 COMBAT_LEVEL=20 COMBAT_SEED=7 cargo run -p dungeon-client
//! ```

mod config;
mod input;
mod logging;
mod provider;
mod render;
mod session;

use anyhow::Result;
use combat_core::{AutoPilot, Consumable};

use crate::config::ClientConfig;
use crate::provider::TerminalActionProvider;
use crate::render::TextRenderer;
use crate::session::{Content, Inventory, Session};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging (guard flushes the log file on exit)
    let _log_guard = logging::setup_logging(&config.log)?;

    tracing::info!("Starting dungeon client");
    tracing::info!(
        "Player: {} ({}), run: {:?} x{}",
        config.player.name,
        config.player.class,
        config.run.encounter_kind(),
        config.run.room_count()
    );

    // 3. Content and the starting character
    let content = Content::load(config.run.data_dir.as_deref())?;
    let hero = content.create_hero(&config.player);
    let mut inventory = Inventory::new();
    inventory.add(Consumable::Potion, config.player.potions);

    // 4. Play
    let mut session = Session::new(&content, hero, inventory, config.run.clone());
    let mut renderer = TextRenderer::stdout(config.player.name.clone());

    let summary = if config.run.auto {
        tracing::info!("Auto-pilot requested");
        session.run(&mut AutoPilot::new(), &mut renderer)?
    } else {
        match TerminalActionProvider::new() {
            Ok(mut terminal) => session.run(&mut terminal, &mut renderer)?,
            Err(err) => {
                tracing::warn!("Terminal unavailable ({}), using auto-pilot", err);
                session.run(&mut AutoPilot::new(), &mut renderer)?
            }
        }
    };

    renderer.summary(&summary)?;
    tracing::info!(
        "Potions left: {}",
        session.inventory().count(Consumable::Potion)
    );
    Ok(())
}
