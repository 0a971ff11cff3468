//! A run: a sequence of encounters at one tier, with progression applied
//! between them.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use combat_content::{ContentFactory, LoadResult, MonsterCatalog, MonsterFactory, builtin};
use combat_core::progression;
use combat_core::{
    CombatConfig, CombatEnv, CombatPorts, Combatant, Consumable, Encounter, EncounterKind,
    EncounterResult, EquipmentOracle, EventSink, LevelUp, Loadout, Monster, Outcome, PcgRng,
    StaticEquipment,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::config::{PlayerConfig, RunConfig};
use crate::provider::PlayerInput;

/// Everything loaded from content files.
pub struct Content {
    pub config: CombatConfig,
    pub equipment: StaticEquipment,
    pub monsters: MonsterCatalog,
}

impl Content {
    /// Loads from `data_dir`, or the embedded copies when `None`.
    pub fn load(data_dir: Option<&Path>) -> LoadResult<Self> {
        match data_dir {
            Some(dir) => {
                let factory = ContentFactory::new(dir);
                let config = factory.load_config()?;
                let equipment = factory.load_equipment()?;
                let monsters = factory.load_monsters(&equipment)?;
                info!(dir = %dir.display(), "content loaded");
                Ok(Self {
                    config,
                    equipment,
                    monsters,
                })
            }
            None => {
                let equipment = builtin::equipment()?;
                let monsters = builtin::monsters(&equipment)?;
                Ok(Self {
                    config: builtin::config()?,
                    equipment,
                    monsters,
                })
            }
        }
    }

    /// Builds the starting character, skipping armor the catalog doesn't know.
    pub fn create_hero(&self, player: &PlayerConfig) -> Combatant {
        let mut loadout = Loadout::new();
        if let Some(weapon) = &player.weapon {
            loadout = loadout.with_weapon(weapon.clone());
        }
        for id in &player.armor {
            match self.equipment.armor(id) {
                Some(piece) => {
                    if let Some(replaced) = loadout.equip_armor(piece.slot, id.clone()) {
                        warn!(%replaced, slot = %piece.slot, "armor slot given twice");
                    }
                }
                None => warn!(armor = %id, "unknown armor id ignored"),
            }
        }

        Combatant::new(player.name.clone(), player.class)
            .with_level(player.level)
            .with_loadout(loadout)
    }
}

/// Consumable stock carried between encounters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    stock: BTreeMap<Consumable, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Consumable, count: u32) {
        if count > 0 {
            *self.stock.entry(item).or_default() += count;
        }
    }

    pub fn count(&self, item: Consumable) -> u32 {
        self.stock.get(&item).copied().unwrap_or(0)
    }

    /// One entry per carried unit.
    pub fn carried(&self) -> Vec<Consumable> {
        self.stock
            .iter()
            .flat_map(|(item, count)| std::iter::repeat_n(*item, *count as usize))
            .collect()
    }

    /// Removes items an encounter reports as used.
    pub fn debit(&mut self, used: &[Consumable]) {
        for item in used {
            match self.stock.get_mut(item) {
                Some(count) if *count > 1 => *count -= 1,
                Some(_) => {
                    self.stock.remove(item);
                }
                None => warn!(%item, "encounter used an item the inventory lacks"),
            }
        }
    }
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunEnd {
    Cleared,
    Defeated,
    Quit,
    /// The hero is below the level the encounter kind requires.
    Locked { required: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub end: RunEnd,
    pub rooms_cleared: u32,
    pub rooms_fled: u32,
    pub xp_gained: u32,
    pub level_ups: Vec<LevelUp>,
    pub level: u32,
    pub xp: u32,
    pub hp: u32,
    pub max_hp: u32,
}

/// Drives encounters for one hero.
pub struct Session<'c> {
    content: &'c Content,
    hero: Combatant,
    inventory: Inventory,
    settings: RunConfig,
    spawn_rng: StdRng,
    combat_rng: PcgRng,
}

impl<'c> Session<'c> {
    pub fn new(
        content: &'c Content,
        hero: Combatant,
        inventory: Inventory,
        settings: RunConfig,
    ) -> Self {
        let (spawn_rng, combat_rng) = match settings.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                PcgRng::seeded(seed.rotate_left(32) ^ 0x9E37_79B9_7F4A_7C15),
            ),
            None => (StdRng::from_entropy(), PcgRng::from_time()),
        };
        Self {
            content,
            hero,
            inventory,
            settings,
            spawn_rng,
            combat_rng,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn run<P, S>(&mut self, input: &mut P, sink: &mut S) -> Result<RunSummary>
    where
        P: PlayerInput,
        S: EventSink,
    {
        let kind = self.settings.encounter_kind();
        let mut summary = RunSummary {
            end: RunEnd::Cleared,
            rooms_cleared: 0,
            rooms_fled: 0,
            xp_gained: 0,
            level_ups: Vec::new(),
            level: 0,
            xp: 0,
            hp: 0,
            max_hp: 0,
        };

        let required = progression::required_level(kind);
        if self.hero.level() < required {
            warn!(level = self.hero.level(), required, ?kind, "encounter locked");
            summary.end = RunEnd::Locked { required };
            return Ok(self.finish(summary));
        }

        let rooms = self.settings.room_count();
        for room in 1..=rooms {
            let monster = self.spawn(kind)?;
            info!(room, rooms, monster = %monster.name, "entering room");

            let result = self.fight(monster, kind, input, sink)?;
            summary.level_ups.extend(self.settle(&result));

            match result.outcome {
                Outcome::Victory => {
                    summary.rooms_cleared += 1;
                    summary.xp_gained += result.reward.map_or(0, |reward| reward.xp);
                }
                Outcome::Fled => summary.rooms_fled += 1,
                Outcome::Defeat => {
                    summary.end = RunEnd::Defeated;
                    break;
                }
            }

            if input.wants_to_quit() && room < rooms {
                summary.end = RunEnd::Quit;
                break;
            }
        }

        Ok(self.finish(summary))
    }

    fn spawn(&mut self, kind: EncounterKind) -> Result<Monster> {
        let factory = MonsterFactory::new(&self.content.monsters, &self.content.equipment);
        match kind {
            EncounterKind::Boss => Ok(factory.boss()),
            EncounterKind::Room { tier } => factory
                .spawn_for_tier(tier, &mut self.spawn_rng)
                .ok_or_else(|| anyhow!("no monster template for tier {tier}")),
        }
    }

    fn fight<P, S>(
        &mut self,
        monster: Monster,
        kind: EncounterKind,
        input: &mut P,
        sink: &mut S,
    ) -> Result<EncounterResult>
    where
        P: PlayerInput,
        S: EventSink,
    {
        let env = CombatEnv::new(&self.content.equipment, &self.content.config);
        let mut encounter = Encounter::new(&mut self.hero, monster, kind, env)
            .context("failed to start encounter")?
            .with_consumables(self.inventory.carried());
        let mut ports = CombatPorts::new(&mut self.combat_rng, input, sink);
        Ok(encounter.run(&mut ports))
    }

    /// Post-encounter bookkeeping: inventory debit, XP and buff expiry.
    fn settle(&mut self, result: &EncounterResult) -> Vec<LevelUp> {
        self.inventory.debit(&result.consumed);

        let level_ups = match result.reward {
            Some(reward) => progression::gain_xp(&mut self.hero, reward.xp),
            None => Vec::new(),
        };

        if self.hero.expire_buffs_after_encounter() {
            info!(name = %self.hero.name, "tonic effects wore off");
        }
        level_ups
    }

    fn finish(&self, mut summary: RunSummary) -> RunSummary {
        summary.level = self.hero.level();
        summary.xp = self.hero.xp();
        summary.hp = self.hero.hp();
        summary.max_hp = self.hero.max_hp();
        info!(end = ?summary.end, cleared = summary.rooms_cleared, "run finished");
        summary
    }
}
