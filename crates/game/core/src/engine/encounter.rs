//! The encounter state machine.
//!
//! [`Encounter`] exclusively borrows the player and owns the monster for its
//! whole lifetime. [`Encounter::advance`] executes exactly one
//! [`TurnPhase`]; [`Encounter::run`] advances until a terminal phase.

use tracing::{debug, info, warn};

use super::events::{Actor, CombatEvent, EventSink, Strike, Vitals};
use super::hook::CombatantObserver;
use super::phase::{Outcome, TurnPhase};
use super::provider::{ActionProvider, ActionRequest, AutoPilot, MenuOption, Selection};
use crate::action::{Action, Consumable, actions_for, player_specials, roll_proc, stance_bonus};
use crate::ai::{self, MonsterDecision};
use crate::combat::{self, resolve_hit};
use crate::config::CombatConfig;
use crate::env::{EquipmentOracle, RandomSource, WeaponCategory};
use crate::error::{GameError, SelectionError, SnapshotError};
use crate::progression;
use crate::state::{Combatant, Monster, SpecialAttackTable};
use crate::stats::{self, StatsSnapshot};
use crate::status::{StatusEffect, StatusEffectKind, StatusEffects, StatusFlags, TickReport};

/// Where an encounter takes place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterKind {
    Room { tier: u32 },
    Boss,
}

/// Data handed to the progression collaborator after a victory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub xp: u32,
}

/// Final result of an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterResult {
    pub outcome: Outcome,
    /// Present on victory only.
    pub reward: Option<Reward>,
    pub turns: u32,
    /// Total damage the player dealt to the monster.
    pub damage_dealt: u32,
    /// Consumables used, in order, for the inventory to debit.
    pub consumed: Vec<Consumable>,
}

/// Read-only collaborators an encounter consults.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    pub equipment: &'a dyn EquipmentOracle,
    pub config: &'a CombatConfig,
}

impl<'a> CombatEnv<'a> {
    pub fn new(equipment: &'a dyn EquipmentOracle, config: &'a CombatConfig) -> Self {
        Self { equipment, config }
    }
}

/// Mutable collaborators driven during an encounter.
pub struct CombatPorts<'p> {
    pub rng: &'p mut dyn RandomSource,
    pub provider: &'p mut dyn ActionProvider,
    pub sink: &'p mut dyn EventSink,
    pub observer: Option<&'p mut dyn CombatantObserver>,
}

impl<'p> CombatPorts<'p> {
    pub fn new(
        rng: &'p mut dyn RandomSource,
        provider: &'p mut dyn ActionProvider,
        sink: &'p mut dyn EventSink,
    ) -> Self {
        Self {
            rng,
            provider,
            sink,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: &'p mut dyn CombatantObserver) -> Self {
        self.observer = Some(observer);
        self
    }
}

/// A validated player choice waiting to be resolved.
#[derive(Clone, Debug, PartialEq)]
enum PlayerChoice {
    Weapon(Action),
    Special(usize),
    Item(Consumable),
    Flee,
}

/// One fight between the player and a single monster.
pub struct Encounter<'a> {
    player: &'a mut Combatant,
    monster: Monster,
    kind: EncounterKind,
    env: CombatEnv<'a>,

    player_status: StatusEffects,
    specials: SpecialAttackTable,
    carried: Vec<Consumable>,
    consumed: Vec<Consumable>,

    phase: TurnPhase,
    turn: u32,
    guarding: bool,
    riposte_armed: bool,
    player_stunned: bool,
    damage_dealt: u32,
    pending_player: Option<PlayerChoice>,
    pending_monster: Option<MonsterDecision>,
}

impl<'a> Encounter<'a> {
    /// Starts an encounter after validating both snapshots. Every monster
    /// special starts off cooldown.
    pub fn new(
        player: &'a mut Combatant,
        mut monster: Monster,
        kind: EncounterKind,
        env: CombatEnv<'a>,
    ) -> Result<Self, SnapshotError> {
        player.validate()?;
        monster.validate()?;
        monster.specials.reset_cooldowns();

        if let Some(id) = player.loadout.weapon.as_deref()
            && env.equipment.weapon(id).is_none()
        {
            warn!(weapon = id, "unknown weapon id, using class default");
        }

        Ok(Self {
            player,
            monster,
            kind,
            env,
            player_status: StatusEffects::empty(),
            specials: player_specials(),
            carried: Vec::new(),
            consumed: Vec::new(),
            phase: TurnPhase::TurnStart,
            turn: 0,
            guarding: false,
            riposte_armed: false,
            player_stunned: false,
            damage_dealt: 0,
            pending_player: None,
            pending_monster: None,
        })
    }

    /// Consumables the player carries into this encounter.
    pub fn with_consumables(mut self, items: impl IntoIterator<Item = Consumable>) -> Self {
        self.carried = items.into_iter().collect();
        self
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn player(&self) -> &Combatant {
        self.player
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn player_status(&self) -> &StatusEffects {
        &self.player_status
    }

    pub fn damage_dealt(&self) -> u32 {
        self.damage_dealt
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Runs complete turns until a terminal phase is reached.
    pub fn run(&mut self, ports: &mut CombatPorts<'_>) -> EncounterResult {
        if self.turn == 0 && self.phase == TurnPhase::TurnStart {
            ports.sink.emit(CombatEvent::EncounterStarted {
                monster: self.monster.name.clone(),
                level: self.monster.level(),
                boss: self.monster.boss,
                monster_vitals: self.monster_vitals(),
                player_vitals: self.player_vitals(),
            });
        }

        while !self.phase.is_terminal() {
            self.advance(ports);
        }

        let result = self.result();
        if let Some(observer) = ports.observer.as_deref_mut() {
            observer.on_encounter_end(self.player, &result);
        }
        result
    }

    /// Executes the current phase and moves to the next one.
    ///
    /// Returns the phase entered. Advancing a finished encounter is a no-op.
    pub fn advance(&mut self, ports: &mut CombatPorts<'_>) -> TurnPhase {
        if self.phase.is_terminal() {
            return self.phase;
        }

        let next = match self.phase {
            TurnPhase::TurnStart => self.turn_start(),
            TurnPhase::StatusTick => self.status_tick(ports),
            TurnPhase::PlayerActionSelect => self.player_select(ports),
            TurnPhase::PlayerActionResolve => self.player_resolve(ports),
            TurnPhase::VictoryCheck => self.victory_check(),
            TurnPhase::SkipIfStunned => self.skip_stunned(ports),
            TurnPhase::MonsterActionSelect => self.monster_select(ports),
            TurnPhase::MonsterActionResolve => self.monster_resolve(ports),
            TurnPhase::DefeatCheck => self.defeat_check(),
            TurnPhase::TurnEnd => self.turn_end(ports),
            terminal => terminal,
        };

        debug!(turn = self.turn, from = %self.phase, to = %next, "phase transition");
        self.phase = next;
        ports.sink.emit(CombatEvent::PhaseEntered {
            turn: self.turn,
            phase: next,
        });

        if let Some(outcome) = next.outcome() {
            info!(
                monster = %self.monster.name,
                %outcome,
                turns = self.turn,
                "encounter finished"
            );
            ports.sink.emit(CombatEvent::EncounterEnded {
                outcome,
                turns: self.turn,
            });
        }
        next
    }

    /// Result snapshot; the reward is only present after a victory.
    pub fn result(&self) -> EncounterResult {
        let outcome = self.phase.outcome().unwrap_or(Outcome::Fled);
        let reward = (outcome == Outcome::Victory).then(|| Reward {
            xp: progression::reward_xp(self.kind),
        });
        EncounterResult {
            outcome,
            reward,
            turns: self.turn,
            damage_dealt: self.damage_dealt,
            consumed: self.consumed.clone(),
        }
    }

    // ========================================================================
    // Phases
    // ========================================================================

    fn turn_start(&mut self) -> TurnPhase {
        self.turn += 1;
        TurnPhase::StatusTick
    }

    fn status_tick(&mut self, ports: &mut CombatPorts<'_>) -> TurnPhase {
        let report = self.monster.status.tick(self.monster.max_hp());
        for tick in &report.ticks {
            self.monster.take_damage(tick.damage);
            ports.sink.emit(CombatEvent::StatusTick {
                actor: Actor::Monster,
                kind: tick.kind,
                damage: tick.damage,
                vitals: self.monster_vitals(),
            });
        }
        emit_expired(ports.sink, Actor::Monster, &report);
        if !self.monster.is_alive() {
            return TurnPhase::Victory;
        }

        let report = self.player_status.tick(self.player.max_hp());
        for tick in &report.ticks {
            self.player.take_damage(tick.damage);
            ports.sink.emit(CombatEvent::StatusTick {
                actor: Actor::Player,
                kind: tick.kind,
                damage: tick.damage,
                vitals: self.player_vitals(),
            });
        }
        emit_expired(ports.sink, Actor::Player, &report);
        if !self.player.is_alive() {
            return TurnPhase::Defeat;
        }

        self.monster.specials.tick_cooldowns();
        self.specials.tick_cooldowns();

        let regen = stats::transformation_regen(self.player, self.env.config);
        if regen > 0 {
            let amount = self.player.heal(regen);
            ports.sink.emit(CombatEvent::Regenerated {
                amount,
                vitals: self.player_vitals(),
            });
        }

        TurnPhase::PlayerActionSelect
    }

    fn player_select(&mut self, ports: &mut CombatPorts<'_>) -> TurnPhase {
        if self.player_stunned {
            self.player_stunned = false;
            ports.sink.emit(CombatEvent::ActionForfeited {
                actor: Actor::Player,
            });
            return TurnPhase::VictoryCheck;
        }

        let choice = self.request_choice(ports);
        self.pending_player = Some(choice);
        TurnPhase::PlayerActionResolve
    }

    fn player_resolve(&mut self, ports: &mut CombatPorts<'_>) -> TurnPhase {
        let Some(choice) = self.pending_player.take() else {
            return TurnPhase::VictoryCheck;
        };

        match choice {
            PlayerChoice::Weapon(action) if action.is_defensive() => self.take_stance(action, ports),
            PlayerChoice::Weapon(action) => self.weapon_attack(action, ports),
            PlayerChoice::Special(index) => self.special_attack(index, ports),
            PlayerChoice::Item(item) => self.use_item(item, ports),
            PlayerChoice::Flee => {
                if self.damage_dealt == 0 {
                    return TurnPhase::Fled;
                }
                ports.sink.emit(CombatEvent::FleeRejected);
            }
        }
        TurnPhase::VictoryCheck
    }

    fn victory_check(&mut self) -> TurnPhase {
        if !self.monster.is_alive() {
            TurnPhase::Victory
        } else if self.monster.is_stunned() {
            TurnPhase::SkipIfStunned
        } else {
            TurnPhase::MonsterActionSelect
        }
    }

    fn skip_stunned(&mut self, ports: &mut CombatPorts<'_>) -> TurnPhase {
        self.monster.status.remove(StatusEffectKind::Stun);
        ports.sink.emit(CombatEvent::ActionForfeited {
            actor: Actor::Monster,
        });
        TurnPhase::DefeatCheck
    }

    fn monster_select(&mut self, ports: &mut CombatPorts<'_>) -> TurnPhase {
        let decision = ai::select_action(&mut self.monster, &mut *ports.rng, self.env.config);
        self.pending_monster = Some(decision);
        TurnPhase::MonsterActionResolve
    }

    fn monster_resolve(&mut self, ports: &mut CombatPorts<'_>) -> TurnPhase {
        let Some(decision) = self.pending_monster.take() else {
            return TurnPhase::DefeatCheck;
        };

        for effect in &decision.self_effects {
            self.afflict_monster(*effect, ports);
        }

        let defense = self.player_defense();
        let outcome = resolve_hit(
            decision.damage,
            defense,
            0.0,
            &mut *ports.rng,
            self.env.config,
        );
        let label = decision
            .label
            .clone()
            .unwrap_or_else(|| "Attack".to_string());

        if outcome.hit {
            let damage = combat::mitigate(
                outcome.damage,
                self.player.total_endurance(),
                self.guarding,
            );
            self.player.take_damage(damage);
            ports.sink.emit(CombatEvent::Attack {
                actor: Actor::Monster,
                label,
                strike: Strike::Hit {
                    damage,
                    critical: false,
                },
                target: self.player_vitals(),
            });

            for effect in decision.effects {
                if self.player_status.apply(effect) {
                    ports.sink.emit(CombatEvent::EffectApplied {
                        target: Actor::Player,
                        effect,
                    });
                }
            }
            if decision.stuns_player {
                self.player_stunned = true;
                ports.sink.emit(CombatEvent::PlayerStunned);
            }
        } else {
            ports.sink.emit(CombatEvent::Attack {
                actor: Actor::Monster,
                label,
                strike: Strike::Miss,
                target: self.player_vitals(),
            });
            self.try_riposte(ports);
        }

        TurnPhase::DefeatCheck
    }

    fn defeat_check(&mut self) -> TurnPhase {
        if !self.player.is_alive() {
            TurnPhase::Defeat
        } else if !self.monster.is_alive() {
            // riposte kill
            TurnPhase::Victory
        } else {
            TurnPhase::TurnEnd
        }
    }

    fn turn_end(&mut self, ports: &mut CombatPorts<'_>) -> TurnPhase {
        self.guarding = false;
        self.player_status.remove(StatusEffectKind::DefenseBuff);
        if let Some(observer) = ports.observer.as_deref_mut() {
            observer.on_turn_end(self.player, self.turn);
        }
        TurnPhase::TurnStart
    }

    // ========================================================================
    // Player actions
    // ========================================================================

    fn take_stance(&mut self, action: Action, ports: &mut CombatPorts<'_>) {
        let snapshot = self.player_stats();
        let class_bonus = stats::action_bonus(self.player, action.kind, self.env.config);
        let bonus = stance_bonus(snapshot.defense, action.defense_multiplier, class_bonus);

        self.player_status
            .apply(StatusEffect::new(StatusEffectKind::DefenseBuff, 1, bonus));
        self.guarding = true;
        self.riposte_armed = snapshot.weapon.category == WeaponCategory::Sword;

        ports.sink.emit(CombatEvent::Stance {
            label: action.label,
            defense_bonus: bonus,
            riposte_armed: self.riposte_armed,
        });
    }

    fn weapon_attack(&mut self, action: Action, ports: &mut CombatPorts<'_>) {
        let snapshot = self.player_stats();
        let attack = combat::scale(snapshot.attack, action.attack_multiplier)
            + stats::action_bonus(self.player, action.kind, self.env.config);
        let defense = self.monster.effective_defense();
        let outcome = resolve_hit(
            attack,
            defense,
            action.hit_delta,
            &mut *ports.rng,
            self.env.config,
        );

        if !outcome.hit {
            ports.sink.emit(CombatEvent::Attack {
                actor: Actor::Player,
                label: action.label.to_string(),
                strike: Strike::Miss,
                target: self.monster_vitals(),
            });
            return;
        }

        let crit_chance = f64::from(stats::crit_chance_percent(self.player, self.env.config)) / 100.0;
        let critical = ports.rng.chance(crit_chance);
        let damage = if critical {
            combat::critical(outcome.damage)
        } else {
            outcome.damage
        };
        self.damage_monster(damage);
        ports.sink.emit(CombatEvent::Attack {
            actor: Actor::Player,
            label: action.label.to_string(),
            strike: Strike::Hit { damage, critical },
            target: self.monster_vitals(),
        });

        if let Some(effect) = roll_proc(
            snapshot.weapon.category,
            action.kind,
            self.monster.armored_defense(),
            &mut *ports.rng,
        ) {
            self.afflict_monster(effect, ports);
        }
    }

    fn special_attack(&mut self, index: usize, ports: &mut CombatPorts<'_>) {
        let base = self.player_stats().attack;
        let Some(special) = self.specials.trigger(index).cloned() else {
            return;
        };

        let defense = self.monster.effective_defense();
        let outcome = resolve_hit(
            special.damage_for(base),
            defense,
            0.0,
            &mut *ports.rng,
            self.env.config,
        );

        if outcome.hit {
            self.damage_monster(outcome.damage);
        }
        ports.sink.emit(CombatEvent::Attack {
            actor: Actor::Player,
            label: special.name.clone(),
            strike: if outcome.hit {
                Strike::Hit {
                    damage: outcome.damage,
                    critical: false,
                }
            } else {
                Strike::Miss
            },
            target: self.monster_vitals(),
        });

        if outcome.hit {
            for effect in special.effects {
                self.afflict_monster(effect, ports);
            }
        }
    }

    fn use_item(&mut self, item: Consumable, ports: &mut CombatPorts<'_>) {
        let Some(position) = self.carried.iter().position(|carried| *carried == item) else {
            return;
        };
        self.carried.remove(position);
        self.consumed.push(item);

        let outcome = item.apply(self.player, &mut self.player_status);
        ports.sink.emit(CombatEvent::ConsumableUsed {
            item,
            outcome,
            vitals: self.player_vitals(),
        });
    }

    fn try_riposte(&mut self, ports: &mut CombatPorts<'_>) {
        if !self.riposte_armed {
            return;
        }
        // the form may have changed since the stance was taken
        let snapshot = self.player_stats();
        if snapshot.weapon.category != WeaponCategory::Sword {
            return;
        }

        self.riposte_armed = false;
        let damage = combat::riposte(snapshot.attack);
        self.damage_monster(damage);
        ports.sink.emit(CombatEvent::Riposte {
            damage,
            target: self.monster_vitals(),
        });
    }

    // ========================================================================
    // Selection
    // ========================================================================

    fn menu(&self) -> Vec<MenuOption> {
        let snapshot = self.player_stats();
        let mut options: Vec<MenuOption> = actions_for(snapshot.weapon.category)
            .iter()
            .copied()
            .map(MenuOption::Weapon)
            .collect();

        options.extend(self.specials.iter().enumerate().map(|(index, special)| {
            MenuOption::Special {
                index,
                name: special.name.clone(),
                cooldown: special.remaining_cooldown(),
            }
        }));

        let mut kinds: Vec<Consumable> = self.carried.clone();
        kinds.sort_unstable();
        kinds.dedup();
        options.extend(kinds.into_iter().map(|item| MenuOption::Item {
            item,
            count: u32::try_from(self.carried.iter().filter(|c| **c == item).count())
                .unwrap_or(u32::MAX),
        }));

        options.push(MenuOption::Flee {
            allowed: self.damage_dealt == 0,
        });
        options
    }

    fn request_choice(&mut self, ports: &mut CombatPorts<'_>) -> PlayerChoice {
        let mut request = ActionRequest {
            turn: self.turn,
            attempt: 0,
            monster_name: self.monster.name.clone(),
            player: self.player_vitals(),
            monster: self.monster_vitals(),
            options: self.menu(),
        };

        for attempt in 0..=self.env.config.max_reprompts {
            request.attempt = attempt;
            match validate(ports.provider.choose(&request), &request.options) {
                Ok(choice) => return choice,
                Err(error) => {
                    warn!(
                        turn = self.turn,
                        attempt,
                        code = error.error_code(),
                        %error,
                        "selection rejected"
                    );
                    ports.sink.emit(CombatEvent::SelectionRejected { error });
                }
            }
        }

        warn!(turn = self.turn, "provider kept failing, auto-pilot takes over");
        ports.sink.emit(CombatEvent::AutoPilotEngaged);
        validate(AutoPilot::new().choose(&request), &request.options)
            .unwrap_or_else(|_| PlayerChoice::Weapon(actions_for(WeaponCategory::Unarmed)[0]))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn player_stats(&self) -> StatsSnapshot {
        StatsSnapshot::capture(self.player, self.env.equipment, self.env.config)
    }

    /// Player defense including the stance buff, recomputed from current HP.
    fn player_defense(&self) -> u32 {
        let base = i64::from(self.player_stats().defense);
        let total = base + i64::from(self.player_status.defense_modifier());
        total.clamp(0, i64::from(u32::MAX)) as u32
    }

    fn damage_monster(&mut self, damage: u32) {
        let lost = self.monster.take_damage(damage);
        self.damage_dealt += lost;
    }

    fn afflict_monster(&mut self, effect: StatusEffect, ports: &mut CombatPorts<'_>) {
        if self.monster.status.apply(effect) {
            ports.sink.emit(CombatEvent::EffectApplied {
                target: Actor::Monster,
                effect,
            });
        }
    }

    fn player_vitals(&self) -> Vitals {
        let mut status = self.player_status.flags();
        if self.player_stunned {
            status |= StatusFlags::STUN;
        }
        Vitals {
            hp: self.player.hp(),
            max_hp: self.player.max_hp(),
            status,
        }
    }

    fn monster_vitals(&self) -> Vitals {
        Vitals {
            hp: self.monster.hp(),
            max_hp: self.monster.max_hp(),
            status: self.monster.status.flags(),
        }
    }
}

/// Maps a provider selection onto the menu it was offered.
fn validate(selection: Selection, options: &[MenuOption]) -> Result<PlayerChoice, SelectionError> {
    let index = match selection {
        Selection::Cancel => return Err(SelectionError::Cancelled),
        Selection::Index(index) => index,
    };
    let option = options.get(index).ok_or(SelectionError::OutOfRange {
        index,
        len: options.len(),
    })?;

    match option {
        MenuOption::Weapon(action) => Ok(PlayerChoice::Weapon(*action)),
        MenuOption::Special {
            name,
            cooldown: remaining @ 1..,
            ..
        } => Err(SelectionError::OnCooldown {
            name: name.clone(),
            remaining: *remaining,
        }),
        MenuOption::Special { index, .. } => Ok(PlayerChoice::Special(*index)),
        MenuOption::Item { count: 0, .. } => Err(SelectionError::NotCarried("consumable")),
        MenuOption::Item { item, .. } => Ok(PlayerChoice::Item(*item)),
        MenuOption::Flee { .. } => Ok(PlayerChoice::Flee),
    }
}

fn emit_expired(sink: &mut dyn EventSink, actor: Actor, report: &TickReport) {
    for kind in StatusEffectKind::DAMAGE_OVER_TIME
        .into_iter()
        .chain(StatusEffectKind::COUNTERS)
        .filter(|kind| report.expired.contains(kind.flag()))
    {
        sink.emit(CombatEvent::StatusExpired { actor, kind });
    }
}
