//! Plain-text narration of the combat event stream.

use std::io::{self, Write};

use combat_core::{
    Actor, CombatEvent, ConsumableOutcome, Outcome, Strike, TurnPhase, Vitals,
};
use tracing::warn;

use crate::session::{RunEnd, RunSummary};

/// [`combat_core::EventSink`] that prints one line per notable event.
pub struct TextRenderer<W: Write> {
    out: W,
    player: String,
    monster: String,
    failed: bool,
}

impl TextRenderer<io::Stdout> {
    pub fn stdout(player: impl Into<String>) -> Self {
        Self::new(io::stdout(), player)
    }
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, player: impl Into<String>) -> Self {
        Self {
            out,
            player: player.into(),
            monster: String::from("the monster"),
            failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn name(&self, actor: Actor) -> &str {
        match actor {
            Actor::Player => &self.player,
            Actor::Monster => &self.monster,
        }
    }

    /// One line for the event, or `None` for events not worth narrating.
    pub fn describe(&mut self, event: &CombatEvent) -> Option<String> {
        let line = match event {
            CombatEvent::EncounterStarted {
                monster,
                level,
                boss,
                monster_vitals,
                ..
            } => {
                self.monster = monster.clone();
                let title = if *boss { "Boss" } else { "Level" };
                format!(
                    "\n== {monster} ({title} {level}) {} ==",
                    hp_bar(monster_vitals)
                )
            }
            CombatEvent::PhaseEntered {
                turn,
                phase: TurnPhase::TurnStart,
            } => format!("-- Turn {} --", turn + 1),
            CombatEvent::PhaseEntered { .. } => return None,
            CombatEvent::StatusTick {
                actor,
                kind,
                damage,
                vitals,
            } => format!(
                "{} suffers {damage} {kind} damage {}",
                self.name(*actor),
                hp_bar(vitals)
            ),
            CombatEvent::StatusExpired { actor, kind } => {
                format!("{} is no longer affected by {kind}", self.name(*actor))
            }
            CombatEvent::Regenerated { amount, vitals } => {
                format!("{} regenerates {amount} HP {}", self.player, hp_bar(vitals))
            }
            CombatEvent::ActionForfeited { actor } => {
                format!("{} is stunned and loses the turn", self.name(*actor))
            }
            CombatEvent::Attack {
                actor,
                label,
                strike,
                target,
            } => {
                let attacker = self.name(*actor);
                match strike {
                    Strike::Hit {
                        damage,
                        critical: true,
                    } => format!(
                        "{attacker} uses {label}: critical hit for {damage} {}",
                        hp_bar(target)
                    ),
                    Strike::Hit { damage, .. } => {
                        format!("{attacker} uses {label}: {damage} damage {}", hp_bar(target))
                    }
                    Strike::Miss => format!("{attacker} uses {label} and misses"),
                }
            }
            CombatEvent::EffectApplied { target, effect } => format!(
                "{} is afflicted with {} for {} turn(s)",
                self.name(*target),
                effect.kind,
                effect.duration
            ),
            CombatEvent::PlayerStunned => format!("{} is stunned", self.player),
            CombatEvent::Stance {
                label,
                defense_bonus,
                riposte_armed,
            } => {
                let riposte = if *riposte_armed { ", riposte ready" } else { "" };
                format!(
                    "{} takes a {label} stance (+{defense_bonus} defense{riposte})",
                    self.player
                )
            }
            CombatEvent::Riposte { damage, target } => {
                format!("{} ripostes for {damage} {}", self.player, hp_bar(target))
            }
            CombatEvent::ConsumableUsed {
                item,
                outcome,
                vitals,
            } => format!(
                "{} uses {item}{} {}",
                self.player,
                describe_outcome(outcome),
                hp_bar(vitals)
            ),
            CombatEvent::FleeRejected => {
                String::from("You have already drawn blood; there is no escape")
            }
            CombatEvent::SelectionRejected { error } => format!("Cannot do that: {error}"),
            CombatEvent::AutoPilotEngaged => String::from("Auto-pilot takes over this turn"),
            CombatEvent::EncounterEnded { outcome, turns } => match outcome {
                Outcome::Victory => format!("{} is defeated after {turns} turn(s)", self.monster),
                Outcome::Defeat => format!("{} falls after {turns} turn(s)", self.player),
                Outcome::Fled => format!("{} escapes from {}", self.player, self.monster),
            },
        };
        Some(line)
    }

    /// Writes the end-of-run summary.
    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out)?;
        match summary.end {
            RunEnd::Cleared => writeln!(self.out, "Run complete.")?,
            RunEnd::Defeated => writeln!(self.out, "Run over: {} was slain.", self.player)?,
            RunEnd::Quit => writeln!(self.out, "Run abandoned.")?,
            RunEnd::Locked { required } => writeln!(
                self.out,
                "The gate stays shut: level {required} is required."
            )?,
        }
        writeln!(
            self.out,
            "Rooms cleared: {}  Fled: {}  XP gained: {}",
            summary.rooms_cleared, summary.rooms_fled, summary.xp_gained
        )?;
        for level_up in &summary.level_ups {
            writeln!(
                self.out,
                "Reached level {} (+{} max HP, +{} STR, +{} END, +{} AGI)",
                level_up.level,
                level_up.max_hp,
                level_up.strength,
                level_up.endurance,
                level_up.agility
            )?;
        }
        writeln!(
            self.out,
            "{}: level {}, {}/{} HP, {} XP",
            self.player, summary.level, summary.hp, summary.max_hp, summary.xp
        )?;
        self.out.flush()
    }
}

impl<W: Write> combat_core::EventSink for TextRenderer<W> {
    fn emit(&mut self, event: CombatEvent) {
        if self.failed {
            return;
        }
        let Some(line) = self.describe(&event) else {
            return;
        };
        if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!(%err, "narration output failed, muting renderer");
            self.failed = true;
        }
    }
}

fn hp_bar(vitals: &Vitals) -> String {
    if vitals.status.is_empty() {
        format!("[{}/{} HP]", vitals.hp, vitals.max_hp)
    } else {
        let status: Vec<&str> = vitals.status.iter_names().map(|(name, _)| name).collect();
        format!(
            "[{}/{} HP, {}]",
            vitals.hp,
            vitals.max_hp,
            status.join(" ").to_ascii_lowercase()
        )
    }
}

fn describe_outcome(outcome: &ConsumableOutcome) -> String {
    let mut parts = Vec::new();
    if outcome.healed > 0 {
        parts.push(format!("healed {}", outcome.healed));
    }
    if let Some(stat) = outcome.buffed {
        parts.push(format!("{stat} raised"));
    }
    if outcome.cleansed {
        parts.push(String::from("ailments cleansed"));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(": {}", parts.join(", "))
    }
}
