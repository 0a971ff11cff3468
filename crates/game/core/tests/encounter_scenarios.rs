use combat_core::ai::{self, MonsterMove};
use combat_core::engine::HpJournal;
use combat_core::progression::{gain_xp, xp_threshold};
use combat_core::stats::{StatsSnapshot, is_transformed};
use combat_core::{
    Actor, CharacterClass, CombatConfig, CombatEnv, CombatEvent, CombatPorts, Combatant,
    Consumable, Encounter, EncounterKind, Loadout, Monster, Outcome, PcgRng, ScriptedProvider,
    SequenceRng, SpecialAttack, SpecialAttackTable, StaticEquipment, StatusEffect,
    StatusEffectKind, Strike, TurnPhase, WeaponCategory, WeaponDefinition,
};

// Menu layout with no consumables: 3 weapon actions, 5 specials, flee.
const PRECISE: usize = 0;
// Parry with a sword, Dodge with claws
const PARRY: usize = 2;
const STUNNING_BLOW: usize = 4;
const FLEE: usize = 8;

fn hero() -> Combatant {
    Combatant::new("Aria", CharacterClass::Human).with_hp(100, 100)
}

fn dummy(max_hp: u32, attack: u32, defense: u32) -> Monster {
    Monster::new("Training Dummy", 1, max_hp, attack, defense)
}

fn run(
    player: &mut Combatant,
    monster: Monster,
    config: &CombatConfig,
    rng: &mut SequenceRng,
    provider: &mut ScriptedProvider,
) -> (Outcome, Vec<CombatEvent>) {
    let equipment = StaticEquipment::new();
    let mut events = Vec::new();
    let mut encounter = Encounter::new(
        player,
        monster,
        EncounterKind::Room { tier: 1 },
        CombatEnv::new(&equipment, config),
    )
    .expect("valid snapshots");
    let mut ports = CombatPorts::new(rng, provider, &mut events);
    let result = encounter.run(&mut ports);
    (result.outcome, events)
}

/// Advances until `phase` is entered during `turn`, or the fight ends.
fn advance_to(
    encounter: &mut Encounter<'_>,
    ports: &mut CombatPorts<'_>,
    turn: u32,
    phase: TurnPhase,
) {
    while !(encounter.turn() == turn && encounter.phase() == phase) && !encounter.is_finished() {
        encounter.advance(ports);
    }
}

fn player_hits(events: &[CombatEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::Attack {
                actor: Actor::Player,
                strike: Strike::Hit { damage, .. },
                ..
            } => Some(*damage),
            _ => None,
        })
        .collect()
}

#[test]
fn human_without_weapon_attacks_for_twenty_five() {
    let config = CombatConfig::default();
    let snapshot = StatsSnapshot::capture(&hero(), &StaticEquipment::new(), &config);
    assert_eq!(snapshot.attack, 25);
    assert_eq!(snapshot.weapon.name, "Sword");
}

#[test]
fn flee_before_any_damage_ends_the_encounter() {
    let config = CombatConfig::default();
    let mut player = hero();
    let mut rng = SequenceRng::new(vec![0.5]);
    let mut provider = ScriptedProvider::indices([FLEE]);

    let (outcome, events) = run(&mut player, dummy(50, 1, 0), &config, &mut rng, &mut provider);

    assert_eq!(outcome, Outcome::Fled);
    assert!(!events.iter().any(|e| matches!(e, CombatEvent::Attack { .. })));
    assert_eq!(rng.draws(), 0);
}

#[test]
fn flee_after_dealing_damage_is_rejected_and_the_monster_acts() {
    let config = CombatConfig::default().with_max_reprompts(0);
    let mut player = hero();
    let mut rng = SequenceRng::new(vec![0.5]);
    let mut provider = ScriptedProvider::indices([PRECISE, FLEE]);

    let (outcome, events) = run(&mut player, dummy(200, 1, 0), &config, &mut rng, &mut provider);

    // Quick Strike: floor(25 * 0.75) + 2 against defense 0
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::Attack {
            actor: Actor::Player,
            strike: Strike::Hit { damage: 20, critical: false },
            ..
        }
    )));

    let rejected = events
        .iter()
        .position(|e| matches!(e, CombatEvent::FleeRejected))
        .expect("flee was rejected");
    let next_attack = events[rejected..]
        .iter()
        .find(|e| matches!(e, CombatEvent::Attack { .. }));
    assert!(matches!(
        next_attack,
        Some(CombatEvent::Attack { actor: Actor::Monster, .. })
    ));

    // the exhausted script hands control to the auto-pilot, which never flees
    assert!(events.iter().any(|e| matches!(e, CombatEvent::AutoPilotEngaged)));
    assert_eq!(outcome, Outcome::Victory);
}

#[test]
fn poison_ticks_five_percent_for_three_turns() {
    let config = CombatConfig::default();
    let equipment = StaticEquipment::new();
    let mut player = hero();
    let mut monster = dummy(100, 0, 0);
    monster
        .status
        .apply(StatusEffect::new(StatusEffectKind::Poison, 3, 5));

    let mut encounter = Encounter::new(
        &mut player,
        monster,
        EncounterKind::Room { tier: 1 },
        CombatEnv::new(&equipment, &config),
    )
    .expect("valid snapshots");

    // monster always hits, so a parry never arms a riposte kill
    let mut rng = SequenceRng::new(vec![0.0]);
    let mut provider = ScriptedProvider::indices([PARRY; 6]);
    let mut events = Vec::new();
    let mut ports = CombatPorts::new(&mut rng, &mut provider, &mut events);

    let mut hp_after_tick = Vec::new();
    while encounter.turn() < 6 {
        encounter.advance(&mut ports);
        if encounter.phase() == TurnPhase::PlayerActionSelect {
            hp_after_tick.push(encounter.monster().hp());
        }
    }
    drop(ports);

    assert_eq!(hp_after_tick, vec![95, 90, 85, 85, 85]);
    let ticks: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::StatusTick {
                actor: Actor::Monster,
                kind: StatusEffectKind::Poison,
                damage,
                ..
            } => Some(*damage),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, vec![5, 5, 5]);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(
                e,
                CombatEvent::StatusExpired {
                    actor: Actor::Monster,
                    kind: StatusEffectKind::Poison
                }
            ))
            .count(),
        1
    );
}

#[test]
fn stunned_monster_forfeits_its_action() {
    let config = CombatConfig::default().with_max_reprompts(0);
    let mut player = hero();
    let mut rng = SequenceRng::new(vec![0.0]);
    let mut provider = ScriptedProvider::indices([STUNNING_BLOW]);

    let (_, events) = run(&mut player, dummy(500, 1, 0), &config, &mut rng, &mut provider);

    let stun_applied = events
        .iter()
        .position(|e| matches!(
            e,
            CombatEvent::EffectApplied {
                target: Actor::Monster,
                effect: StatusEffect { kind: StatusEffectKind::Stun, .. }
            }
        ))
        .expect("stunning blow landed");
    let forfeit = events
        .iter()
        .position(|e| matches!(e, CombatEvent::ActionForfeited { actor: Actor::Monster }))
        .expect("monster lost its action");
    assert!(forfeit > stun_applied);
    assert!(!events[stun_applied..forfeit]
        .iter()
        .any(|e| matches!(e, CombatEvent::Attack { actor: Actor::Monster, .. })));
}

#[test]
fn parry_ripostes_a_missed_attack() {
    let config = CombatConfig::default().with_max_reprompts(0);
    let equipment = StaticEquipment::new();
    let mut player = hero();
    let mut encounter = Encounter::new(
        &mut player,
        dummy(500, 1, 0),
        EncounterKind::Room { tier: 1 },
        CombatEnv::new(&equipment, &config),
    )
    .expect("valid snapshots");

    // every roll misses: the monster rolls a fear strike that whiffs
    let mut rng = SequenceRng::new(vec![0.99]);
    let mut provider = ScriptedProvider::indices([PARRY, FLEE]);
    let mut events = Vec::new();
    let mut ports = CombatPorts::new(&mut rng, &mut provider, &mut events);

    while encounter.turn() < 3 && !encounter.is_finished() {
        encounter.advance(&mut ports);
    }
    let dealt = encounter.damage_dealt();
    drop(ports);

    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::Stance { label: "Parry", riposte_armed: true, .. }
    )));
    // half of the fresh attack value of 25
    assert!(events.iter().any(|e| matches!(e, CombatEvent::Riposte { damage: 12, .. })));
    assert_eq!(dealt, 12);
    // riposte damage counts, so the flee on turn 2 is refused
    assert!(events.iter().any(|e| matches!(e, CombatEvent::FleeRejected)));
}

#[test]
fn consumables_are_debited_once_per_use() {
    let config = CombatConfig::default().with_max_reprompts(0);
    let equipment = StaticEquipment::new();
    let mut player = Combatant::new("Aria", CharacterClass::Human).with_hp(40, 100);
    let mut encounter = Encounter::new(
        &mut player,
        dummy(30, 1, 0),
        EncounterKind::Room { tier: 2 },
        CombatEnv::new(&equipment, &config),
    )
    .expect("valid snapshots")
    .with_consumables([Consumable::Potion, Consumable::Potion, Consumable::Antidote]);

    // Menu: 3 weapon actions, 5 specials, Potion x2, Antidote x1, flee.
    let mut rng = SequenceRng::new(vec![0.5]);
    let mut provider = ScriptedProvider::indices([8]);
    let mut events = Vec::new();
    let mut ports = CombatPorts::new(&mut rng, &mut provider, &mut events);
    let result = encounter.run(&mut ports);
    drop(ports);

    assert_eq!(result.consumed, vec![Consumable::Potion]);
    assert_eq!(result.outcome, Outcome::Victory);
    assert_eq!(result.reward.map(|r| r.xp), Some(60));
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::ConsumableUsed { item: Consumable::Potion, outcome, .. } if outcome.healed == 20
    )));
}

#[test]
fn observer_sees_every_turn_and_the_end() {
    let config = CombatConfig::default().with_max_reprompts(0);
    let equipment = StaticEquipment::new();
    let mut player = hero();
    let mut journal = HpJournal::default();
    let mut rng = SequenceRng::new(vec![0.5]);
    let mut provider = ScriptedProvider::default();
    let mut sink = combat_core::NullSink;

    let result = {
        let mut encounter = Encounter::new(
            &mut player,
            dummy(60, 1, 0),
            EncounterKind::Boss,
            CombatEnv::new(&equipment, &config),
        )
        .expect("valid snapshots");
        let mut ports =
            CombatPorts::new(&mut rng, &mut provider, &mut sink).with_observer(&mut journal);
        encounter.run(&mut ports)
    };

    assert!(journal.finished);
    assert_eq!(journal.turns.len() as u32, result.turns - 1);
    assert_eq!(result.reward.map(|r| r.xp), Some(600));
}

#[test]
fn exhausted_specials_fall_back_to_the_weighted_split() {
    let config = CombatConfig::default();
    let specials =
        SpecialAttackTable::try_from_attacks([SpecialAttack::new("Venom Bite", -2, 50)])
            .expect("fits");
    let mut monster = Monster::new("Giant Rat", 1, 100, 10, 3).with_specials(specials);
    monster.specials.trigger(0);

    let mut rng = PcgRng::seeded(0x5EED);
    let (mut standard, mut heavy, mut fear) = (0u32, 0u32, 0u32);
    for _ in 0..10_000 {
        match ai::select_action(&mut monster, &mut rng, &config).kind {
            MonsterMove::Standard => standard += 1,
            MonsterMove::HeavyStrike => heavy += 1,
            MonsterMove::FearStrike => fear += 1,
            MonsterMove::Special(_) => panic!("special used while on cooldown"),
        }
    }

    assert!((4_700..=5_300).contains(&standard), "standard {standard}");
    assert!((2_700..=3_300).contains(&heavy), "heavy {heavy}");
    assert!((1_700..=2_300).contains(&fear), "fear {fear}");
}

#[test]
fn repeated_xp_consumes_level_times_fifty() {
    let mut hero = Combatant::new("Aria", CharacterClass::Human);
    let start_max = hero.max_hp();
    let mut spent = 0;
    let mut granted = 0;

    while hero.level() < 10 {
        let before = hero.level();
        gain_xp(&mut hero, 10);
        granted += 10;
        for level in before..hero.level() {
            spent += xp_threshold(level);
        }
    }

    assert_eq!(granted - spent, hero.xp());
    // levels 2..=10 were gained
    assert_eq!(hero.max_hp(), start_max + 9 * 3);
    assert_eq!(hero.stats.strength, 9);
    assert_eq!(hero.stats.endurance, 5);
    assert_eq!(hero.stats.agility, 3);
}

#[test]
fn werewolf_transforms_strictly_below_thirty_percent() {
    let config = CombatConfig::default();
    let wolf = |hp| Combatant::new("Fenra", CharacterClass::Werewolf).with_hp(hp, 100);
    assert!(is_transformed(&wolf(29), &config));
    assert!(!is_transformed(&wolf(30), &config));

    let equipment = StaticEquipment::new();
    let human_form = StatsSnapshot::capture(&wolf(30), &equipment, &config);
    let beast_form = StatsSnapshot::capture(&wolf(29), &equipment, &config);
    assert_eq!(human_form.weapon.name, "Sword (human form)");
    assert_eq!(beast_form.weapon.name, "Claws");
    // floor((25 + 20) * 1.5)
    assert_eq!(beast_form.attack, 67);
}

#[test]
fn fear_strike_stun_costs_the_player_a_turn() {
    let config = CombatConfig::default().with_max_reprompts(0);
    let equipment = StaticEquipment::new();
    let mut player = hero();
    let mut encounter = Encounter::new(
        &mut player,
        dummy(500, 10, 0),
        EncounterKind::Room { tier: 1 },
        CombatEnv::new(&equipment, &config),
    )
    .expect("valid snapshots");

    // fear strike roll, stun roll, hit roll
    let mut rng = SequenceRng::new(vec![0.9, 0.0, 0.0]);
    let mut provider = ScriptedProvider::indices([PARRY, PARRY]);
    let mut events = Vec::new();
    let mut ports = CombatPorts::new(&mut rng, &mut provider, &mut events);
    advance_to(&mut encounter, &mut ports, 3, TurnPhase::StatusTick);
    drop(ports);

    let stunned = events
        .iter()
        .position(|e| matches!(e, CombatEvent::PlayerStunned))
        .expect("fear strike stunned the player");
    let forfeit = events
        .iter()
        .position(|e| matches!(e, CombatEvent::ActionForfeited { actor: Actor::Player }))
        .expect("player lost a turn");
    assert!(forfeit > stunned);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, CombatEvent::ActionForfeited { actor: Actor::Player }))
            .count(),
        1
    );
    // asked on turn 1 only
    assert_eq!(provider.requests(), 1);
}

#[test]
fn damage_over_time_can_win_before_anyone_acts() {
    let config = CombatConfig::default();
    let equipment = StaticEquipment::new();
    let mut player = hero();
    let mut monster = dummy(100, 50, 0).with_hp(3);
    monster.status.apply(StatusEffect::poison(2));

    let mut encounter = Encounter::new(
        &mut player,
        monster,
        EncounterKind::Room { tier: 2 },
        CombatEnv::new(&equipment, &config),
    )
    .expect("valid snapshots");
    let mut rng = SequenceRng::new(vec![0.0]);
    let mut provider = ScriptedProvider::indices([PRECISE]);
    let mut events = Vec::new();
    let mut ports = CombatPorts::new(&mut rng, &mut provider, &mut events);
    let result = encounter.run(&mut ports);
    drop(ports);

    assert_eq!(result.outcome, Outcome::Victory);
    assert_eq!(result.turns, 1);
    assert_eq!(result.reward.map(|r| r.xp), Some(60));
    assert_eq!(provider.requests(), 0);
    assert_eq!(rng.draws(), 0);
    assert!(!events.iter().any(|e| matches!(e, CombatEvent::Attack { .. })));
}

#[test]
fn transformed_werewolf_regenerates_before_choosing() {
    let config = CombatConfig::default();
    let equipment = StaticEquipment::new();
    let mut player = Combatant::new("Fenra", CharacterClass::Werewolf).with_hp(20, 100);
    let mut encounter = Encounter::new(
        &mut player,
        dummy(500, 1, 0),
        EncounterKind::Room { tier: 1 },
        CombatEnv::new(&equipment, &config),
    )
    .expect("valid snapshots");

    let mut rng = SequenceRng::new(vec![0.5]);
    let mut provider = ScriptedProvider::indices([PARRY]);
    let mut events = Vec::new();
    let mut ports = CombatPorts::new(&mut rng, &mut provider, &mut events);
    advance_to(&mut encounter, &mut ports, 1, TurnPhase::PlayerActionSelect);
    let hp = encounter.player().hp();
    drop(ports);

    assert_eq!(hp, 25);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::Regenerated { amount: 5, vitals } if vitals.hp == 25
    )));
}

#[test]
fn frenzy_does_not_inflate_the_stance_bonus() {
    let config = CombatConfig::default();
    let equipment = StaticEquipment::new();
    let mut player = Combatant::new("Fenra", CharacterClass::Werewolf).with_hp(20, 100);
    let mut encounter = Encounter::new(
        &mut player,
        dummy(500, 1, 0),
        EncounterKind::Room { tier: 1 },
        CombatEnv::new(&equipment, &config),
    )
    .expect("valid snapshots");

    let mut rng = SequenceRng::new(vec![0.5]);
    let mut provider = ScriptedProvider::indices([PARRY]);
    let mut events = Vec::new();
    let mut ports = CombatPorts::new(&mut rng, &mut provider, &mut events);
    advance_to(&mut encounter, &mut ports, 1, TurnPhase::VictoryCheck);
    drop(ports);

    // floor(12 * 0.4), nothing from the frenzy
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::Stance { label: "Dodge", defense_bonus: 4, riposte_armed: false }
    )));
}

#[test]
fn axe_chop_can_open_a_bleed() {
    let config = CombatConfig::default();
    let equipment = StaticEquipment::new()
        .with_weapon("hand_axe", WeaponDefinition::new("Hand Axe", 10, WeaponCategory::Axe));
    let mut player = hero().with_loadout(Loadout::new().with_weapon("hand_axe"));
    let mut encounter = Encounter::new(
        &mut player,
        dummy(200, 1, 0),
        EncounterKind::Room { tier: 1 },
        CombatEnv::new(&equipment, &config),
    )
    .expect("valid snapshots");

    // hit, no crit, proc; then the monster's standard attack misses
    let mut rng = SequenceRng::new(vec![0.0, 0.5, 0.0, 0.0, 0.99]);
    let mut provider = ScriptedProvider::indices([PRECISE, PRECISE]);
    let mut events = Vec::new();
    let mut ports = CombatPorts::new(&mut rng, &mut provider, &mut events);
    advance_to(&mut encounter, &mut ports, 2, TurnPhase::PlayerActionSelect);
    let hp = encounter.monster().hp();
    drop(ports);

    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::EffectApplied {
            target: Actor::Monster,
            effect: StatusEffect { kind: StatusEffectKind::Bleed, duration: 2, magnitude: 3 }
        }
    )));
    // Precise Chop: floor(25 * 0.65) + 2, then 3% of 200 at the next tick
    assert_eq!(player_hits(&events), vec![18]);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::StatusTick { actor: Actor::Monster, kind: StatusEffectKind::Bleed, damage: 6, .. }
    )));
    assert_eq!(hp, 200 - 18 - 6);
}

#[test]
fn bow_shred_softens_the_next_hit() {
    let config = CombatConfig::default();
    let equipment = StaticEquipment::new()
        .with_weapon("short_bow", WeaponDefinition::new("Short Bow", 10, WeaponCategory::Bow));
    let mut player = hero().with_loadout(Loadout::new().with_weapon("short_bow"));
    let mut encounter = Encounter::new(
        &mut player,
        dummy(300, 1, 16),
        EncounterKind::Room { tier: 1 },
        CombatEnv::new(&equipment, &config),
    )
    .expect("valid snapshots");

    // turn 1: hit, no crit, proc, monster standard attack misses
    // turn 2: hit, no crit, no proc
    let mut rng = SequenceRng::new(vec![0.0, 0.5, 0.0, 0.0, 0.99, 0.0, 0.5, 0.99]);
    let mut provider = ScriptedProvider::indices([PRECISE, PRECISE]);
    let mut events = Vec::new();
    let mut ports = CombatPorts::new(&mut rng, &mut provider, &mut events);

    advance_to(&mut encounter, &mut ports, 1, TurnPhase::VictoryCheck);
    let shredded = encounter.monster().effective_defense();
    advance_to(&mut encounter, &mut ports, 2, TurnPhase::VictoryCheck);
    drop(ports);

    // max(1, 16 / 8)
    assert_eq!(shredded, 14);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::EffectApplied {
            target: Actor::Monster,
            effect: StatusEffect { kind: StatusEffectKind::ArmorShred, duration: 3, magnitude: 2 }
        }
    )));
    // Aimed Shot attacks for 18: against 16, then against 14
    assert_eq!(player_hits(&events), vec![2, 4]);
}

#[test]
fn monster_venom_ticks_on_the_player() {
    let config = CombatConfig::default().with_max_reprompts(0);
    let equipment = StaticEquipment::new();
    let mut player = hero();
    let specials = SpecialAttackTable::try_from_attacks([
        SpecialAttack::new("Venom Bite", -2, 3).with_effect(StatusEffect::poison(2)),
    ])
    .expect("fits");
    let mut monster = dummy(500, 10, 0).with_specials(specials);
    // left over from an earlier fight; cleared when the encounter starts
    monster.specials.trigger(0);

    let mut encounter = Encounter::new(
        &mut player,
        monster,
        EncounterKind::Room { tier: 1 },
        CombatEnv::new(&equipment, &config),
    )
    .expect("valid snapshots");

    // special gate, pick, hit
    let mut rng = SequenceRng::new(vec![0.0]);
    let mut provider = ScriptedProvider::indices([PARRY, PARRY]);
    let mut events = Vec::new();
    let mut ports = CombatPorts::new(&mut rng, &mut provider, &mut events);
    advance_to(&mut encounter, &mut ports, 2, TurnPhase::PlayerActionSelect);
    let hp = encounter.player().hp();
    drop(ports);

    let applied = events
        .iter()
        .position(|e| matches!(
            e,
            CombatEvent::EffectApplied {
                target: Actor::Player,
                effect: StatusEffect { kind: StatusEffectKind::Poison, .. }
            }
        ))
        .expect("venom bite landed");
    let tick = events
        .iter()
        .position(|e| matches!(
            e,
            CombatEvent::StatusTick { actor: Actor::Player, kind: StatusEffectKind::Poison, damage: 5, .. }
        ))
        .expect("poison ticked on the player");
    assert!(tick > applied);
    // the parried bite deals 1, then 5% of 100
    assert_eq!(hp, 100 - 1 - 5);
}

#[test]
fn stone_skin_shields_the_monster_for_two_turns() {
    let config = CombatConfig::default().with_max_reprompts(0);
    let equipment = StaticEquipment::new();
    let mut player = hero();
    let specials = SpecialAttackTable::try_from_attacks([
        SpecialAttack::new("Stone Skin", -5, 4).with_effect(StatusEffect::shield(2, 6)),
    ])
    .expect("fits");
    let mut encounter = Encounter::new(
        &mut player,
        dummy(500, 10, 0).with_specials(specials),
        EncounterKind::Room { tier: 1 },
        CombatEnv::new(&equipment, &config),
    )
    .expect("valid snapshots");

    let mut rng = SequenceRng::new(vec![0.0]);
    let mut provider = ScriptedProvider::indices([PARRY, PARRY, PARRY]);
    let mut events = Vec::new();
    let mut ports = CombatPorts::new(&mut rng, &mut provider, &mut events);

    advance_to(&mut encounter, &mut ports, 2, TurnPhase::PlayerActionSelect);
    let shielded = encounter.monster().effective_defense();
    advance_to(&mut encounter, &mut ports, 3, TurnPhase::PlayerActionSelect);
    let expired = encounter.monster().effective_defense();
    drop(ports);

    assert_eq!(shielded, 6);
    assert_eq!(expired, 0);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::EffectApplied {
            target: Actor::Monster,
            effect: StatusEffect { kind: StatusEffectKind::Shield, .. }
        }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::StatusExpired { actor: Actor::Monster, kind: StatusEffectKind::Shield }
    )));
    assert!(!events.iter().any(|e| matches!(
        e,
        CombatEvent::EffectApplied { target: Actor::Player, .. }
    )));
}
