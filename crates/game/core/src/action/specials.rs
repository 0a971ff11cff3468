use crate::state::{SpecialAttack, SpecialAttackTable};
use crate::status::{StatusEffect, StatusEffectKind};

/// The player's fixed special attacks, all off cooldown.
///
/// Index order is stable: basic, stun, poison, burn, bleed.
pub fn player_specials() -> SpecialAttackTable {
    let attacks = [
        SpecialAttack::new("Punch", 0, 0),
        SpecialAttack::new("Stunning Blow", -5, 3).with_effect(StatusEffect::stun(1)),
        SpecialAttack::new("Poisoned Strike", -3, 4).with_effect(StatusEffect::poison(3)),
        SpecialAttack::new("Fire Strike", -2, 5).with_effect(StatusEffect::burn(4)),
        SpecialAttack::new("Bleeding Strike", -1, 3).with_effect(StatusEffect::bleed(
            2,
            StatusEffectKind::Bleed.default_magnitude(),
        )),
    ];

    let mut table = SpecialAttackTable::new();
    for attack in attacks {
        table.push(attack);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_specials_in_stable_order() {
        let table = player_specials();
        let names: Vec<&str> = table.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Punch",
                "Stunning Blow",
                "Poisoned Strike",
                "Fire Strike",
                "Bleeding Strike"
            ]
        );
        assert_eq!(table.available().len(), 5);
    }

    #[test]
    fn special_effects_match_their_names() {
        let table = player_specials();
        assert!(table.get(0).is_some_and(|a| a.effects.is_empty()));
        assert!(table.get(1).is_some_and(SpecialAttack::inflicts_stun));
        assert_eq!(
            table.get(2).and_then(|a| a.effects.first().copied()),
            Some(StatusEffect::new(StatusEffectKind::Poison, 3, 5))
        );
        assert_eq!(
            table.get(3).and_then(|a| a.effects.first().copied()),
            Some(StatusEffect::new(StatusEffectKind::Burn, 4, 3))
        );
        assert_eq!(
            table.get(4).and_then(|a| a.effects.first().copied()),
            Some(StatusEffect::new(StatusEffectKind::Bleed, 2, 4))
        );
    }
}
