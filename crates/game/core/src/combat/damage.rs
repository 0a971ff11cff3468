//! Damage scaling, mitigation and critical hits.

/// Scale an attack value by an action multiplier, flooring the result.
pub fn scale(attack: u32, multiplier: f64) -> u32 {
    let scaled = (f64::from(attack) * multiplier).floor();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}

/// Critical hit damage: ×1.5, floored.
pub fn critical(damage: u32) -> u32 {
    let boosted = u64::from(damage) * 3 / 2;
    boosted.min(u64::from(u32::MAX)) as u32
}

/// Reduce an incoming monster hit by the defender's endurance and guard.
///
/// # Formula
///
/// ```text
/// reduction = min(endurance / 3, damage - 1)
/// damage    = damage - reduction
/// damage    = damage / 2        if guarding
/// damage    = max(damage, 1)
/// ```
pub fn mitigate(damage: u32, endurance: u32, guarding: bool) -> u32 {
    let reduction = (endurance / 3).min(damage.saturating_sub(1));
    let mut reduced = damage - reduction;
    if guarding {
        reduced /= 2;
    }
    reduced.max(1)
}

/// Riposte counter-attack damage: half the attack value, at least 1.
pub fn riposte(attack: u32) -> u32 {
    (attack / 2).max(1)
}
