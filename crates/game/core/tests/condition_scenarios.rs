use charstats_core::{
    Character, ConditionKind, MemorySink, StatKind, StatRules, StatsConfig, WriteOutcome,
};

fn character_with_hp(config: &StatsConfig, hp: f32) -> Character<MemorySink> {
    let mut character = Character::with_sink("Aria", config, MemorySink::new());
    let _ = character.set_base(StatKind::Hp, hp);
    character
}

#[test]
fn damage_to_zero_kills_once() {
    let mut character = character_with_hp(&StatsConfig::default(), 10.0);
    assert_eq!(character.condition(), ConditionKind::Healthy);

    let _ = character.damage(10.0);

    assert_eq!(character.stats().effective(StatKind::Hp), 0.0);
    assert_eq!(character.condition(), ConditionKind::Dead);
    assert_eq!(character.sink().messages(), ["character 'Aria' is now DEAD"]);

    // Nothing changed, so a second evaluation is silent.
    assert_eq!(character.evaluate(), None);
    assert_eq!(character.sink().messages().len(), 1);
}

#[test]
fn revive_with_defaults_restores_one_tenth() {
    let mut character = character_with_hp(&StatsConfig::default(), 10.0);
    let _ = character.kill();
    assert!(character.is_dead());

    let transition = character.revive().expect("dead character revives");

    assert_eq!(transition.from, ConditionKind::Dead);
    assert_eq!(transition.to, ConditionKind::Healthy);
    assert_eq!(character.stats().effective(StatKind::Hp), 1.0);
    assert_eq!(character.condition(), ConditionKind::Healthy);
    assert_eq!(character.pending_condition(), None);
}

#[test]
fn revive_into_knockout_at_half() {
    let mut character = character_with_hp(&StatsConfig::default(), 20.0);
    let _ = character.kill();

    let _ = character.revive_with(0.5, ConditionKind::Knockout);

    assert_eq!(character.stats().effective(StatKind::Hp), 10.0);
    assert_eq!(character.condition(), ConditionKind::Knockout);
}

#[test]
fn heal_after_kill_auto_revives() {
    let mut character = character_with_hp(&StatsConfig::default(), 10.0);
    let _ = character.kill();
    assert!(character.is_dead());

    let _ = character.heal(5.0);

    assert_eq!(character.stats().effective(StatKind::Hp), 5.0);
    assert_eq!(character.condition(), ConditionKind::Healthy);
    assert_eq!(
        character.sink().messages(),
        [
            "character 'Aria' is now DEAD",
            "character 'Aria' is now HEALTHY"
        ]
    );
}

#[test]
fn invalid_revives_are_no_ops() {
    let mut character = character_with_hp(&StatsConfig::default(), 10.0);

    // Not dead.
    assert_eq!(character.revive(), None);
    assert_eq!(character.stats().effective(StatKind::Hp), 10.0);

    let _ = character.kill();
    let messages_before = character.sink().messages().len();

    assert_eq!(character.revive_with(0.0, ConditionKind::Healthy), None);
    assert_eq!(character.revive_with(0.5, ConditionKind::Dead), None);

    assert!(character.is_dead());
    assert_eq!(character.stats().effective(StatKind::Hp), 0.0);
    assert_eq!(character.pending_condition(), None);
    assert_eq!(character.sink().messages().len(), messages_before);
}

#[test]
fn revive_uses_configured_target() {
    let config = StatsConfig {
        revive_condition: ConditionKind::Limbo,
        revive_percent: 0.25,
        ..StatsConfig::default()
    };
    let mut character = character_with_hp(&config, 40.0);
    let _ = character.kill();

    let _ = character.revive();

    assert_eq!(character.condition(), ConditionKind::Limbo);
    assert_eq!(character.stats().effective(StatKind::Hp), 10.0);
}

#[test]
fn immutable_stat_ignores_base_write() {
    let config = StatsConfig::with_rules(StatRules::default().with_immutable(StatKind::Str));
    let mut character = Character::with_sink("Brom", &config, MemorySink::new());
    let before = character.stats().base(StatKind::Str);

    let outcome = character.set_base(StatKind::Str, 50.0);

    assert_eq!(outcome, WriteOutcome::Rejected);
    assert_eq!(character.stats().base(StatKind::Str), before);
}

#[test]
fn revive_with_immutable_hp_leaves_no_pending_request() {
    let config = StatsConfig::with_rules(StatRules::default().with_immutable(StatKind::Hp));
    let mut character = Character::with_sink("Cole", &config, MemorySink::new());
    character
        .restore([(
            StatKind::Hp,
            charstats_core::StatRecord::new(6.0, -6.0, Default::default()),
        )])
        .unwrap();
    assert!(character.is_dead());

    assert_eq!(character.revive(), None);
    assert!(character.is_dead());
    assert_eq!(character.pending_condition(), None);
}

#[test]
fn forced_death_request_zeroes_hp() {
    let mut character = character_with_hp(&StatsConfig::default(), 14.0);

    let transition = character.request_condition(ConditionKind::Dead).unwrap();

    assert_eq!(transition.to, ConditionKind::Dead);
    assert_eq!(character.stats().effective(StatKind::Hp), 0.0);
}

#[test]
fn living_request_on_dead_character_lifts_hp() {
    let mut character = character_with_hp(&StatsConfig::default(), 50.0);
    let _ = character.kill();

    let transition = character.request_condition(ConditionKind::Limbo).unwrap();

    assert_eq!(transition.to, ConditionKind::Limbo);
    assert_eq!(character.stats().effective(StatKind::Hp), 5.0);
}

#[test]
fn requesting_current_condition_does_nothing() {
    let mut character = character_with_hp(&StatsConfig::default(), 10.0);
    assert_eq!(character.request_condition(ConditionKind::Healthy), None);
    assert!(character.sink().messages().is_empty());
}

#[test]
fn full_heal_clears_damage_and_revives() {
    let mut character = character_with_hp(&StatsConfig::default(), 12.0);
    let _ = character.damage(20.0);
    assert!(character.is_dead());

    let _ = character.full_heal();

    assert_eq!(character.stats().modifier(StatKind::Hp), 0.0);
    assert_eq!(character.stats().effective(StatKind::Hp), 12.0);
    assert!(character.is_alive());
}

#[test]
fn zero_all_keeps_character_alive() {
    let mut character = character_with_hp(&StatsConfig::default(), 12.0);
    let _ = character.set_base(StatKind::Dex, 15.0);

    character.zero_all();

    assert_eq!(character.stats().base(StatKind::Dex), 0.0);
    assert_eq!(character.stats().base(StatKind::Hp), 1.0);
    assert!(character.is_alive());
}
