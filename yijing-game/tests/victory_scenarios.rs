use yijing_game::{
    ConfigProvider, GameConfig, InitialResources, Player, ResourceCaps, VictoryCondition,
    VictoryRegistry, VictoryThresholds, VictoryTracker, evaluate,
};

fn player_with(merit: u32, yin: u32, yang: u32) -> Player {
    let initial = InitialResources {
        qi: 0,
        merit,
        sincerity: 0,
        yin,
        yang,
        ..InitialResources::default()
    };
    Player::new("Confucius", &initial, &ResourceCaps::default())
}

#[test]
fn merit_at_default_threshold_wins() {
    let thresholds = VictoryThresholds::default();
    let won = evaluate(
        &player_with(12, 0, 0),
        &VictoryTracker::default(),
        &thresholds,
    );
    assert!(won.contains(&VictoryCondition::GreatDao));

    let won = evaluate(
        &player_with(11, 0, 0),
        &VictoryTracker::default(),
        &thresholds,
    );
    assert!(!won.contains(&VictoryCondition::GreatDao));
}

#[test]
fn taiji_requires_balance_and_merit() {
    let thresholds = VictoryThresholds::default();
    let tracker = VictoryTracker::default();
    let mut player = player_with(8, 5, 5);
    assert!(evaluate(&player, &tracker, &thresholds).contains(&VictoryCondition::TaijiMaster));

    player.resources.yang = 1;
    assert!(!evaluate(&player, &tracker, &thresholds).contains(&VictoryCondition::TaijiMaster));
}

#[test]
fn missing_threshold_key_uses_documented_default() {
    let provider = ConfigProvider::from_json_str(r#"{"victory": {"taiji_merit": 8}}"#);
    let config = GameConfig::from_provider(&provider);
    assert_eq!(config.victory.merit, 12);

    let won = evaluate(
        &player_with(12, 0, 0),
        &VictoryTracker::default(),
        &config.victory,
    );
    assert!(won.contains(&VictoryCondition::GreatDao));
}

#[test]
fn configured_threshold_overrides_default() {
    let provider = ConfigProvider::from_json_str(r#"{"victory": {"merit_threshold": 15}}"#);
    let config = GameConfig::from_provider(&provider);
    let won = evaluate(
        &player_with(12, 0, 0),
        &VictoryTracker::default(),
        &config.victory,
    );
    assert!(!won.contains(&VictoryCondition::GreatDao));
}

#[test]
fn conditions_are_not_mutually_exclusive() {
    let thresholds = VictoryThresholds::default();
    let mut player = player_with(12, 6, 6);
    player.resources.qi = 25;
    player.resources.sincerity = 12;
    let won = evaluate(&player, &VictoryTracker::default(), &thresholds);
    for expected in [
        VictoryCondition::GreatDao,
        VictoryCondition::TaijiMaster,
        VictoryCondition::ResourceSteward,
        VictoryCondition::Perfection,
    ] {
        assert!(won.contains(&expected), "missing {expected}");
    }
}

#[test]
fn registry_never_fails_for_unseen_players() {
    let mut registry = VictoryRegistry::new();
    let mut laozi = player_with(12, 0, 0);
    laozi.name = "Laozi".to_string();
    let players = [player_with(0, 0, 0), laozi];
    let results = registry.check_all(&players, &VictoryThresholds::default());
    assert_eq!(results.keys().collect::<Vec<_>>(), ["Laozi"]);
    assert_eq!(
        registry.tracker("Confucius").map(VictoryTracker::divinations),
        Some(0)
    );
}
