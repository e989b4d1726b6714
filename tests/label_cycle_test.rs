use std::time::{Duration, Instant};

use vocab_market::{
    ClickOutcome, Config, LabelState, VocabularyScene, data_structures::scene_graph::SceneGraph,
};

use crate::common::test_utils::{apple_and_pear_fixture, apple_fixture, label_text};

mod common;

#[tokio::test]
async fn apple_cycles_through_all_three_labels() {
    let fixture = apple_fixture();
    let mut app = fixture.start().await;
    let item = *app.scene().item("apple").expect("apple has a menu item");

    assert_eq!(label_text(&app, item.label), "Apple");

    let expected = [
        ("Manzana", LabelState::Translated),
        ("AP-ul", LabelState::Phonetics),
        ("Apple", LabelState::Initial),
    ];
    for (text, state) in expected {
        let outcome = app.on_click(item.cycle_trigger, "user-1");
        assert_eq!(
            outcome,
            ClickOutcome::Cycled {
                id: "apple".to_string(),
                state
            }
        );
        assert_eq!(label_text(&app, item.label), text);
        assert_eq!(app.controller().state("apple"), Some(state));
    }
}

#[tokio::test]
async fn state_after_n_clicks_equals_n_mod_3() {
    let fixture = apple_fixture();
    let mut app = fixture.start().await;
    let item = *app.scene().item("apple").unwrap();
    let entry = app.vocabulary().get("apple").unwrap().clone();

    let mut reference = LabelState::Initial;
    for n in 1..=10 {
        app.on_click(item.cycle_trigger, "user-1");
        reference = reference.next();

        let mut expected = LabelState::Initial;
        for _ in 0..(n % 3) {
            expected = expected.next();
        }
        assert_eq!(reference, expected);
        assert_eq!(app.controller().state("apple"), Some(expected), "after {n} clicks");
        assert_eq!(label_text(&app, item.label), entry.label_for(expected));
    }
}

#[tokio::test]
async fn playing_leaves_label_and_state_alone() {
    let fixture = apple_fixture();
    let mut app = fixture.start().await;
    let item = *app.scene().item("apple").unwrap();

    app.on_click(item.cycle_trigger, "user-1");
    let before = label_text(&app, item.label);

    for _ in 0..3 {
        assert_eq!(
            app.on_click(item.play_trigger, "user-2"),
            ClickOutcome::Played {
                id: "apple".to_string()
            }
        );
    }
    assert_eq!(label_text(&app, item.label), before);
    assert_eq!(app.controller().state("apple"), Some(LabelState::Translated));

    let playbacks = app.host().playbacks();
    assert_eq!(playbacks.len(), 3);
    assert!(playbacks.iter().all(|p| p.node == item.sound_anchor));
    assert!(playbacks.iter().all(|p| p.sound == "apple"));
    assert!(playbacks.iter().all(|p| p.options.volume == 1.0 && !p.options.looping));
}

#[tokio::test]
async fn clicks_elsewhere_are_ignored() {
    let fixture = apple_fixture();
    let mut app = fixture.start().await;
    let item = *app.scene().item("apple").unwrap();

    assert_eq!(app.on_click(item.label, "user-1"), ClickOutcome::Ignored);
    assert_eq!(app.on_click(app.scene().root, "user-1"), ClickOutcome::Ignored);
    assert_eq!(app.controller().state("apple"), Some(LabelState::Initial));
}

#[tokio::test]
async fn unplayable_sound_fails_without_side_effects() {
    let fixture = common::test_utils::Fixture::new(common::test_utils::APPLE_AND_BREAD)
        .with_model("apple.gltf", common::test_utils::MODEL_GLTF);
    let mut app = fixture.start().await;
    let item = *app.scene().item("apple").unwrap();

    match app.on_click(item.play_trigger, "user-1") {
        ClickOutcome::Failed(e) => assert!(e.to_string().contains("apple"), "{e}"),
        other => panic!("expected a failed playback, got {other:?}"),
    }
    assert!(app.host().playbacks().is_empty());
    assert_eq!(label_text(&app, item.label), "Apple");
}

#[tokio::test]
async fn each_trigger_drives_only_its_own_entry() {
    let fixture = apple_and_pear_fixture();
    let mut app = fixture.start().await;
    let apple = *app.scene().item("apple").unwrap();
    let pear = *app.scene().item("pear").unwrap();

    // Pear starts translated, so its next label is the phonetics.
    assert_eq!(label_text(&app, pear.label), "Pear");
    assert_eq!(
        app.on_click(pear.cycle_trigger, "user-1"),
        ClickOutcome::Cycled {
            id: "pear".to_string(),
            state: LabelState::Phonetics,
        }
    );
    assert_eq!(label_text(&app, pear.label), "pair");
    assert_eq!(label_text(&app, apple.label), "Apple");
    assert_eq!(app.controller().state("apple"), Some(LabelState::Initial));

    app.on_click(apple.cycle_trigger, "user-1");
    assert_eq!(label_text(&app, apple.label), "Manzana");
    assert_eq!(label_text(&app, pear.label), "pair");

    app.on_click(apple.play_trigger, "user-2");
    app.on_click(pear.play_trigger, "user-2");
    let played: Vec<_> = app
        .host()
        .playbacks()
        .iter()
        .map(|p| (p.node, p.sound.as_str()))
        .collect();
    assert_eq!(
        played,
        vec![(apple.sound_anchor, "apple"), (pear.sound_anchor, "pear")]
    );
}

#[tokio::test]
async fn start_waits_for_the_startup_delay() {
    let fixture = apple_fixture();
    let delay = Duration::from_millis(200);
    let config = Config {
        startup_delay_ms: Some(200),
        ..fixture.config()
    };
    assert_eq!(config.startup_delay(), Some(delay));

    let started = Instant::now();
    let host = SceneGraph::new(fixture.path());
    let app = VocabularyScene::start(host, fixture.vocabulary(), &config)
        .await
        .unwrap();
    assert!(started.elapsed() >= delay, "started after {:?}", started.elapsed());
    assert!(app.scene().item("apple").is_some());
}
