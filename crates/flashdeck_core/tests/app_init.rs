use flashdeck_core::{encode_cards, App, Card, CardSet, InitOutcome, InitPayload};

fn sample_set() -> CardSet {
    CardSet::from_cards(vec![
        Card::new("alpha", "a", &[], 10).unwrap(),
        Card::new("beta", "b", &["greek".to_string()], 20).unwrap(),
        Card::new("gamma", "c", &[], 30).unwrap(),
    ])
    .unwrap()
}

#[test]
fn absent_cards_start_empty_for_any_timestamp() {
    for timestamp in [i64::MIN, -1, 0, 1_700_000_000_000, i64::MAX] {
        let app = App::init(InitPayload::new(timestamp, None));
        assert!(app.model().cards.is_empty());
        assert_eq!(app.model().now_ms, timestamp);
        assert_eq!(app.init_outcome(), &InitOutcome::Absent);
    }
}

#[test]
fn malformed_cards_start_empty_without_failing() {
    let app = App::init(InitPayload::new(5, Some("not valid json{{{".to_string())));
    assert!(app.model().cards.is_empty());
    assert!(matches!(
        app.init_outcome(),
        InitOutcome::Malformed {
            kind: "malformed",
            ..
        }
    ));
}

#[test]
fn foreign_shapes_start_empty() {
    let foreign = [
        r#"{"cards": []}"#,
        r#"[1, 2, 3]"#,
        r#"["front", "back"]"#,
        r#"[{"question": "q", "answer": "a"}]"#,
        r#"[{"id": "not-a-uuid", "front": "q"}]"#,
        r#"[{"id": "11111111-2222-4333-8444-555555555555", "front": ""}]"#,
        r#"null"#,
    ];

    for text in foreign {
        let app = App::init(InitPayload::new(0, Some(text.to_string())));
        assert!(app.model().cards.is_empty(), "expected empty start for {text}");
        assert!(
            matches!(
                app.init_outcome(),
                InitOutcome::Malformed {
                    kind: "invalid",
                    ..
                }
            ),
            "expected invalid outcome for {text}"
        );
    }
}

#[test]
fn duplicate_ids_in_storage_start_empty() {
    let card = Card::new("alpha", "a", &[], 0).unwrap();
    let text = format!(
        "[{},{}]",
        serde_json::to_string(&card).unwrap(),
        serde_json::to_string(&card).unwrap()
    );

    let app = App::init(InitPayload::new(0, Some(text)));
    assert!(app.model().cards.is_empty());
    assert_eq!(app.init_outcome().label(), "fallback");
}

#[test]
fn valid_cards_are_restored_in_order() {
    let set = sample_set();
    let snapshot = encode_cards(&set).unwrap();

    let app = App::init(InitPayload::new(99, Some(snapshot.into_string())));
    assert_eq!(app.model().cards, set);
    assert_eq!(app.init_outcome(), &InitOutcome::Restored { count: 3 });
    let fronts: Vec<&str> = app
        .model()
        .cards
        .iter()
        .map(|card| card.front.as_str())
        .collect();
    assert_eq!(fronts, vec!["alpha", "beta", "gamma"]);
}

#[test]
fn init_does_not_emit() {
    let snapshot = encode_cards(&sample_set()).unwrap();
    let mut app = App::init(InitPayload::new(0, Some(snapshot.into_string())));
    assert_eq!(app.store_cards().pending_len(), 0);
    assert_eq!(app.store_cards().delivered_count(), 0);
}

#[test]
fn json_flags_drive_init() {
    let snapshot = encode_cards(&sample_set()).unwrap();
    let flags = serde_json::json!({
        "timestamp": 1_700_000_000_000_i64,
        "cards": snapshot.as_str(),
    });

    let payload: InitPayload = serde_json::from_value(flags).unwrap();
    let app = App::init(payload);
    assert_eq!(app.model().cards.len(), 3);
    assert_eq!(app.model().now_ms, 1_700_000_000_000);
}
