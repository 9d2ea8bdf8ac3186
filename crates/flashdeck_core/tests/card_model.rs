use flashdeck_core::{decode_cards, encode_cards, Card, CardSet, CardStatus};
use uuid::Uuid;

#[test]
fn card_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut card = Card::with_id(id, "ownership", "one owner", &["Rust".to_string()], 1_000)
        .unwrap();
    card.interval_days = 6;
    card.review_count = 2;
    card.status = CardStatus::Review;

    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["front"], "ownership");
    assert_eq!(json["back"], "one owner");
    assert_eq!(json["tags"], serde_json::json!(["rust"]));
    assert_eq!(json["created_at"], 1_000);
    assert_eq!(json["due_at"], 1_000);
    assert_eq!(json["interval_days"], 6);
    assert_eq!(json["ease_permille"], 2500);
    assert_eq!(json["review_count"], 2);
    assert_eq!(json["lapses"], 0);
    assert_eq!(json["status"], "review");

    let decoded: Card = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, card);
}

#[test]
fn legacy_cards_without_schedule_are_default_filled() {
    let text = r#"[
        {"id": "11111111-2222-4333-8444-555555555555", "front": "2 + 2", "back": "4"},
        {"id": "11111111-2222-4333-8444-666666666666", "front": "3 + 3", "created_at": 500}
    ]"#;

    let cards = decode_cards(text).unwrap();
    assert_eq!(cards.len(), 2);

    let first = &cards.as_slice()[0];
    assert_eq!(first.front, "2 + 2");
    assert_eq!(first.status, CardStatus::New);
    assert_eq!(first.ease_permille, 2500);
    assert_eq!(first.due_at, 0);
    assert!(first.tags.is_empty());

    let second = &cards.as_slice()[1];
    assert_eq!(second.back, "");
    assert_eq!(second.due_at, 500);

    // Once default-filled, the set round-trips exactly.
    let reencoded = encode_cards(&cards).unwrap();
    assert_eq!(decode_cards(reencoded.as_str()).unwrap(), cards);
}

#[test]
fn deserialize_rejects_invalid_cards() {
    let blank_front = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "front": "   ",
        "back": "x"
    });
    let err = serde_json::from_value::<Card>(blank_front).unwrap_err();
    assert!(err.to_string().contains("front must not be blank"), "{err}");

    let nil_id = serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "front": "q"
    });
    assert!(serde_json::from_value::<Card>(nil_id).is_err());

    let low_ease = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "front": "q",
        "ease_permille": 900
    });
    assert!(serde_json::from_value::<Card>(low_ease).is_err());
}

#[test]
fn card_set_deserialize_rejects_duplicate_ids() {
    let text = r#"[
        {"id": "11111111-2222-4333-8444-555555555555", "front": "a"},
        {"id": "11111111-2222-4333-8444-555555555555", "front": "b"}
    ]"#;
    let err = serde_json::from_str::<CardSet>(text).unwrap_err();
    assert!(err.to_string().contains("duplicate card id"), "{err}");
}

#[test]
fn decoded_tags_are_normalized() {
    let text = r#"[
        {"id": "11111111-2222-4333-8444-555555555555", "front": "q", "tags": ["Rust", " rust", "Rust", "  ", "Async"]}
    ]"#;

    let cards = decode_cards(text).unwrap();
    let card = &cards.as_slice()[0];
    assert_eq!(card.tags, vec!["async", "rust"]);
    assert!(card.has_tag("rust"));
    assert_eq!(cards.with_tag("RUST").count(), 1);
}
