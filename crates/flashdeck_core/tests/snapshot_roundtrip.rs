use flashdeck_core::{
    decode_cards, encode_cards, update, Card, CardSet, Effect, Model, Msg,
};

#[test]
fn app_produced_card_sets_round_trip_in_order() {
    let mut model = Model::new(CardSet::new(), 1_700_000_000_000);
    let fronts = ["première", "二番目", "third \"quoted\"", "tab\there", "emoji 🦀"];
    for (index, front) in fronts.iter().enumerate() {
        let effect = update(
            &mut model,
            Msg::AddCard {
                front: front.to_string(),
                back: format!("answer {index}\nsecond line"),
                tags: vec![format!("Tag{}", index % 2), "shared".to_string()],
            },
        )
        .unwrap();
        assert_eq!(effect, Effect::PersistCards);
    }

    let ids: Vec<_> = model.cards.iter().map(|card| card.id).collect();
    update(&mut model, Msg::ReviewCard { id: ids[0], grade: 5 }).unwrap();
    update(&mut model, Msg::ReviewCard { id: ids[1], grade: 1 }).unwrap();
    update(&mut model, Msg::MoveCard { id: ids[4], to_index: 0 }).unwrap();

    let snapshot = encode_cards(&model.cards).unwrap();
    let decoded = decode_cards(snapshot.as_str()).unwrap();

    assert_eq!(decoded, model.cards);
    let decoded_fronts: Vec<&str> = decoded.iter().map(|card| card.front.as_str()).collect();
    assert_eq!(
        decoded_fronts,
        vec!["emoji 🦀", "première", "二番目", "third \"quoted\"", "tab\there"]
    );
}

#[test]
fn empty_set_round_trips() {
    let snapshot = encode_cards(&CardSet::new()).unwrap();
    assert_eq!(decode_cards(snapshot.as_str()).unwrap(), CardSet::new());
}

#[test]
fn extreme_schedule_values_round_trip() {
    let mut card = Card::new("q", "", &[], i64::MIN).unwrap();
    card.due_at = i64::MAX;
    card.interval_days = u32::MAX;
    card.ease_permille = u32::MAX;
    card.review_count = u32::MAX;
    card.lapses = u32::MAX;
    let set = CardSet::from_cards(vec![card]).unwrap();

    let snapshot = encode_cards(&set).unwrap();
    assert_eq!(decode_cards(snapshot.as_str()).unwrap(), set);
}
