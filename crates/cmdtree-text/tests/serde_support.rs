//! Serialization of suggestions for front ends that talk JSON.
//!
//! Run with: `cargo test --features serde`
#![cfg(feature = "serde")]

use cmdtree_text::{StringRange, Suggestion, Suggestions};

#[test]
fn test_suggestions_serialize() {
    let suggestions = Suggestions::create(
        "tp St",
        vec![
            Suggestion::new(StringRange::between(3, 5), "Steve").with_tooltip("player"),
            Suggestion::integer(StringRange::between(3, 5), 7),
        ],
    );
    let json = serde_json::to_value(&suggestions).unwrap();
    assert_eq!(json["range"]["start"], 3);
    assert_eq!(json["range"]["end"], 5);
    assert_eq!(json["list"].as_array().unwrap().len(), 2);

    let back: Suggestions = serde_json::from_value(json).unwrap();
    assert_eq!(back, suggestions);
}
