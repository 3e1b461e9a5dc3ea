//! Reply engine tests: embedded catalog, file-backed catalogs, and the matching rules
//! end to end through the public API.
//!
//! Run with: `cargo test -p aireach-core --test reply_engine_test`

use aireach_core::{
    default_resolver, get_reply, load_catalog, normalize, CategorizedResponses, ReplyResolver, DEFAULT_REPLY,
};
use std::sync::Arc;

#[test]
fn embedded_catalog_answers_greetings() {
    assert_eq!(get_reply(Some("Hello!")), get_reply(Some("  hello  ")));
    assert_ne!(get_reply(Some("hello")), DEFAULT_REPLY);
    assert_ne!(get_reply(Some("Good morning, bot")), DEFAULT_REPLY);
}

#[test]
fn embedded_catalog_respects_word_boundaries() {
    // "hi" must not fire inside "this"; nothing else in the sentence is a trigger.
    assert_eq!(get_reply(Some("this is nice")), DEFAULT_REPLY);
}

#[test]
fn embedded_catalog_prefers_specific_phrases() {
    let resolver = default_resolver();
    assert_eq!(resolver.resolve("tell me about ai reach").map(|r| r.key), Some("ai reach"));
    assert_eq!(resolver.resolve("What is AI?").map(|r| r.key), Some("what is ai"));
    assert_eq!(resolver.resolve("AIREACH 2025 schedule").map(|r| r.key), Some("aireach 2025"));
    assert_eq!(resolver.resolve("is ai scary").map(|r| r.key), Some("ai"));
}

#[test]
fn default_reply_for_absent_or_unknown_input() {
    assert_eq!(get_reply(None), DEFAULT_REPLY);
    assert_eq!(get_reply(Some("")), DEFAULT_REPLY);
    assert_eq!(get_reply(Some("zzz_no_match_xyz")), DEFAULT_REPLY);
    assert_eq!(default_resolver().reply_to_value(&serde_json::json!(42)), DEFAULT_REPLY);
    assert_eq!(default_resolver().reply_to_value(&serde_json::Value::Null), DEFAULT_REPLY);
}

#[test]
fn replies_keep_newlines() {
    assert!(get_reply(Some("help")).contains('\n'));
}

#[test]
fn file_catalog_later_category_wins() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("responses.json");
    std::fs::write(
        &path,
        r#"{
            "greetings": { "hello": "from greetings", "good morning": "morning" },
            "overrides": { "hello": "from overrides" }
        }"#,
    )
    .expect("write catalog");

    let categorized = CategorizedResponses::from_path(&path).expect("load catalog");
    assert_eq!(categorized.collisions().len(), 1);

    let catalog = load_catalog(&categorized);
    assert_eq!(catalog.len(), 2);
    let resolver = ReplyResolver::new(catalog);
    assert_eq!(resolver.reply(Some("Hello")), "from overrides");
    assert_eq!(resolver.reply(Some("well good morning to you")), "morning");
}

#[test]
fn toml_catalog_matches_json_catalog() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let json_path = dir.path().join("responses.json");
    let toml_path = dir.path().join("responses.toml");
    std::fs::write(&json_path, r#"{ "ai": { "ai": "R1", "ai reach": "R2" } }"#).expect("write json");
    std::fs::write(&toml_path, "[ai]\nai = \"R1\"\n\"ai reach\" = \"R2\"\n").expect("write toml");

    let from_json = CategorizedResponses::from_path(&json_path).expect("json");
    let from_toml = CategorizedResponses::from_path(&toml_path).expect("toml");
    assert_eq!(from_json, from_toml);

    let resolver = ReplyResolver::from_categories(&from_toml);
    assert_eq!(resolver.reply(Some("tell me about ai reach")), "R2");
}

#[test]
fn single_match_only_on_equal_length_triggers() {
    let categorized = CategorizedResponses::new().with_category("pets", [("cat", "CAT"), ("dog", "DOG")]);
    let resolver = ReplyResolver::from_categories(&categorized);
    let reply = resolver.reply(Some("cat and dog"));
    assert_eq!(reply, "CAT");
    assert!(!reply.contains("DOG"));
}

#[test]
fn resolver_answers_from_many_threads() {
    let resolver = Arc::new(ReplyResolver::from_categories(
        &CategorizedResponses::new().with_category("greetings", [("hello", "hi!")]),
    ));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let resolver = Arc::clone(&resolver);
            std::thread::spawn(move || {
                let input = if i % 2 == 0 { "HELLO" } else { "nope" };
                resolver.reply(Some(input)).to_string()
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        let reply = h.join().expect("thread");
        let expected = if i % 2 == 0 { "hi!" } else { DEFAULT_REPLY };
        assert_eq!(reply, expected);
    }
}

#[test]
fn normalize_is_idempotent_over_sample_inputs() {
    for s in ["Hello!", "  a  b  ", "Ça va? Très bien!", "what's up?!", "\t\n"] {
        let once = normalize(s);
        assert_eq!(normalize(&once), once);
    }
}
