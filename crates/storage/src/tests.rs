//! Repository behavior tests against the in-memory backend.

#![allow(clippy::unwrap_used, reason = "test code")]

use chrono::{Duration, Utc};
use tipline_core::{NewTip, Tip};

use crate::memory::MemoryTipStore;
use crate::seed::{seed_tips, SeedTip};
use crate::traits::{RegistrationStore, TipStore};

fn tip(text: &str, category: &str, age_minutes: i64) -> Tip {
    Tip {
        text: text.to_owned(),
        url: format!("https://example.com/{category}"),
        category: category.to_owned(),
        created_at: Utc::now() - Duration::minutes(age_minutes),
    }
}

fn store_with_fixture() -> MemoryTipStore {
    MemoryTipStore::with_tips(vec![
        tip("use chips", "design", 30),
        tip("test locally", "tools", 20),
        tip("short responses", "design", 10),
    ])
}

#[tokio::test]
async fn random_tip_returns_member_of_filtered_set() {
    let store = store_with_fixture();
    for _ in 0..20 {
        let picked = store.random_tip(Some("design")).await.unwrap().unwrap();
        assert_eq!(picked.category, "design");
    }
}

#[tokio::test]
async fn random_tip_on_empty_set_is_none_not_error() {
    let store = store_with_fixture();
    assert!(store.random_tip(Some("no-such-category")).await.unwrap().is_none());

    let empty = MemoryTipStore::new();
    assert!(empty.random_tip(None).await.unwrap().is_none());
}

#[tokio::test]
async fn latest_tip_is_the_max_created_at() {
    let store = store_with_fixture();
    let latest = store.latest_tip().await.unwrap().unwrap();
    assert_eq!(latest.text, "short responses");
}

#[tokio::test]
async fn latest_tip_on_empty_collection_is_none() {
    let store = MemoryTipStore::new();
    assert!(store.latest_tip().await.unwrap().is_none());
}

#[tokio::test]
async fn categories_are_deduplicated() {
    let store = store_with_fixture();
    let mut categories = store.categories().await.unwrap();
    categories.sort();
    assert_eq!(categories, vec!["design".to_owned(), "tools".to_owned()]);
}

#[tokio::test]
async fn add_tip_stamps_creation_time_and_becomes_latest() {
    let store = store_with_fixture();
    let added = store
        .add_tip(NewTip {
            text: "brand new".to_owned(),
            url: "https://example.com/new".to_owned(),
            category: "tools".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(added.text, "brand new");

    let latest = store.latest_tip().await.unwrap().unwrap();
    assert_eq!(latest.text, "brand new");
}

#[tokio::test]
async fn restore_leaves_exactly_the_seed_set() {
    let store = store_with_fixture();
    let seed = vec![
        SeedTip {
            tip: "seeded one".to_owned(),
            url: "https://example.com/1".to_owned(),
            category: "alpha".to_owned(),
        },
        SeedTip {
            tip: "seeded two".to_owned(),
            url: "https://example.com/2".to_owned(),
            category: "beta".to_owned(),
        },
    ];
    let count = store.restore(&seed).await.unwrap();
    assert_eq!(count, 2);

    let mut categories = store.categories().await.unwrap();
    categories.sort();
    assert_eq!(categories, vec!["alpha".to_owned(), "beta".to_owned()]);
    assert!(store.random_tip(Some("design")).await.unwrap().is_none());
}

#[tokio::test]
async fn restore_with_embedded_seed_set() {
    let store = MemoryTipStore::new();
    let seed = seed_tips().unwrap();
    let count = store.restore(&seed).await.unwrap();
    assert_eq!(count, seed.len());
    assert!(store.latest_tip().await.unwrap().is_some());
}

#[tokio::test]
async fn register_for_update_dedupes_by_user_and_intent() {
    let store = MemoryTipStore::new();
    assert!(store.register_for_update("user-1", "tell.latest.tip").await.unwrap());
    assert!(!store.register_for_update("user-1", "tell.latest.tip").await.unwrap());
    // Same user, different intent is a distinct registration.
    assert!(store.register_for_update("user-1", "tell.tip").await.unwrap());

    let targets = store.registered_targets("tell.latest.tip").await.unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].user_id, "user-1");
}

#[tokio::test]
async fn registered_targets_filters_by_intent() {
    let store = MemoryTipStore::new();
    store.register_for_update("user-1", "tell.latest.tip").await.unwrap();
    store.register_for_update("user-2", "tell.latest.tip").await.unwrap();
    store.register_for_update("user-3", "tell.tip").await.unwrap();

    let targets = store.registered_targets("tell.latest.tip").await.unwrap();
    assert_eq!(targets.len(), 2);
    assert!(targets.iter().all(|t| t.intent == "tell.latest.tip"));
}
