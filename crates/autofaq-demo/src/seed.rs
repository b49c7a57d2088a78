//! Seed corpus for the demo chat

use std::sync::Arc;

use autofaq_core::{MemoryStore, Result};

/// A small two-topic corpus, examples pre-cleaned the way curated
/// messages are stored
pub fn demo_store() -> Result<Arc<MemoryStore>> {
    let store = MemoryStore::new();

    store.seed_nonsense(
        "support",
        &[
            "lol",
            "haha good one",
            "good morning everyone",
            "thanks a lot",
            "welcome aboard",
            "nice to meet you",
            "that is so cool",
        ],
    )?;

    store.seed_entry(
        "support",
        "hours",
        "We are open 9:00-18:00, Monday to Saturday.",
        &[
            "when do you open",
            "what are your opening hours",
            "are you open on sunday",
            "how late are you open today",
        ],
    )?;

    store.seed_entry(
        "support",
        "shipping",
        "Orders ship within two business days; tracking arrives by mail.",
        &[
            "when will my order ship",
            "how long does shipping take",
            "where is my package right now",
            "do you ship abroad",
        ],
    )?;

    store.seed_entry(
        "support",
        "returns",
        "You can return any item within 30 days, no questions asked.",
        &[
            "how do i return an item",
            "can i send this back",
            "what is your return policy",
        ],
    )?;

    store.seed_nonsense(
        "dev",
        &["brb lunch", "lgtm", "nice work team", "happy friday everyone"],
    )?;

    store.seed_entry(
        "dev",
        "build",
        "Run `make setup` once, then `make run`.",
        &[
            "how do i build the project",
            "the build fails on my machine",
            "how do i run this locally",
            "what do i need to install first",
        ],
    )?;

    store.seed_entry(
        "dev",
        "release",
        "Releases are cut every other Thursday from main.",
        &[
            "when is the next release",
            "how do i cut a release",
            "what is the release schedule",
        ],
    )?;

    Ok(Arc::new(store))
}
