//! Kanji lookup backed by the kanji data API with a local cache.

pub mod client;
pub mod lookup;

pub use client::KanjiApiClient;
pub use lookup::KanjiLookup;
