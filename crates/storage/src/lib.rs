//! Tip repository — typed store traits with PostgreSQL and in-memory backends.
//!
//! Categories are derived from tip records (the deduplicated projection of
//! `Tip.category`); there is no separate category table.

#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(unused_results, reason = "SQL execute() returns row counts which are often unused")]
#![allow(clippy::cast_possible_wrap, reason = "usize to i64 is safe for reasonable sizes")]
#![allow(clippy::must_use_candidate, reason = "Internal functions")]

mod error;
mod memory;
mod migrations;
mod postgres;
mod seed;
mod traits;

#[cfg(test)]
mod tests;

pub use error::StorageError;
pub use memory::MemoryTipStore;
pub use migrations::run_migrations;
pub use postgres::PgTipStore;
pub use seed::{seed_tips, SeedTip};
pub use traits::{RegistrationStore, TipStore};
