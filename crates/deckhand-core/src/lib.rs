//! Core aggregation logic for the deckhand card catalog.
//!
//! The catalog lives in an Airtable base as four tables: `Rooms` and
//! `Categories` are reference tables, `Items` links into both, and
//! `Action Cards` stands alone. This crate fetches the first page of each
//! table's `Grid view`, resolves the item links to display names, and merges
//! everything into one flat card list ready to serialize.
//!
//! [`fetch_cards`] is the whole pipeline; [`assemble_cards`] is the pure
//! half of it for callers that already hold the records.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod record;

pub use aggregate::{
    assemble_cards, fetch_cards, Card, CardKind, CardsResponse, ACTION_CARDS_TABLE,
    CATEGORIES_TABLE, GRID_VIEW, ITEMS_TABLE, ROOMS_TABLE,
};
pub use client::{BaseClient, TableReader};
pub use config::{Config, ConfigError};
pub use error::{AggregateError, FetchError, Result};
pub use record::{Record, RecordsPage};
