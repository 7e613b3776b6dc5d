//! Card aggregation
//!
//! Rooms and Categories become id -> name lookups, Items are enriched with
//! the resolved names, Action Cards are tagged as-is, and the two lists are
//! concatenated items-first. Fetching and assembly are split so the assembly
//! step stays testable without a network.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::client::TableReader;
use crate::error::{AggregateError, Result};
use crate::record::Record;

/// Reference table of rooms.
pub const ROOMS_TABLE: &str = "Rooms";
/// Reference table of item categories.
pub const CATEGORIES_TABLE: &str = "Categories";
/// Item cards, linked to rooms and categories.
pub const ITEMS_TABLE: &str = "Items";
/// Action cards, passed through apart from the tag.
pub const ACTION_CARDS_TABLE: &str = "Action Cards";
/// The one view every read goes through.
pub const GRID_VIEW: &str = "Grid view";

const NAME_FIELD: &str = "Name";
const ITEM_ROOM_FIELD: &str = "Can Be Used In";
const ITEM_CATEGORY_FIELD: &str = "Type";

const ROOMS_KEY: &str = "rooms";
const CATEGORIES_KEY: &str = "categories";
const TYPE_KEY: &str = "_type";

const ANY_ROOM: &str = "Any";
const NO_CATEGORY: &str = "None";

/// One merged output card: the record's raw field set plus the derived keys.
///
/// Cards stay loosely typed on purpose. Upstream fields are user-defined
/// columns and pass through byte-for-byte; only the derived keys have a
/// fixed shape.
pub type Card = Map<String, Value>;

/// Which table a merged card came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Item,
    Action,
}

impl CardKind {
    /// The `_type` value written into the card.
    pub fn as_str(self) -> &'static str {
        match self {
            CardKind::Item => "item",
            CardKind::Action => "action",
        }
    }
}

/// Response body shape: `{"cards": [...]}`.
#[derive(Debug, Serialize)]
pub struct CardsResponse {
    pub cards: Vec<Card>,
}

/// Fetch all four tables and assemble the merged card list.
///
/// The four reads are independent and run concurrently; all must succeed
/// before any enrichment happens. One failed read fails the whole call with
/// no partial output.
pub async fn fetch_cards(base: &dyn TableReader) -> Result<Vec<Card>> {
    let (rooms, categories, items, actions) = tokio::try_join!(
        base.first_page(ROOMS_TABLE, GRID_VIEW),
        base.first_page(CATEGORIES_TABLE, GRID_VIEW),
        base.first_page(ITEMS_TABLE, GRID_VIEW),
        base.first_page(ACTION_CARDS_TABLE, GRID_VIEW),
    )?;
    assemble_cards(rooms, categories, items, actions)
}

/// Assemble the card list from already-fetched pages.
///
/// Items keep their view order, then actions keep theirs.
pub fn assemble_cards(
    rooms: Vec<Record>,
    categories: Vec<Record>,
    items: Vec<Record>,
    actions: Vec<Record>,
) -> Result<Vec<Card>> {
    let room_names = name_lookup(&rooms);
    let category_names = name_lookup(&categories);

    let mut cards = Vec::with_capacity(items.len() + actions.len());
    for item in items {
        cards.push(enrich_item(item, &room_names, &category_names)?);
    }
    for action in actions {
        cards.push(tag_action(action));
    }
    Ok(cards)
}

/// Pair each record id with its `"Name"` value.
///
/// Later rows overwrite earlier ones on a duplicate id. A row without a name
/// maps to `Null` and flows into the output as such.
fn name_lookup(records: &[Record]) -> HashMap<String, Value> {
    records
        .iter()
        .map(|record| {
            let name = record.field(NAME_FIELD).cloned().unwrap_or(Value::Null);
            (record.id.clone(), name)
        })
        .collect()
}

/// Resolve linked record ids to names, leaving a `null` hole for ids the
/// reference table does not contain.
fn resolve_names(
    ids: &[String],
    names: &HashMap<String, Value>,
    table: &'static str,
) -> Vec<Value> {
    ids.iter()
        .map(|id| match names.get(id) {
            Some(name) => name.clone(),
            None => {
                warn!("unresolved {} reference: {}", table, id);
                Value::Null
            }
        })
        .collect()
}

/// Read a relational field as a list of record ids.
///
/// An absent field is `None`. A bare string is promoted to a single-element
/// list; any other shape is a malformed-field error.
fn linked_ids(
    record: &Record,
    table: &'static str,
    field: &'static str,
) -> Result<Option<Vec<String>>> {
    let Some(value) = record.field(field) else {
        return Ok(None);
    };
    let malformed = || AggregateError::MalformedField {
        table,
        record_id: record.id.clone(),
        field,
    };
    match value {
        Value::Array(entries) => {
            let mut ids = Vec::with_capacity(entries.len());
            for entry in entries {
                match entry {
                    Value::String(id) => ids.push(id.clone()),
                    _ => return Err(malformed()),
                }
            }
            Ok(Some(ids))
        }
        Value::String(id) => Ok(Some(vec![id.clone()])),
        _ => Err(malformed()),
    }
}

/// Enrich one item record with resolved rooms, resolved categories, and the
/// type tag, in that order. Each insert replaces a pre-existing field of the
/// same name.
fn enrich_item(
    item: Record,
    room_names: &HashMap<String, Value>,
    category_names: &HashMap<String, Value>,
) -> Result<Card> {
    let rooms = match linked_ids(&item, ITEMS_TABLE, ITEM_ROOM_FIELD)? {
        Some(ids) => resolve_names(&ids, room_names, ROOMS_TABLE),
        None => vec![Value::String(ANY_ROOM.to_string())],
    };
    let categories = match linked_ids(&item, ITEMS_TABLE, ITEM_CATEGORY_FIELD)? {
        Some(ids) => resolve_names(&ids, category_names, CATEGORIES_TABLE),
        None => vec![Value::String(NO_CATEGORY.to_string())],
    };

    let mut card = item.fields;
    card.insert(ROOMS_KEY.to_string(), Value::Array(rooms));
    card.insert(CATEGORIES_KEY.to_string(), Value::Array(categories));
    card.insert(
        TYPE_KEY.to_string(),
        Value::String(CardKind::Item.as_str().to_string()),
    );
    Ok(card)
}

/// Tag one action record; nothing else changes.
fn tag_action(action: Record) -> Card {
    let mut card = action.fields;
    card.insert(
        TYPE_KEY.to_string(),
        Value::String(CardKind::Action.as_str().to_string()),
    );
    card
}
