// src/backend/models/common.rs
use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::utils::crypto::generate_item_id;

pub type TimestampNs = u64; // Nanoseconds since epoch
pub type ItemId = String; // Base-36 millis + random suffix, see utils::crypto

#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "fr-CA")]
    FrCa,
    #[serde(rename = "en-CA")]
    EnCa,
}

/// A row of an editable list inside a record.
pub trait ListItem {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: ItemId);
    /// True for the blank rows the defaults seed, and for rows the user cleared.
    fn is_blank(&self) -> bool;
}

/// True when every text field is empty after trimming.
pub fn all_blank(fields: &[&str]) -> bool {
    fields.iter().all(|f| f.trim().is_empty())
}

/// Inserts or replaces `item` in `items` and returns its id.
///
/// An item without an id is new: it gets a fresh id and takes the first seeded blank slot
/// (a blank row that never received an id), or is appended when none is left.
/// An item with an id replaces the row carrying that id, or is appended if no row does.
/// Ids are never rewritten once assigned.
pub fn upsert_item<I: ListItem>(items: &mut Vec<I>, mut item: I, now_ns: TimestampNs) -> ItemId {
    if item.id().is_empty() {
        let id = generate_item_id(now_ns);
        item.set_id(id.clone());
        match items.iter().position(|row| row.id().is_empty() && row.is_blank()) {
            Some(slot) => items[slot] = item,
            None => items.push(item),
        }
        return id;
    }

    let id = item.id().to_string();
    match items.iter().position(|row| row.id() == id) {
        Some(existing) => items[existing] = item,
        None => items.push(item),
    }
    id
}

/// Removes the row with `id`. Returns false when no row matched.
pub fn remove_item<I: ListItem>(items: &mut Vec<I>, id: &str) -> bool {
    if id.is_empty() {
        return false;
    }
    let before = items.len();
    items.retain(|row| row.id() != id);
    items.len() != before
}

/// Gives a fresh id to every filled row that has none yet, e.g. a seeded row the UI filled in
/// and saved as part of the whole record. Blank rows keep their empty id.
pub fn assign_missing_ids<I: ListItem>(items: &mut [I], now_ns: TimestampNs) {
    for row in items.iter_mut().filter(|row| row.id().is_empty() && !row.is_blank()) {
        row.set_id(generate_item_id(now_ns));
    }
}

/// Number of rows holding any data.
pub fn count_filled<I: ListItem>(items: &[I]) -> u32 {
    items.iter().filter(|row| !row.is_blank()).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Row {
        id: String,
        name: String,
    }

    impl ListItem for Row {
        fn id(&self) -> &str {
            &self.id
        }
        fn set_id(&mut self, id: ItemId) {
            self.id = id;
        }
        fn is_blank(&self) -> bool {
            all_blank(&[&self.name])
        }
    }

    fn named(name: &str) -> Row {
        Row { id: String::new(), name: name.to_string() }
    }

    const NOW: TimestampNs = 1_700_000_000_000_000_000;

    #[test]
    fn new_item_fills_first_seeded_slot() {
        let mut rows = vec![Row::default(), Row::default()];
        let id = upsert_item(&mut rows, named("Alice"), NOW);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].name, "Alice");
        assert!(rows[1].is_blank());
    }

    #[test]
    fn new_item_appends_when_no_slot_left() {
        let mut rows = vec![named("Bob")];
        rows[0].id = "fixed".to_string();
        upsert_item(&mut rows, named("Carol"), NOW);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "Carol");
    }

    #[test]
    fn existing_id_is_replaced_in_place_and_kept() {
        let mut rows = vec![Row::default()];
        let id = upsert_item(&mut rows, named("Alice"), NOW);
        let mut edited = rows[0].clone();
        edited.name = "Alice B.".to_string();
        let same = upsert_item(&mut rows, edited, NOW + 5);
        assert_eq!(same, id);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Alice B.");
    }

    #[test]
    fn remove_by_id() {
        let mut rows = vec![Row::default()];
        let id = upsert_item(&mut rows, named("Alice"), NOW);
        assert!(!remove_item(&mut rows, "missing"));
        assert!(!remove_item(&mut rows, ""));
        assert!(remove_item(&mut rows, &id));
        assert!(rows.is_empty());
    }

    #[test]
    fn filled_rows_without_id_get_one() {
        let mut rows = vec![named("Alice"), Row::default(), named("Bob")];
        rows[2].id = "kept".to_string();
        assign_missing_ids(&mut rows, NOW);
        assert!(!rows[0].id.is_empty());
        assert!(rows[1].id.is_empty());
        assert_eq!(rows[2].id, "kept");
    }

    #[test]
    fn counts_only_filled_rows() {
        let rows = vec![named("A"), named("  "), Row::default(), named("B")];
        assert_eq!(count_filled(&rows), 2);
    }
}
