//! Ordered, id-keyed record collection.
//!
//! Records are addressed by a stable [`Uuid`] assigned at creation. Display
//! order lives in a separate `order` sequence, so removing or moving one record
//! never changes what another record's address points at.
//!
//! Wire format: a JSON array of `{ "id": ..., ...fields }` in display order.
//! Records arriving without an id (older saves, hand-written imports) get a
//! fresh one on decode.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::sections::SectionRecord;

/// Initial field values for a new record, keyed by field name.
pub type FieldValues = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: HashMap<Uuid, T>,
    order: Vec<Uuid>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.records == other.records
    }
}

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut T> {
        self.records.get_mut(&id)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.order.iter().position(|&o| o == id)
    }

    pub fn id_at(&self, index: usize) -> Option<Uuid> {
        self.order.get(index).copied()
    }

    /// Records in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Uuid, &T)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.records.get(id).map(|record| (*id, record)))
    }

    pub fn push(&mut self, record: T) -> Uuid {
        self.insert_at(self.order.len(), record)
    }

    /// Inserts at `index`, clamped to the end of the collection.
    pub fn insert_at(&mut self, index: usize, record: T) -> Uuid {
        let id = Uuid::new_v4();
        self.insert_with_id(index, id, record);
        id
    }

    fn insert_with_id(&mut self, index: usize, id: Uuid, record: T) {
        let index = index.min(self.order.len());
        self.records.insert(id, record);
        self.order.insert(index, id);
    }

    pub fn remove(&mut self, id: Uuid) -> Option<T> {
        let index = self.position(id)?;
        self.order.remove(index);
        self.records.remove(&id)
    }

    /// Drag-reorder semantics: take the record out of `from`, put it back at `to`.
    ///
    /// Returns `Ok(false)` when `from == to`, which leaves the order untouched.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<bool, AppError> {
        let len = self.order.len();
        if from >= len || to >= len {
            return Err(AppError::ItemNotFound(format!(
                "move {from} -> {to} in collection of {len}"
            )));
        }
        if from == to {
            return Ok(false);
        }
        let id = self.order.remove(from);
        self.order.insert(to, id);
        Ok(true)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Object-safe list access
// ────────────────────────────────────────────────────────────────────────────

/// Shape-independent list operations, so one editor drives every section.
pub trait SectionList {
    fn len(&self) -> usize;

    fn ids(&self) -> Vec<Uuid>;

    fn position(&self, id: Uuid) -> Option<usize>;

    fn id_at(&self, index: usize) -> Option<Uuid>;

    fn field_keys(&self) -> &'static [&'static str];

    /// Inserts a defaulted record overlaid with `values`. Nothing is inserted
    /// if any value names an unknown field or carries an invalid value.
    fn insert(&mut self, values: &FieldValues, index: Option<usize>) -> Result<Uuid, AppError>;

    fn remove(&mut self, id: Uuid) -> Result<(), AppError>;

    fn move_item(&mut self, from: usize, to: usize) -> Result<bool, AppError>;

    fn set_field(&mut self, id: Uuid, key: &str, value: &str) -> Result<(), AppError>;

    /// `(key, value)` pairs of one record in form order.
    fn fields(&self, id: Uuid) -> Option<Vec<(&'static str, String)>>;
}

impl<T: SectionRecord> SectionList for Collection<T> {
    fn len(&self) -> usize {
        Collection::len(self)
    }

    fn ids(&self) -> Vec<Uuid> {
        self.order.clone()
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        Collection::position(self, id)
    }

    fn id_at(&self, index: usize) -> Option<Uuid> {
        Collection::id_at(self, index)
    }

    fn field_keys(&self) -> &'static [&'static str] {
        T::FIELDS
    }

    fn insert(&mut self, values: &FieldValues, index: Option<usize>) -> Result<Uuid, AppError> {
        let mut record = T::default();
        for (key, value) in values {
            record.set_field(key, value)?;
        }
        let index = index.unwrap_or(self.order.len());
        Ok(self.insert_at(index, record))
    }

    fn remove(&mut self, id: Uuid) -> Result<(), AppError> {
        Collection::remove(self, id)
            .map(|_| ())
            .ok_or_else(|| AppError::ItemNotFound(format!("record {id}")))
    }

    fn move_item(&mut self, from: usize, to: usize) -> Result<bool, AppError> {
        Collection::move_item(self, from, to)
    }

    fn set_field(&mut self, id: Uuid, key: &str, value: &str) -> Result<(), AppError> {
        let record = self
            .get_mut(id)
            .ok_or_else(|| AppError::ItemNotFound(format!("record {id}")))?;
        record.set_field(key, value)
    }

    fn fields(&self, id: Uuid) -> Option<Vec<(&'static str, String)>> {
        let record = self.get(id)?;
        Some(
            T::FIELDS
                .iter()
                .map(|&key| (key, record.field(key).unwrap_or_default().to_string()))
                .collect(),
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Serde
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct KeyedRef<'a, T> {
    id: Uuid,
    #[serde(flatten)]
    record: &'a T,
}

#[derive(Deserialize)]
struct KeyedOwned<T> {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(flatten)]
    record: T,
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.order
                .iter()
                .filter_map(|id| self.records.get(id).map(|record| KeyedRef { id: *id, record })),
        )
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Collection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let keyed = Vec::<KeyedOwned<T>>::deserialize(deserializer)?;
        let mut collection = Collection::default();
        for KeyedOwned { id, record } in keyed {
            // Duplicate ids would alias two rows onto one record.
            let id = match id {
                Some(id) if !collection.records.contains_key(&id) => id,
                _ => Uuid::new_v4(),
            };
            let end = collection.order.len();
            collection.insert_with_id(end, id, record);
        }
        Ok(collection)
    }
}
