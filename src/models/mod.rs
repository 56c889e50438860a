//! Domain models for near-Earth objects and their close approaches.
//!
//! A [`NearEarthObject`] carries the semantic and physical parameters of a
//! single NEO; a [`CloseApproach`] records one pass near Earth. Both are
//! constructed from raw keyed source records and must absorb the quirks of
//! the dataset: missing names, unknown diameters, and hazard flags that are
//! only meaningful when they read exactly `"Y"`.
//!
//! An NEO owns the ordered list of its approaches and each approach holds a
//! back-reference to its NEO. Both sides are arena keys into
//! [`crate::db::NeoDatabase`]; neither entity links itself — assembly is a
//! separate step performed once by the database constructor.

mod approach;
mod error;
mod neo;

use std::collections::HashMap;

pub use approach::{ApproachRecord, CloseApproach};
pub use error::{ModelError, ModelResult};
pub use neo::{NearEarthObject, NeoRecord};

/// Raw keyed fields of one source record.
///
/// Values keep whatever type the source gave them (CSV cells arrive as
/// strings, JSON cells as strings, numbers, or null). Constructors pull out
/// the keys they know and ignore the rest.
pub type FieldMap = HashMap<String, serde_json::Value>;

/// Handle to a [`NearEarthObject`] inside a `NeoDatabase` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeoId(pub usize);

/// Handle to a [`CloseApproach`] inside a `NeoDatabase` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApproachId(pub usize);

impl std::fmt::Display for NeoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ApproachId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// String form of a raw field value, the way the loaders capture identity
/// keys: strings verbatim, numbers via their display form, null is absent.
pub(crate) fn value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Numeric form of a raw field value, accepting both JSON numbers and
/// numeric strings.
pub(crate) fn value_to_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
