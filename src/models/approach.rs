use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{value_to_f64, value_to_string, FieldMap, ModelError, ModelResult, NearEarthObject, NeoId, NeoRecord};
use crate::time::format_approach_time;

/// One close approach to Earth by an NEO.
///
/// Records the approach timestamp (UTC, minute precision, possibly absent),
/// the nominal approach distance in astronomical units, and the relative
/// velocity in kilometers per second.
///
/// At construction the approach only knows the raw primary designation of
/// its NEO; the `NeoDatabase` assembly step later resolves that key and
/// sets `neo` exactly once. The NEO owns the approach, not vice versa, so
/// the back-reference is an arena key rather than an owned value.
#[derive(Clone, PartialEq)]
pub struct CloseApproach {
    pub(crate) designation: String,
    pub time: Option<NaiveDateTime>,
    pub distance: f64,
    pub velocity: f64,
    pub(crate) neo: Option<NeoId>,
}

impl CloseApproach {
    /// Build a close approach from the raw keyed fields of one table row.
    ///
    /// Recognized keys are `designation`, `time`, `distance`, and
    /// `velocity`; any other keys are ignored. The designation is captured
    /// as the string form of whatever value was supplied. An absent `time`
    /// is stored as `None`; `distance` and `velocity` are required valid
    /// numbers.
    ///
    /// # Errors
    ///
    /// - [`ModelError::MissingField`] when `designation`, `distance`, or
    ///   `velocity` is absent;
    /// - [`ModelError::InvalidNumber`] when `distance` or `velocity` does
    ///   not convert to a number;
    /// - [`ModelError::InvalidTimestamp`] when a supplied `time` does not
    ///   parse in the dataset's format.
    pub fn from_fields(fields: &FieldMap) -> ModelResult<Self> {
        let designation = fields
            .get("designation")
            .and_then(value_to_string)
            .ok_or(ModelError::MissingField("designation"))?;

        let time = match fields.get("time").and_then(value_to_string) {
            Some(raw) => Some(
                crate::time::parse_approach_time(&raw)
                    .map_err(|_| ModelError::InvalidTimestamp(raw))?,
            ),
            None => None,
        };

        let distance = require_f64(fields, "distance")?;
        let velocity = require_f64(fields, "velocity")?;

        Ok(Self {
            designation,
            time,
            distance,
            velocity,
            neo: None,
        })
    }

    /// Primary designation of the approached NEO, as captured from the raw
    /// record. Used for linking; once linked it always equals the linked
    /// NEO's designation.
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Arena key of the linked NEO, or `None` before assembly.
    pub fn neo(&self) -> Option<NeoId> {
        self.neo
    }

    /// The approach timestamp in the canonical minute-precision form.
    pub fn time_str(&self) -> String {
        format_approach_time(self.time)
    }

    /// Serialize this approach together with a snapshot of its NEO.
    ///
    /// # Errors
    ///
    /// [`ModelError::Unlinked`] when called before the assembly step has
    /// linked this approach; an unassembled approach never emits a payload.
    pub fn serialize(&self, neo: &NearEarthObject) -> ModelResult<ApproachRecord> {
        if self.neo.is_none() {
            return Err(ModelError::Unlinked(self.designation.clone()));
        }
        debug_assert_eq!(neo.designation, self.designation);

        Ok(ApproachRecord {
            datetime_utc: self.time_str(),
            distance_au: self.distance,
            velocity_km_s: self.velocity,
            neo: neo.snapshot(),
        })
    }

    /// The one-sentence description, phrased around the given identity
    /// string (the NEO's full name once linked, the raw designation before).
    pub(crate) fn describe_as(&self, identity: &str) -> String {
        format!(
            "At {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            identity,
            self.distance,
            self.velocity
        )
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Resolving the linked NEO needs the arena; see
        // `NeoDatabase::describe_approach` for the linked phrasing.
        write!(f, "{}", self.describe_as(&self.designation))
    }
}

impl fmt::Debug for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CloseApproach(time={:?}, distance={:.2}, velocity={:.2}, neo={:?})",
            self.time_str(),
            self.distance,
            self.velocity,
            self.neo
        )
    }
}

fn require_f64(fields: &FieldMap, field: &'static str) -> ModelResult<f64> {
    let value = fields
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or(ModelError::MissingField(field))?;
    value_to_f64(value).ok_or_else(|| ModelError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Serialized form of one close approach, with its NEO nested.
///
/// Emitted verbatim as a JSON object, or flattened into a CSV row by the
/// output layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachRecord {
    pub datetime_utc: String,
    pub distance_au: f64,
    pub velocity_km_s: f64,
    pub neo: NeoRecord,
}
