use std::fmt;

use serde::{Deserialize, Serialize};

use super::{value_to_f64, value_to_string, ApproachId, FieldMap, ModelError, ModelResult};

/// A near-Earth object.
///
/// Holds the primary designation (required, unique across the population),
/// the IAU name (optional), the diameter in kilometers (optional, often
/// unknown in the source data), the potentially-hazardous flag, and the
/// ordered list of this object's close approaches.
///
/// `approaches` starts empty; it is populated exactly once, in input order,
/// by the `NeoDatabase` assembly step.
#[derive(Clone, PartialEq)]
pub struct NearEarthObject {
    pub designation: String,
    pub name: Option<String>,
    pub diameter: Option<f64>,
    pub hazardous: bool,
    pub approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Build an NEO from the raw keyed fields of one catalog record.
    ///
    /// Recognized keys are `designation` (required), `name`, `diameter`,
    /// and `hazardous`; any other keys are ignored. The data-quality rules:
    ///
    /// - an empty or absent `name` is stored as `None`, never as `""`;
    /// - an empty, absent, or unparsable `diameter` is stored as `None`
    ///   (unknown), never silently defaulted to zero;
    /// - `hazardous` is `true` exactly when the raw value is the literal
    ///   `"Y"`; `"N"`, empty, and absent all read as `false`.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingField`] if `designation` is absent — that is a
    /// loader contract violation, not a data quirk.
    pub fn from_fields(fields: &FieldMap) -> ModelResult<Self> {
        let designation = fields
            .get("designation")
            .and_then(value_to_string)
            .ok_or(ModelError::MissingField("designation"))?;

        let name = fields
            .get("name")
            .and_then(value_to_string)
            .filter(|n| !n.is_empty());

        let diameter = fields
            .get("diameter")
            .and_then(value_to_f64)
            .filter(|d| !d.is_nan());

        let hazardous = fields
            .get("hazardous")
            .and_then(value_to_string)
            .map(|flag| flag == "Y")
            .unwrap_or(false);

        Ok(Self {
            designation,
            name,
            diameter,
            hazardous,
            approaches: Vec::new(),
        })
    }

    /// The full name of this NEO: designation and name separated by a
    /// single space, or the designation alone for unnamed objects.
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} {}", self.designation, name),
            None => self.designation.clone(),
        }
    }

    /// The diameter formatted to three decimal places, or `unknown`.
    pub fn diameter_str(&self) -> String {
        match self.diameter {
            Some(diameter) => format!("{:.3}", diameter),
            None => "unknown".to_string(),
        }
    }

    /// Snapshot of this NEO for the close-approach serialization contract.
    pub fn snapshot(&self) -> NeoRecord {
        NeoRecord {
            designation: self.designation.clone(),
            name: self.name.clone(),
            diameter_km: self.diameter,
            potentially_hazardous: self.hazardous,
        }
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hazard_phrase = if self.hazardous {
            "is potentially hazardous"
        } else {
            "is not potentially hazardous"
        };
        write!(
            f,
            "NEO {} has a diameter of {} km and {}.",
            self.fullname(),
            self.diameter_str(),
            hazard_phrase
        )
    }
}

impl fmt::Debug for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unknown diameters print as `unknown` rather than `NaN`.
        write!(
            f,
            "NearEarthObject(designation={:?}, name={:?}, diameter={}, hazardous={:?})",
            self.designation,
            self.name,
            self.diameter_str(),
            self.hazardous
        )
    }
}

/// Serialized form of an NEO, nested inside each close-approach record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoRecord {
    pub designation: String,
    pub name: Option<String>,
    pub diameter_km: Option<f64>,
    pub potentially_hazardous: bool,
}
