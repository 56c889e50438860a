//! In-memory database of an assembled NEO population.
//!
//! `NeoDatabase` is an arena: it owns every [`NearEarthObject`] and every
//! [`CloseApproach`], indexed by primary designation (and by name for named
//! objects). Construction performs the one-shot linking step — each
//! approach's raw designation is resolved to a [`NeoId`], the approach is
//! appended to its NEO's `approaches` list in input order, and the
//! population is read-only from then on.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::{
    ApproachId, ApproachRecord, CloseApproach, ModelError, ModelResult, NearEarthObject, NeoId,
};
use crate::services::ApproachFilter;

/// Owned, fully-linked population of NEOs and their close approaches.
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    by_designation: HashMap<String, NeoId>,
    by_name: HashMap<String, NeoId>,
}

impl NeoDatabase {
    /// Assemble a population from independently constructed entities.
    ///
    /// Each approach is linked to the NEO whose designation matches its raw
    /// designation, preserving the input order of both collections. An
    /// approach whose designation matches no NEO is logged at `warn` and
    /// left unlinked; a correctly paired dataset never produces one.
    pub fn new(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> Self {
        let mut db = Self {
            neos,
            approaches,
            by_designation: HashMap::new(),
            by_name: HashMap::new(),
        };

        for (i, neo) in db.neos.iter().enumerate() {
            db.by_designation.insert(neo.designation.clone(), NeoId(i));
            if let Some(name) = &neo.name {
                db.by_name.insert(name.clone(), NeoId(i));
            }
        }

        let mut unlinked = 0usize;
        for (i, approach) in db.approaches.iter_mut().enumerate() {
            match db.by_designation.get(approach.designation()) {
                Some(&neo_id) => {
                    approach.neo = Some(neo_id);
                    db.neos[neo_id.0].approaches.push(ApproachId(i));
                }
                None => {
                    unlinked += 1;
                    warn!(
                        designation = approach.designation(),
                        "close approach references an unknown NEO; left unlinked"
                    );
                }
            }
        }

        debug!(
            neos = db.neos.len(),
            approaches = db.approaches.len(),
            unlinked,
            "assembled NEO population"
        );
        db
    }

    /// Find an NEO by its primary designation.
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.by_designation
            .get(designation)
            .map(|&id| &self.neos[id.0])
    }

    /// Find an NEO by its IAU name. Unnamed objects are not reachable here.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.by_name.get(name).map(|&id| &self.neos[id.0])
    }

    /// Resolve an arena key to its NEO.
    pub fn neo(&self, id: NeoId) -> &NearEarthObject {
        &self.neos[id.0]
    }

    /// Resolve an arena key to its close approach.
    pub fn approach(&self, id: ApproachId) -> &CloseApproach {
        &self.approaches[id.0]
    }

    /// All NEOs, in input order.
    pub fn neos(&self) -> impl Iterator<Item = &NearEarthObject> {
        self.neos.iter()
    }

    /// All close approaches, in input order.
    pub fn approaches(&self) -> impl Iterator<Item = &CloseApproach> {
        self.approaches.iter()
    }

    pub fn neo_count(&self) -> usize {
        self.neos.len()
    }

    pub fn approach_count(&self) -> usize {
        self.approaches.len()
    }

    /// Stream the close approaches matching every criterion of `filter`,
    /// in input order. Unlinked approaches never match.
    pub fn query<'a>(
        &'a self,
        filter: &'a ApproachFilter,
    ) -> impl Iterator<Item = &'a CloseApproach> + 'a {
        self.approaches.iter().filter(move |approach| {
            approach
                .neo()
                .map(|id| filter.matches(approach, &self.neos[id.0]))
                .unwrap_or(false)
        })
    }

    /// Serialize an approach with a snapshot of its linked NEO.
    ///
    /// # Errors
    ///
    /// [`ModelError::Unlinked`] when the approach was never linked.
    pub fn serialize_approach(&self, approach: &CloseApproach) -> ModelResult<ApproachRecord> {
        let neo_id = approach
            .neo()
            .ok_or_else(|| ModelError::Unlinked(approach.designation().to_string()))?;
        approach.serialize(&self.neos[neo_id.0])
    }

    /// The one-sentence description of an approach, using the linked NEO's
    /// full name when available and the raw designation otherwise.
    pub fn describe_approach(&self, approach: &CloseApproach) -> String {
        match approach.neo() {
            Some(id) => approach.describe_as(&self.neos[id.0].fullname()),
            None => approach.describe_as(approach.designation()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldMap;
    use serde_json::json;

    fn fields(pairs: &[(&str, serde_json::Value)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn neo(designation: &str, name: Option<&str>, hazardous: &str) -> NearEarthObject {
        let mut map = fields(&[
            ("designation", json!(designation)),
            ("hazardous", json!(hazardous)),
        ]);
        if let Some(name) = name {
            map.insert("name".to_string(), json!(name));
        }
        NearEarthObject::from_fields(&map).unwrap()
    }

    fn approach(designation: &str, time: &str, distance: f64, velocity: f64) -> CloseApproach {
        CloseApproach::from_fields(&fields(&[
            ("designation", json!(designation)),
            ("time", json!(time)),
            ("distance", json!(distance)),
            ("velocity", json!(velocity)),
        ]))
        .unwrap()
    }

    fn sample_db() -> NeoDatabase {
        NeoDatabase::new(
            vec![
                neo("433", Some("Eros"), "N"),
                neo("2015 AB", None, "Y"),
            ],
            vec![
                approach("433", "1900-Jan-01 00:00", 0.092, 13.27),
                approach("2015 AB", "2020-Mar-02 12:00", 0.05, 22.1),
                approach("433", "1931-Jan-30 04:07", 0.174, 5.92),
            ],
        )
    }

    #[test]
    fn linking_sets_back_references() {
        let db = sample_db();
        for approach in db.approaches() {
            let id = approach.neo().expect("every approach should be linked");
            assert_eq!(db.neo(id).designation, approach.designation());
        }
    }

    #[test]
    fn approaches_keep_insertion_order() {
        let db = sample_db();
        let eros = db.get_neo_by_designation("433").unwrap();
        let times: Vec<String> = eros
            .approaches
            .iter()
            .map(|&id| db.approach(id).time_str())
            .collect();
        assert_eq!(times, vec!["1900-01-01 00:00", "1931-01-30 04:07"]);
    }

    #[test]
    fn lookup_by_designation_and_name() {
        let db = sample_db();
        assert_eq!(
            db.get_neo_by_name("Eros").unwrap().designation,
            "433"
        );
        assert_eq!(
            db.get_neo_by_designation("2015 AB").unwrap().name,
            None
        );
        assert!(db.get_neo_by_designation("99999").is_none());
        assert!(db.get_neo_by_name("Ceres").is_none());
    }

    #[test]
    fn unknown_designation_leaves_approach_unlinked() {
        let db = NeoDatabase::new(
            vec![neo("433", Some("Eros"), "N")],
            vec![approach("704", "1900-Jan-01 00:00", 0.5, 10.0)],
        );
        let orphan = db.approaches().next().unwrap();
        assert_eq!(orphan.neo(), None);
        assert!(db.serialize_approach(orphan).is_err());
        assert_eq!(db.query(&ApproachFilter::new()).count(), 0);
    }

    #[test]
    fn query_filters_on_neo_fields() {
        let db = sample_db();
        let mut filter = ApproachFilter::new();
        filter.hazardous = Some(true);

        let hits: Vec<&CloseApproach> = db.query(&filter).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].designation(), "2015 AB");
    }

    #[test]
    fn serialize_approach_resolves_the_arena_key() {
        let db = sample_db();
        let first = db.approaches().next().unwrap();
        let record = db.serialize_approach(first).unwrap();
        assert_eq!(record.neo.designation, "433");
        assert_eq!(record.datetime_utc, "1900-01-01 00:00");
    }

    #[test]
    fn describe_uses_fullname_when_linked() {
        let db = sample_db();
        let first = db.approaches().next().unwrap();
        assert_eq!(
            db.describe_approach(first),
            "At 1900-01-01 00:00, '433 Eros' approaches Earth at a distance of 0.09 au and a velocity of 13.27 km/s."
        );
    }
}
