//! Filter criteria for close-approach queries.

use chrono::NaiveDate;

use crate::models::{CloseApproach, NearEarthObject};

/// Optional criteria evaluated conjunctively against a close approach and
/// its linked NEO. An unset criterion matches everything.
///
/// Criteria that read the approach timestamp reject approaches with an
/// absent time; criteria that read the NEO diameter reject NEOs whose
/// diameter is unknown.
#[derive(Debug, Default, Clone)]
pub struct ApproachFilter {
    /// Approach occurs on exactly this date.
    pub date: Option<NaiveDate>,
    /// Approach occurs on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Approach occurs on or before this date.
    pub end_date: Option<NaiveDate>,
    /// Approach distance is at least this many astronomical units.
    pub min_distance: Option<f64>,
    /// Approach distance is at most this many astronomical units.
    pub max_distance: Option<f64>,
    /// Approach velocity is at least this many km/s.
    pub min_velocity: Option<f64>,
    /// Approach velocity is at most this many km/s.
    pub max_velocity: Option<f64>,
    /// NEO diameter is at least this many kilometers.
    pub min_diameter: Option<f64>,
    /// NEO diameter is at most this many kilometers.
    pub max_diameter: Option<f64>,
    /// NEO is (or is not) flagged potentially hazardous.
    pub hazardous: Option<bool>,
}

impl ApproachFilter {
    /// A filter with no criteria set; matches every linked approach.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when this filter has no criteria set.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.min_distance.is_none()
            && self.max_distance.is_none()
            && self.min_velocity.is_none()
            && self.max_velocity.is_none()
            && self.min_diameter.is_none()
            && self.max_diameter.is_none()
            && self.hazardous.is_none()
    }

    /// Evaluate every set criterion against the approach and its NEO.
    pub fn matches(&self, approach: &CloseApproach, neo: &NearEarthObject) -> bool {
        let date = approach.time.map(|t| t.date());

        if let Some(wanted) = self.date {
            if date != Some(wanted) {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            match date {
                Some(d) if d >= start => {}
                _ => return false,
            }
        }
        if let Some(end) = self.end_date {
            match date {
                Some(d) if d <= end => {}
                _ => return false,
            }
        }

        if let Some(min) = self.min_distance {
            if approach.distance < min {
                return false;
            }
        }
        if let Some(max) = self.max_distance {
            if approach.distance > max {
                return false;
            }
        }

        if let Some(min) = self.min_velocity {
            if approach.velocity < min {
                return false;
            }
        }
        if let Some(max) = self.max_velocity {
            if approach.velocity > max {
                return false;
            }
        }

        if let Some(min) = self.min_diameter {
            match neo.diameter {
                Some(d) if d >= min => {}
                _ => return false,
            }
        }
        if let Some(max) = self.max_diameter {
            match neo.diameter {
                Some(d) if d <= max => {}
                _ => return false,
            }
        }

        if let Some(wanted) = self.hazardous {
            if neo.hazardous != wanted {
                return false;
            }
        }

        true
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

    fn sample_pair() -> (CloseApproach, NearEarthObject) {
        let approach = CloseApproach::from_fields(&fields(&[
            ("designation", json!("433")),
            ("time", json!("2020-Jan-15 06:30")),
            ("distance", json!("0.25")),
            ("velocity", json!("12.5")),
        ]))
        .unwrap();
        let neo = NearEarthObject::from_fields(&fields(&[
            ("designation", json!("433")),
            ("name", json!("Eros")),
            ("diameter", json!("16.84")),
            ("hazardous", json!("N")),
        ]))
        .unwrap();
        (approach, neo)
    }

    #[test]
    fn empty_filter_matches_everything() {
        let (approach, neo) = sample_pair();
        let filter = ApproachFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&approach, &neo));
    }

    #[test]
    fn exact_date_criterion() {
        let (approach, neo) = sample_pair();
        let mut filter = ApproachFilter::new();

        filter.date = NaiveDate::from_ymd_opt(2020, 1, 15);
        assert!(filter.matches(&approach, &neo));

        filter.date = NaiveDate::from_ymd_opt(2020, 1, 16);
        assert!(!filter.matches(&approach, &neo));
    }

    #[test]
    fn date_range_criteria() {
        let (approach, neo) = sample_pair();
        let mut filter = ApproachFilter::new();
        filter.start_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        filter.end_date = NaiveDate::from_ymd_opt(2020, 1, 31);
        assert!(filter.matches(&approach, &neo));

        filter.end_date = NaiveDate::from_ymd_opt(2020, 1, 14);
        assert!(!filter.matches(&approach, &neo));
    }

    #[test]
    fn absent_time_fails_date_criteria() {
        let (mut approach, neo) = sample_pair();
        approach.time = None;

        let mut filter = ApproachFilter::new();
        assert!(filter.matches(&approach, &neo));

        filter.start_date = NaiveDate::from_ymd_opt(1900, 1, 1);
        assert!(!filter.matches(&approach, &neo));
    }

    #[test]
    fn distance_and_velocity_bounds() {
        let (approach, neo) = sample_pair();
        let mut filter = ApproachFilter::new();
        filter.min_distance = Some(0.1);
        filter.max_distance = Some(0.3);
        filter.min_velocity = Some(10.0);
        filter.max_velocity = Some(15.0);
        assert!(filter.matches(&approach, &neo));

        filter.max_velocity = Some(12.0);
        assert!(!filter.matches(&approach, &neo));
    }

    #[test]
    fn unknown_diameter_fails_diameter_criteria() {
        let (approach, mut neo) = sample_pair();
        neo.diameter = None;

        let mut filter = ApproachFilter::new();
        filter.min_diameter = Some(0.0);
        assert!(!filter.matches(&approach, &neo));

        let mut filter = ApproachFilter::new();
        filter.max_diameter = Some(100.0);
        assert!(!filter.matches(&approach, &neo));
    }

    #[test]
    fn hazardous_criterion_matches_flag() {
        let (approach, neo) = sample_pair();
        let mut filter = ApproachFilter::new();

        filter.hazardous = Some(false);
        assert!(filter.matches(&approach, &neo));

        filter.hazardous = Some(true);
        assert!(!filter.matches(&approach, &neo));
    }
}
