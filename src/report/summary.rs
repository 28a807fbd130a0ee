//! Whole-file contact summary.
use super::profile::{profile_all_residues, ResidueProfile};
use super::tally::{tally_by_type, InteractionTally};
use crate::contacts::{ContactRecord, ResidueId};
use std::collections::HashSet;

/// Mean, minimum and maximum over the contacts that carry a distance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistanceStats {
    /// Number of contacts with a distance
    pub count: usize,
    /// Mean distance
    pub mean: f64,
    /// Shortest distance
    pub min: f64,
    /// Longest distance
    pub max: f64,
}

impl DistanceStats {
    /// Statistics over the specified distances; all zero when there are none.
    pub fn from_records(records: &[ContactRecord]) -> Self {
        let distances: Vec<f64> = records
            .iter()
            .filter(|r| r.has_distance())
            .map(|r| r.distance)
            .collect();
        if distances.is_empty() {
            return Self::default();
        }
        Self {
            count: distances.len(),
            mean: distances.iter().sum::<f64>() / distances.len() as f64,
            min: distances.iter().copied().fold(f64::INFINITY, f64::min),
            max: distances.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Whole-file overview of a contact set.
#[derive(Debug, Clone)]
pub struct ContactSummary {
    /// Number of contacts
    pub total: usize,
    /// Contacts per type
    pub types: InteractionTally,
    /// Number of distinct unordered residue pairs
    pub unique_residue_pairs: usize,
    /// Per-residue profiles counting both sides of each contact
    pub residues: Vec<ResidueProfile>,
    /// Distance statistics
    pub distances: DistanceStats,
}

/// Summarize raw contacts without any classification.
pub fn summarize(records: &[ContactRecord]) -> ContactSummary {
    let pairs: HashSet<(ResidueId, ResidueId)> = records
        .iter()
        .map(|r| {
            let (a, b) = (r.subject.residue(), r.partner.residue());
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        })
        .collect();

    ContactSummary {
        total: records.len(),
        types: tally_by_type(records),
        unique_residue_pairs: pairs.len(),
        residues: profile_all_residues(records),
        distances: DistanceStats::from_records(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::InteractionType;

    fn records() -> Vec<ContactRecord> {
        [
            ("/A/10/LEU/CA/", "/B/5/NUX/C1/", "hbond", 2.9),
            ("/B/5/NUX/C1/", "/A/10/LEU/CA/", "hbond", 2.9),
            ("/A/11/SER/OG/", "/B/5/NUX/O2/", "hbond", 2.7),
            ("/A/11/SER/CB/", "/B/5/NUX/C2/", "vdw", 0.0),
            ("/A/14/ILE/CD1/", "/B/5/NUX/C3/", "hydrophobic", 4.1),
        ]
        .iter()
        .map(|(a, b, t, d)| {
            ContactRecord::new(
                a.parse().unwrap(),
                b.parse().unwrap(),
                InteractionType::from_label(t),
                *d,
            )
        })
        .collect()
    }

    #[test]
    fn test_summary() {
        let summary = summarize(&records());
        assert_eq!(summary.total, 5);
        assert_eq!(summary.types.count(&InteractionType::HydrogenBond), 3);
        assert_eq!(summary.unique_residue_pairs, 3);
        assert_eq!(summary.residues[0].residue.to_string(), "B:NUX5");
        assert_eq!(summary.residues[0].total(), 5);

        let d = summary.distances;
        assert_eq!(d.count, 4);
        assert_eq!(d.min, 2.7);
        assert_eq!(d.max, 4.1);
        assert!((d.mean - (2.9 + 2.9 + 2.7 + 4.1) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.types.is_empty());
        assert_eq!(summary.distances, DistanceStats::default());
    }
}
