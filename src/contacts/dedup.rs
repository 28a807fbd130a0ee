//! Handling of contacts reported from both atoms.
use super::{AtomPath, ContactRecord, InteractionType};
use std::collections::HashSet;

/// What to do with contacts reported once from each side (A→B and B→A).
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Keep every record as reported
    #[default]
    Keep,
    /// Keep the first record of each unordered atom pair and interaction type
    Symmetric,
}

impl std::fmt::Display for DedupPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DedupPolicy::Keep => write!(f, "keep"),
            DedupPolicy::Symmetric => write!(f, "symmetric"),
        }
    }
}

impl DedupPolicy {
    /// Apply the policy, preserving the order of the surviving records.
    pub fn apply(self, records: Vec<ContactRecord>) -> Vec<ContactRecord> {
        match self {
            DedupPolicy::Keep => records,
            DedupPolicy::Symmetric => {
                let mut seen: HashSet<(AtomPath, AtomPath, InteractionType)> = HashSet::new();
                records
                    .into_iter()
                    .filter(|r| {
                        let (a, b) = if r.subject <= r.partner {
                            (&r.subject, &r.partner)
                        } else {
                            (&r.partner, &r.subject)
                        };
                        seen.insert((a.clone(), b.clone(), r.interaction.clone()))
                    })
                    .collect()
            }
        }
    }
}
