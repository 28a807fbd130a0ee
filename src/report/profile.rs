//! Per-residue interaction profiles.
use crate::contacts::{ClassifiedContact, ContactRecord, InteractionType, ResidueId};
use serde::Serialize;
use std::collections::HashMap;

/// All interactions one residue takes part in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidueProfile {
    /// The residue
    pub residue: ResidueId,
    /// Every interaction the residue takes part in, duplicates included
    pub interactions: Vec<InteractionType>,
}

impl ResidueProfile {
    fn new(residue: ResidueId) -> Self {
        Self {
            residue,
            interactions: Vec::new(),
        }
    }

    /// Number of interactions.
    pub fn total(&self) -> usize {
        self.interactions.len()
    }

    /// Distinct interaction types, in the order they were first seen.
    pub fn distinct_types(&self) -> Vec<&InteractionType> {
        let mut distinct: Vec<&InteractionType> = Vec::new();
        for t in &self.interactions {
            if !distinct.contains(&t) {
                distinct.push(t);
            }
        }
        distinct
    }

    /// `A:LEU10 : 3 interactions (hbond, vdw)`
    pub fn render(&self) -> String {
        let types: Vec<String> = self.distinct_types().iter().map(|t| t.to_string()).collect();
        format!(
            "{} : {} {} ({})",
            self.residue,
            self.total(),
            match self.total() {
                1 => "interaction",
                _ => "interactions",
            },
            types.join(", ")
        )
    }
}

/// Group `(residue, type)` pairs into profiles sorted by descending total.
///
/// Ties keep the order in which residues were first seen.
fn collect_profiles<'a, I>(pairs: I) -> Vec<ResidueProfile>
where
    I: IntoIterator<Item = (ResidueId, &'a InteractionType)>,
{
    let mut index: HashMap<ResidueId, usize> = HashMap::new();
    let mut profiles: Vec<ResidueProfile> = Vec::new();
    for (residue, t) in pairs {
        let i = *index.entry(residue.clone()).or_insert_with(|| {
            profiles.push(ResidueProfile::new(residue));
            profiles.len() - 1
        });
        profiles[i].interactions.push(t.clone());
    }
    profiles.sort_by(|a, b| b.total().cmp(&a.total()));
    profiles
}

/// Group classified contacts by their protein residue.
pub fn profile_by_residue(records: &[ClassifiedContact]) -> Vec<ResidueProfile> {
    collect_profiles(
        records
            .iter()
            .map(|r| (r.protein_residue(), &r.interaction)),
    )
}

/// Group raw contacts by residue, counting each contact for both of its residues.
pub fn profile_all_residues(records: &[ContactRecord]) -> Vec<ResidueProfile> {
    collect_profiles(records.iter().flat_map(|r| {
        [
            (r.subject.residue(), &r.interaction),
            (r.partner.residue(), &r.interaction),
        ]
    }))
}

/// Residues with at least `min_interactions` interactions, in ranking order.
pub fn hot_spots(profiles: &[ResidueProfile], min_interactions: usize) -> Vec<&ResidueProfile> {
    profiles
        .iter()
        .filter(|p| p.total() >= min_interactions)
        .collect()
}

/// Render profiles one per line.
pub fn render_profiles<'a, I>(profiles: I) -> String
where
    I: IntoIterator<Item = &'a ResidueProfile>,
{
    let lines: Vec<String> = profiles.into_iter().map(|p| p.render()).collect();
    if lines.is_empty() {
        return "0 interactions found\n".to_string();
    }
    lines.iter().map(|l| format!("{l}\n")).collect()
}
