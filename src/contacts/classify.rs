//! Partitioning of contacts relative to a ligand or a set of chains.
use super::{AtomPath, ContactRecord, InteractionType, ResidueId};
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Structural partition of a single contact relative to the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Partition {
    /// One side is the ligand, the other is not
    LigandVsProtein,
    /// One side is in the subject chains, the other is not
    ProteinVsProtein,
    /// Both sides belong to the subject
    SelfContact,
    /// Neither side belongs to the subject
    Irrelevant,
}

impl Partition {
    /// Whether the contact crosses the subject boundary.
    pub fn is_cross_boundary(&self) -> bool {
        matches!(self, Partition::LigandVsProtein | Partition::ProteinVsProtein)
    }
}

/// Decides which atoms form the subject of a classification.
pub trait SubjectPredicate {
    /// Whether the atom belongs to the subject.
    fn is_subject(&self, atom: &AtomPath) -> bool;

    /// The label given to contacts that cross the subject boundary.
    fn cross_partition(&self) -> Partition {
        Partition::ProteinVsProtein
    }

    /// Classify one record against this predicate.
    fn partition(&self, record: &ContactRecord) -> Partition {
        match (self.is_subject(&record.subject), self.is_subject(&record.partner)) {
            (true, false) | (false, true) => self.cross_partition(),
            (true, true) => Partition::SelfContact,
            (false, false) => Partition::Irrelevant,
        }
    }
}

/// Subject selection by ligand residue code or by chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Residues whose name matches one of the codes (case-insensitive)
    Ligand(BTreeSet<String>),
    /// Atoms in one of the chains
    Chains(BTreeSet<String>),
}

impl Selection {
    /// Parse a comma-separated list of ligand codes, e.g. `NUX,ATP`.
    pub fn ligand(codes: &str) -> Result<Self> {
        let codes = parse_list(codes)?
            .into_iter()
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Ok(Selection::Ligand(codes))
    }

    /// Parse a comma-separated list of chain identifiers, e.g. `A,B`.
    pub fn chains(ids: &str) -> Result<Self> {
        Ok(Selection::Chains(parse_list(ids)?))
    }

    /// Column name used for the subject atom in tables.
    pub fn subject_column(&self) -> &'static str {
        match self {
            Selection::Ligand(_) => "ligand_atom",
            Selection::Chains(_) => "subject_atom",
        }
    }
}

impl SubjectPredicate for Selection {
    fn is_subject(&self, atom: &AtomPath) -> bool {
        match self {
            Selection::Ligand(codes) => codes.contains(&atom.resn.to_ascii_uppercase()),
            Selection::Chains(ids) => ids.contains(&atom.chain),
        }
    }

    fn cross_partition(&self) -> Partition {
        match self {
            Selection::Ligand(_) => Partition::LigandVsProtein,
            Selection::Chains(_) => Partition::ProteinVsProtein,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, items) = match self {
            Selection::Ligand(codes) => ("ligand", codes),
            Selection::Chains(ids) => ("chains", ids),
        };
        let items: Vec<&str> = items.iter().map(|s| s.as_str()).collect();
        write!(f, "{kind} {}", items.join(","))
    }
}

fn parse_list(input: &str) -> Result<BTreeSet<String>> {
    let items: BTreeSet<String> = input
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if items.is_empty() {
        return Err(Error::InvalidSelection {
            input: input.to_string(),
            reason: "no identifiers given",
        });
    }
    if items.iter().any(|c| c.contains('/')) {
        return Err(Error::InvalidSelection {
            input: input.to_string(),
            reason: "identifiers may not contain '/'",
        });
    }
    Ok(items)
}

/// A cross-boundary contact, viewed from the protein side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedContact {
    /// How the contact crosses the boundary
    pub partition: Partition,
    /// Atom on the non-subject side
    pub protein: AtomPath,
    /// Atom on the subject side
    pub subject: AtomPath,
    /// Interaction type
    pub interaction: InteractionType,
    /// Distance in Ångströms; `0.0` when unspecified
    pub distance: f64,
}

impl ClassifiedContact {
    fn new(
        partition: Partition,
        protein: &AtomPath,
        subject: &AtomPath,
        record: &ContactRecord,
    ) -> Self {
        Self {
            partition,
            protein: protein.clone(),
            subject: subject.clone(),
            interaction: record.interaction.clone(),
            distance: record.distance,
        }
    }

    /// Residue on the non-subject side.
    pub fn protein_residue(&self) -> ResidueId {
        self.protein.residue()
    }

    /// Residue on the subject side.
    pub fn subject_residue(&self) -> ResidueId {
        self.subject.residue()
    }
}

impl fmt::Display for ClassifiedContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{res} {atom} - {subj} {subj_atom}: {intxn} ({dist:.2} Å)",
            res = self.protein_residue(),
            atom = self.protein.atomn,
            subj = self.subject_residue(),
            subj_atom = self.subject.atomn,
            intxn = self.interaction,
            dist = self.distance
        )
    }
}

/// Keep only contacts that cross the subject boundary, in input order.
///
/// Contacts where both or neither side belong to the subject are dropped.
pub fn classify<P: SubjectPredicate + ?Sized>(
    records: &[ContactRecord],
    predicate: &P,
) -> Vec<ClassifiedContact> {
    records
        .iter()
        .filter_map(|r| {
            let partition = predicate.partition(r);
            if !partition.is_cross_boundary() {
                return None;
            }
            if predicate.is_subject(&r.subject) {
                Some(ClassifiedContact::new(partition, &r.partner, &r.subject, r))
            } else {
                Some(ClassifiedContact::new(partition, &r.subject, &r.partner, r))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subject: &str, partner: &str, t: &str, d: f64) -> ContactRecord {
        ContactRecord::new(
            subject.parse().unwrap(),
            partner.parse().unwrap(),
            InteractionType::from_label(t),
            d,
        )
    }

    #[test]
    fn test_ligand_contact() {
        let records = vec![record("/A/10/LEU/CA/", "/B/5/NUX/C1/", "hbond", 2.9)];
        let sel = Selection::ligand("NUX").unwrap();
        let res = classify(&records, &sel);

        assert_eq!(res.len(), 1);
        let c = &res[0];
        assert_eq!(c.partition, Partition::LigandVsProtein);
        assert_eq!(c.protein_residue().to_string(), "A:LEU10");
        assert_eq!(c.protein.atomn, "CA");
        assert_eq!(c.subject.atomn, "C1");
        assert_eq!(c.interaction.to_string(), "hbond");
        assert_eq!(c.distance, 2.9);
    }

    #[test]
    fn test_ligand_self_contact_is_dropped() {
        let records = vec![record("/B/5/NUX/C1/", "/B/5/NUX/O2/", "vdw", 3.1)];
        let sel = Selection::ligand("nux").unwrap();
        assert_eq!(sel.partition(&records[0]), Partition::SelfContact);
        assert!(classify(&records, &sel).is_empty());
    }

    #[test]
    fn test_irrelevant_contact_is_dropped() {
        let records = vec![record("/A/10/LEU/CA/", "/A/14/ILE/CD1/", "hydrophobic", 3.9)];
        let sel = Selection::ligand("NUX").unwrap();
        assert_eq!(sel.partition(&records[0]), Partition::Irrelevant);
        assert!(classify(&records, &sel).is_empty());
    }

    #[test]
    fn test_classification_is_symmetric() {
        let records = vec![
            record("/A/10/LEU/CA/", "/B/5/NUX/C1/", "hbond", 2.9),
            record("/B/5/NUX/O2/", "/A/12/SER/OG/", "hbond", 2.7),
            record("/A/10/LEU/CD1/", "/B/5/NUX/C3/", "hydrophobic", 3.8),
        ];
        let swapped: Vec<ContactRecord> = records.iter().map(|r| r.reversed()).collect();
        let sel = Selection::ligand("NUX").unwrap();
        assert_eq!(classify(&records, &sel), classify(&swapped, &sel));
    }

    #[test]
    fn test_chain_mode() {
        let records = vec![
            record("/A/10/LEU/CA/", "/B/20/GLU/OE1/", "ionic", 3.5),
            record("/B/20/GLU/OE2/", "/A/11/LYS/NZ/", "ionic", 3.2),
            record("/A/10/LEU/CA/", "/A/30/VAL/CB/", "vdw", 3.9),
        ];
        let sel = Selection::chains("A").unwrap();
        let res = classify(&records, &sel);
        assert_eq!(res.len(), 2);
        assert!(res.iter().all(|c| c.partition == Partition::ProteinVsProtein));
        assert!(res.iter().all(|c| c.protein.chain == "B"));
        assert_eq!(res[1].subject_residue().to_string(), "A:LYS11");
        assert_eq!(sel.subject_column(), "subject_atom");
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!(
            Selection::chains(" A, B ,").unwrap(),
            Selection::Chains(BTreeSet::from(["A".to_string(), "B".to_string()]))
        );
        assert!(Selection::ligand(",").is_err());
        assert!(Selection::chains("A/B").is_err());
    }
}
