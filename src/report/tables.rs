//! Conversion of contacts and aggregates into Polars `DataFrame`s.
use super::profile::ResidueProfile;
use super::tally::InteractionTally;
use crate::contacts::{ClassifiedContact, ContactRecord};
use polars::prelude::*;

/// Classified contacts with the columns
/// `protein_residue, protein_atom, <subject_column>, type, distance`.
///
/// `subject_column` is `ligand_atom` in ligand mode and `subject_atom` in chain mode.
pub fn classified_to_df(
    res: &[ClassifiedContact],
    subject_column: &str,
) -> PolarsResult<DataFrame> {
    df!(
        "protein_residue" => res.iter().map(|x| x.protein_residue().to_string()).collect::<Vec<String>>(),
        "protein_atom" => res.iter().map(|x| x.protein.atomn.clone()).collect::<Vec<String>>(),
        subject_column => res.iter().map(|x| x.subject.atomn.clone()).collect::<Vec<String>>(),
        "type" => res.iter().map(|x| x.interaction.to_string()).collect::<Vec<String>>(),
        "distance" => res.iter().map(|x| x.distance).collect::<Vec<f64>>(),
    )
}

/// Raw contacts, one row per record.
pub fn contacts_to_df(res: &[ContactRecord]) -> PolarsResult<DataFrame> {
    df!(
        "from_chain" => res.iter().map(|x| x.subject.chain.clone()).collect::<Vec<String>>(),
        "from_resi" => res.iter().map(|x| x.subject.resi.clone()).collect::<Vec<String>>(),
        "from_resn" => res.iter().map(|x| x.subject.resn.clone()).collect::<Vec<String>>(),
        "from_atomn" => res.iter().map(|x| x.subject.atomn.clone()).collect::<Vec<String>>(),
        "to_chain" => res.iter().map(|x| x.partner.chain.clone()).collect::<Vec<String>>(),
        "to_resi" => res.iter().map(|x| x.partner.resi.clone()).collect::<Vec<String>>(),
        "to_resn" => res.iter().map(|x| x.partner.resn.clone()).collect::<Vec<String>>(),
        "to_atomn" => res.iter().map(|x| x.partner.atomn.clone()).collect::<Vec<String>>(),
        "interaction" => res.iter().map(|x| x.interaction.to_string()).collect::<Vec<String>>(),
        "distance" => res.iter().map(|x| x.distance).collect::<Vec<f64>>(),
    )
}

/// Interaction counts sorted by descending count.
pub fn tally_to_df(tally: &InteractionTally) -> PolarsResult<DataFrame> {
    let sorted = tally.sorted();
    df!(
        "type" => sorted.iter().map(|(t, _)| t.to_string()).collect::<Vec<String>>(),
        "count" => sorted.iter().map(|(_, n)| *n as u64).collect::<Vec<u64>>(),
    )
}

/// One row per residue with its interaction count and distinct types.
pub fn profiles_to_df(profiles: &[ResidueProfile]) -> PolarsResult<DataFrame> {
    df!(
        "residue" => profiles.iter().map(|p| p.residue.to_string()).collect::<Vec<String>>(),
        "interactions" => profiles.iter().map(|p| p.total() as u64).collect::<Vec<u64>>(),
        "distinct_types" => profiles.iter().map(|p| {
            p.distinct_types().iter().map(|t| t.to_string()).collect::<Vec<String>>().join(";")
        }).collect::<Vec<String>>(),
    )
}
