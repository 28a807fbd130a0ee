#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # Arpdigest Library
//!
//! This library turns the atom-keyed JSON contact output of Arpeggio into typed
//! contact records, classifies them against a ligand or a set of chains, and
//! aggregates them into interaction tallies, residue rankings and set comparisons.
//!
//! Tables are returned as Polars DataFrames, which can be written to CSV,
//! Parquet or JSON with [`write_df_to_file`].

pub mod contacts;
mod error;
pub mod report;
mod utils;

// Re-export key public types
pub use contacts::{
    classify, AtomPath, ClassifiedContact, ContactRecord, DedupPolicy, ExtractOptions,
    Extraction, InteractionType, Partition, ResidueId, Selection, SubjectPredicate,
};
pub use error::{Error, Result};
pub use report::{
    compare, profile_by_residue, summarize, tally_by_type, ComparisonResult, ContactSummary,
    InteractionTally, MatchRule, ResidueProfile,
};
pub use utils::{
    ensure_parent_dir, run_with_threads, table_for, write_df_to_file, write_json, write_text,
    DataFrameFileType,
};

use std::path::Path;
use tracing::{debug, info};

/// Classified contacts and their aggregates for one contact file.
#[derive(Debug, Clone)]
pub struct InterfaceAnalysis {
    /// Cross-boundary contacts in input order
    pub contacts: Vec<ClassifiedContact>,
    /// Contacts per interaction type
    pub tally: InteractionTally,
    /// Protein residues ranked by number of contacts
    pub residues: Vec<ResidueProfile>,
    /// Number of contacts extracted before classification
    pub extracted: usize,
    /// Number of malformed records that were skipped
    pub skipped: usize,
}

/// Load an Arpeggio contact file and apply the duplicate policy.
///
/// # Arguments
///
/// * `input` - Path to the Arpeggio JSON output
/// * `options` - Extraction options (strict mode)
/// * `dedup` - How to treat contacts reported from both sides
///
/// # Example
///
/// ```no_run
/// use arpdigest::{load_contacts, DedupPolicy, ExtractOptions};
/// use std::path::Path;
///
/// let extraction = load_contacts(
///     Path::new("arpeggio_results/fold_model_0.json"),
///     &ExtractOptions::default(),
///     DedupPolicy::Keep,
/// ).unwrap();
/// println!("Found {} contacts", extraction.records.len());
/// ```
pub fn load_contacts(
    input: &Path,
    options: &ExtractOptions,
    dedup: DedupPolicy,
) -> Result<Extraction> {
    let mut extraction = contacts::load_contacts(input, options)?;
    let before = extraction.records.len();
    extraction.records = dedup.apply(extraction.records);
    if extraction.records.len() != before {
        debug!(
            "Removed {} mirrored duplicate contacts",
            before - extraction.records.len()
        );
    }
    Ok(extraction)
}

/// Classify the contacts of a file against `selection` and aggregate them.
///
/// Zero cross-boundary contacts is not an error; the aggregates are then empty.
///
/// # Example
///
/// ```no_run
/// use arpdigest::{analyze_interface, DedupPolicy, ExtractOptions, Selection};
/// use std::path::Path;
///
/// let selection = Selection::ligand("NUX").unwrap();
/// let analysis = analyze_interface(
///     Path::new("arpeggio_results/fold_model_0.json"),
///     &selection,
///     &ExtractOptions::default(),
///     DedupPolicy::Keep,
/// ).unwrap();
/// print!("{}", analysis.tally.render());
/// ```
pub fn analyze_interface(
    input: &Path,
    selection: &Selection,
    options: &ExtractOptions,
    dedup: DedupPolicy,
) -> Result<InterfaceAnalysis> {
    let extraction = load_contacts(input, options, dedup)?;
    let contacts = classify(&extraction.records, selection);
    debug!(
        "Kept {} of {} contacts crossing {selection}",
        contacts.len(),
        extraction.records.len()
    );

    let tally = tally_by_type(&contacts);
    let residues = profile_by_residue(&contacts);
    info!(
        "Found {} {} with {}",
        contacts.len(),
        match contacts.len() {
            1 => "interaction",
            _ => "interactions",
        },
        selection
    );

    Ok(InterfaceAnalysis {
        contacts,
        tally,
        residues,
        extracted: extraction.records.len(),
        skipped: extraction.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        let root = env!("CARGO_MANIFEST_DIR");
        Path::new(root).join("test-data").join(name)
    }

    #[test]
    fn test_ligand_interface() {
        let selection = Selection::ligand("NUX").unwrap();
        let analysis = analyze_interface(
            &fixture("predicted.json"),
            &selection,
            &ExtractOptions::default(),
            DedupPolicy::Keep,
        )
        .unwrap();

        assert_eq!(analysis.extracted, 9);
        assert_eq!(analysis.skipped, 1);
        assert_eq!(analysis.contacts.len(), 7);
        assert_eq!(analysis.tally.total(), analysis.contacts.len());
        assert_eq!(analysis.residues[0].residue.to_string(), "A:LEU10");
        assert_eq!(analysis.residues[0].total(), 4);
        assert!(analysis
            .contacts
            .iter()
            .all(|c| c.subject.resn == "NUX"));
    }

    #[test]
    fn test_symmetric_dedup_on_fixture() {
        let selection = Selection::ligand("NUX").unwrap();
        let analysis = analyze_interface(
            &fixture("predicted.json"),
            &selection,
            &ExtractOptions::default(),
            DedupPolicy::Symmetric,
        )
        .unwrap();
        assert_eq!(analysis.extracted, 8);
        assert_eq!(analysis.contacts.len(), 6);
        assert_eq!(analysis.residues[0].total(), 3);
    }

    #[test]
    fn test_chain_interface() {
        let selection = Selection::chains("B").unwrap();
        let analysis = analyze_interface(
            &fixture("predicted.json"),
            &selection,
            &ExtractOptions::default(),
            DedupPolicy::Keep,
        )
        .unwrap();
        // Ligand-ligand contact within chain B is a self contact
        assert_eq!(analysis.contacts.len(), 7);
        assert!(analysis
            .contacts
            .iter()
            .all(|c| c.partition == Partition::ProteinVsProtein));
    }

    #[test]
    fn test_no_interface_is_not_an_error() {
        let selection = Selection::ligand("ATP").unwrap();
        let analysis = analyze_interface(
            &fixture("predicted.json"),
            &selection,
            &ExtractOptions::default(),
            DedupPolicy::Keep,
        )
        .unwrap();
        assert!(analysis.contacts.is_empty());
        assert_eq!(analysis.tally.render(), "0 interactions found\n");
    }

    #[test]
    fn test_strict_mode_on_fixture() {
        let err = load_contacts(
            &fixture("predicted.json"),
            &ExtractOptions { strict: true },
            DedupPolicy::Keep,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { .. }));
    }

    #[test]
    fn test_predicted_vs_experimental() {
        let opts = ExtractOptions::default();
        let predicted = load_contacts(&fixture("predicted.json"), &opts, DedupPolicy::Keep).unwrap();
        let experimental =
            load_contacts(&fixture("experimental.json"), &opts, DedupPolicy::Keep).unwrap();
        let res = compare(
            &predicted.records,
            &experimental.records,
            MatchRule::Residue,
        );
        assert_eq!(res.overall.first_total, 7);
        assert_eq!(res.overall.second_total, 5);
        assert_eq!(res.overall.matched, 4);
    }
}
