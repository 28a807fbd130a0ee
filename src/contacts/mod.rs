//! Decoding and classification of Arpeggio contact output.
//!
//! Arpeggio writes one JSON object keyed by atom paths (`/chain/resi/resn/atom/`),
//! where each atom may carry one or more `contact` descriptors. This module
//! flattens that structure into typed [`ContactRecord`]s and partitions them by
//! a caller-chosen subject (a ligand or a set of chains).
pub mod classify;
pub mod dedup;
pub mod extract;
pub mod path;
pub mod structs;

// Re-exports
pub use classify::{classify, ClassifiedContact, Partition, Selection, SubjectPredicate};
pub use dedup::DedupPolicy;
pub use extract::{extract_contacts, load_contacts, read_contact_file, ExtractOptions, Extraction};
pub use path::PathError;
pub use structs::*;
