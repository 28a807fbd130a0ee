//! Aggregation of contacts into tallies, residue profiles, summaries and
//! set comparisons, plus their table and text renderings.
pub mod compare;
pub mod profile;
pub mod summary;
pub mod tables;
pub mod tally;
pub mod text;

// Re-exports
pub use compare::{
    compare, Agreement, ComparisonResult, MatchKey, MatchRule, Matchable, OverlapMetrics,
    PredictionVerdict, StructuralScores, TypeComparison, ValidationReport,
};
pub use profile::{
    hot_spots, profile_all_residues, profile_by_residue, render_profiles, ResidueProfile,
};
pub use summary::{summarize, ContactSummary, DistanceStats};
pub use tables::{classified_to_df, contacts_to_df, profiles_to_df, tally_to_df};
pub use tally::{tally_by_type, HasInteraction, InteractionTally};
pub use text::{comparison_report, summary_report};
