//! Set comparison of two contact sets, e.g. a prediction against an
//! experimental structure.
use crate::contacts::{ClassifiedContact, ContactRecord, InteractionType};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// How contacts from two independent sets are matched.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchRule {
    /// Unordered residue pair and interaction type
    #[default]
    Residue,
    /// Unordered atom pair and interaction type
    Atom,
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchRule::Residue => write!(f, "residue"),
            MatchRule::Atom => write!(f, "atom"),
        }
    }
}

/// Identity of a contact under a [`MatchRule`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MatchKey {
    /// Lesser of the two endpoints
    pub first: String,
    /// Greater of the two endpoints
    pub second: String,
    /// Interaction type label
    pub interaction: String,
}

impl MatchKey {
    fn new(a: String, b: String, interaction: &InteractionType) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first,
            second,
            interaction: interaction.to_string(),
        }
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.first, self.second, self.interaction)
    }
}

/// Contacts that can be compared across sets.
pub trait Matchable {
    /// The key identifying this contact under `rule`.
    fn match_key(&self, rule: MatchRule) -> MatchKey;
}

impl Matchable for ContactRecord {
    fn match_key(&self, rule: MatchRule) -> MatchKey {
        match rule {
            MatchRule::Residue => MatchKey::new(
                self.subject.residue().to_string(),
                self.partner.residue().to_string(),
                &self.interaction,
            ),
            MatchRule::Atom => MatchKey::new(
                self.subject.to_string(),
                self.partner.to_string(),
                &self.interaction,
            ),
        }
    }
}

impl Matchable for ClassifiedContact {
    fn match_key(&self, rule: MatchRule) -> MatchKey {
        match rule {
            MatchRule::Residue => MatchKey::new(
                self.protein_residue().to_string(),
                self.subject_residue().to_string(),
                &self.interaction,
            ),
            MatchRule::Atom => MatchKey::new(
                self.protein.to_string(),
                self.subject.to_string(),
                &self.interaction,
            ),
        }
    }
}

/// Overlap counts and derived metrics between two sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlapMetrics {
    /// Size of the first set
    pub first_total: usize,
    /// Size of the second set
    pub second_total: usize,
    /// Keys present in both sets
    pub matched: usize,
    /// Keys only in the first set
    pub only_in_first: usize,
    /// Keys only in the second set
    pub only_in_second: usize,
    /// `matched / first_total`, 0 for an empty first set
    pub precision: f64,
    /// `matched / second_total`, 0 for an empty second set
    pub recall: f64,
    /// Harmonic mean of precision and recall, 0 when both are 0
    pub f1: f64,
}

impl OverlapMetrics {
    fn from_sets(first: &BTreeSet<MatchKey>, second: &BTreeSet<MatchKey>) -> Self {
        let matched = first.intersection(second).count();
        let precision = ratio(matched, first.len());
        let recall = ratio(matched, second.len());
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            first_total: first.len(),
            second_total: second.len(),
            matched,
            only_in_first: first.len() - matched,
            only_in_second: second.len() - matched,
            precision,
            recall,
            f1,
        }
    }
}

fn ratio(n: usize, d: usize) -> f64 {
    if d == 0 {
        0.0
    } else {
        n as f64 / d as f64
    }
}

/// Qualitative reading of an F1 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Agreement {
    /// F1 > 0.8
    Excellent,
    /// F1 > 0.6
    Good,
    /// F1 > 0.4
    Moderate,
    /// Anything lower
    Poor,
}

impl Agreement {
    /// Grade an F1 score.
    pub fn from_f1(f1: f64) -> Self {
        if f1 > 0.8 {
            Agreement::Excellent
        } else if f1 > 0.6 {
            Agreement::Good
        } else if f1 > 0.4 {
            Agreement::Moderate
        } else {
            Agreement::Poor
        }
    }
}

impl fmt::Display for Agreement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Agreement::Excellent => "EXCELLENT agreement (F1 > 0.8)",
            Agreement::Good => "GOOD agreement (F1 > 0.6)",
            Agreement::Moderate => "MODERATE agreement (F1 > 0.4)",
            Agreement::Poor => "POOR agreement (F1 <= 0.4)",
        };
        f.write_str(s)
    }
}

/// Metrics restricted to one interaction type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeComparison {
    /// Interaction type label
    pub interaction: String,
    /// Overlap within this type
    pub metrics: OverlapMetrics,
}

/// Result of comparing two interaction sets, e.g. predicted vs experimental.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Rule used to match contacts
    pub rule: MatchRule,
    /// Overall overlap
    pub overall: OverlapMetrics,
    /// Grade of the overall F1
    pub agreement: Agreement,
    /// Keys found in both sets
    pub matched: Vec<MatchKey>,
    /// Keys only in the first set
    pub only_in_first: Vec<MatchKey>,
    /// Keys only in the second set
    pub only_in_second: Vec<MatchKey>,
    /// Per-type breakdown, sorted by descending first-set count
    pub by_type: Vec<TypeComparison>,
}

/// Compare two interaction sets as sets of [`MatchKey`]s.
///
/// Input order is irrelevant and duplicate keys within a set collapse, so
/// totals are counts of distinct keys.
pub fn compare<A: Matchable, B: Matchable>(
    first: &[A],
    second: &[B],
    rule: MatchRule,
) -> ComparisonResult {
    let first: BTreeSet<MatchKey> = first.iter().map(|r| r.match_key(rule)).collect();
    let second: BTreeSet<MatchKey> = second.iter().map(|r| r.match_key(rule)).collect();
    let overall = OverlapMetrics::from_sets(&first, &second);

    let mut first_by_type: BTreeMap<&str, BTreeSet<MatchKey>> = BTreeMap::new();
    for k in &first {
        first_by_type
            .entry(k.interaction.as_str())
            .or_default()
            .insert(k.clone());
    }
    let mut second_by_type: BTreeMap<&str, BTreeSet<MatchKey>> = BTreeMap::new();
    for k in &second {
        second_by_type
            .entry(k.interaction.as_str())
            .or_default()
            .insert(k.clone());
    }
    let all_types: BTreeSet<&str> = first_by_type
        .keys()
        .chain(second_by_type.keys())
        .copied()
        .collect();
    let empty = BTreeSet::new();
    let mut by_type: Vec<TypeComparison> = all_types
        .into_iter()
        .map(|t| TypeComparison {
            interaction: t.to_string(),
            metrics: OverlapMetrics::from_sets(
                first_by_type.get(t).unwrap_or(&empty),
                second_by_type.get(t).unwrap_or(&empty),
            ),
        })
        .collect();
    by_type.sort_by(|a, b| b.metrics.first_total.cmp(&a.metrics.first_total));

    ComparisonResult {
        rule,
        overall,
        agreement: Agreement::from_f1(overall.f1),
        matched: first.intersection(&second).cloned().collect(),
        only_in_first: first.difference(&second).cloned().collect(),
        only_in_second: second.difference(&first).cloned().collect(),
        by_type,
    }
}

/// Scores from an external structural alignment, echoed in validation reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StructuralScores {
    /// C-alpha RMSD in Ångströms
    pub ca_rmsd: Option<f64>,
    /// All-atom RMSD in Ångströms
    pub all_atom_rmsd: Option<f64>,
    /// TM-score
    pub tm_score: Option<f64>,
}

impl StructuralScores {
    /// Whether any score was supplied.
    pub fn is_empty(&self) -> bool {
        self.ca_rmsd.is_none() && self.all_atom_rmsd.is_none() && self.tm_score.is_none()
    }

    /// Quality grade from the C-alpha RMSD.
    pub fn ca_quality(&self) -> Option<&'static str> {
        self.ca_rmsd.map(|rmsd| match rmsd {
            r if r < 1.0 => "EXCELLENT (RMSD < 1.0 Å)",
            r if r < 2.0 => "GOOD (RMSD < 2.0 Å)",
            r if r < 3.0 => "MODERATE (RMSD < 3.0 Å)",
            _ => "POOR (RMSD >= 3.0 Å)",
        })
    }

    /// Overall prediction quality from the C-alpha RMSD and the contact F1.
    ///
    /// `None` when no C-alpha RMSD was supplied.
    pub fn verdict(&self, f1: f64) -> Option<PredictionVerdict> {
        self.ca_rmsd.map(|rmsd| {
            if rmsd < 2.0 && f1 > 0.7 {
                PredictionVerdict::Excellent
            } else if rmsd < 3.0 && f1 > 0.5 {
                PredictionVerdict::Good
            } else {
                PredictionVerdict::Moderate
            }
        })
    }
}

/// Combined reading of structural and interaction agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredictionVerdict {
    /// C-alpha RMSD < 2.0 Å and F1 > 0.7
    Excellent,
    /// C-alpha RMSD < 3.0 Å and F1 > 0.5
    Good,
    /// Anything else
    Moderate,
}

impl fmt::Display for PredictionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PredictionVerdict::Excellent => "EXCELLENT prediction quality",
            PredictionVerdict::Good => "GOOD prediction quality",
            PredictionVerdict::Moderate => "MODERATE prediction quality, review details",
        };
        f.write_str(s)
    }
}

/// Everything written for one validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Label of the first (candidate) set, usually its file name
    pub first: String,
    /// Label of the second (reference) set
    pub second: String,
    /// Externally computed structural scores
    pub scores: StructuralScores,
    /// Interaction set comparison
    pub comparison: ComparisonResult,
    /// Combined verdict, present when a C-alpha RMSD was supplied
    pub verdict: Option<PredictionVerdict>,
}

impl ValidationReport {
    /// Assemble a report, deriving the verdict from `scores` and the overall F1.
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        scores: StructuralScores,
        comparison: ComparisonResult,
    ) -> Self {
        let verdict = scores.verdict(comparison.overall.f1);
        Self {
            first: first.into(),
            second: second.into(),
            scores,
            comparison,
            verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::{classify, Selection};

    fn records(raw: &[(&str, &str, &str)]) -> Vec<ContactRecord> {
        raw.iter()
            .map(|(a, b, t)| {
                ContactRecord::new(
                    a.parse().unwrap(),
                    b.parse().unwrap(),
                    InteractionType::from_label(t),
                    3.0,
                )
            })
            .collect()
    }

    fn predicted() -> Vec<ContactRecord> {
        records(&[
            ("/A/10/LEU/CA/", "/B/5/NUX/C1/", "hbond"),
            ("/A/11/SER/OG/", "/B/5/NUX/O2/", "hbond"),
            ("/A/12/GLY/N/", "/B/5/NUX/O1/", "vdw"),
        ])
    }

    fn experimental() -> Vec<ContactRecord> {
        records(&[
            // Same residues, different atoms
            ("/B/5/NUX/O1/", "/A/10/LEU/N/", "hbond"),
            ("/A/11/SER/OG/", "/B/5/NUX/O2/", "hbond"),
            ("/A/14/ILE/CD1/", "/B/5/NUX/C3/", "hydrophobic"),
            ("/A/15/PHE/CZ/", "/B/5/NUX/C4/", "aromatic"),
        ])
    }

    #[test]
    fn test_self_comparison_is_perfect() {
        let a = predicted();
        let res = compare(&a, &a, MatchRule::Atom);
        assert_eq!(res.overall.matched, a.len());
        assert_eq!(res.overall.precision, 1.0);
        assert_eq!(res.overall.recall, 1.0);
        assert_eq!(res.overall.f1, 1.0);
        assert_eq!(res.agreement, Agreement::Excellent);
    }

    #[test]
    fn test_comparison_against_empty_set() {
        let a = predicted();
        let empty: Vec<ContactRecord> = Vec::new();
        let res = compare(&a, &empty, MatchRule::Residue);
        assert_eq!(res.overall.matched, 0);
        assert_eq!(res.overall.precision, 0.0);
        assert_eq!(res.overall.recall, 0.0);
        assert_eq!(res.overall.f1, 0.0);
        assert_eq!(res.only_in_first.len(), 3);

        let res = compare(&empty, &empty, MatchRule::Residue);
        assert_eq!(res.overall.f1, 0.0);
    }

    #[test]
    fn test_structural_quality() {
        let scores = StructuralScores {
            ca_rmsd: Some(1.5),
            ..Default::default()
        };
        assert_eq!(scores.ca_quality(), Some("GOOD (RMSD < 2.0 Å)"));
        assert_eq!(StructuralScores::default().ca_quality(), None);
        assert!(StructuralScores::default().is_empty());
    }

    #[test]
    fn test_prediction_verdict_boundaries() {
        let rmsd = |r: f64| StructuralScores {
            ca_rmsd: Some(r),
            ..Default::default()
        };
        assert_eq!(rmsd(1.99).verdict(0.71), Some(PredictionVerdict::Excellent));
        assert_eq!(rmsd(2.0).verdict(0.71), Some(PredictionVerdict::Good));
        assert_eq!(rmsd(1.99).verdict(0.7), Some(PredictionVerdict::Good));
        assert_eq!(rmsd(2.99).verdict(0.51), Some(PredictionVerdict::Good));
        assert_eq!(rmsd(3.0).verdict(0.9), Some(PredictionVerdict::Moderate));
        assert_eq!(rmsd(1.0).verdict(0.5), Some(PredictionVerdict::Moderate));
        assert_eq!(StructuralScores::default().verdict(1.0), None);
    }

    #[test]
    fn test_validation_report_serializes() {
        let p = predicted();
        let scores = StructuralScores {
            ca_rmsd: Some(1.2),
            tm_score: Some(0.93),
            ..Default::default()
        };
        let report = ValidationReport::new(
            "predicted.json",
            "experimental.json",
            scores,
            compare(&p, &p, MatchRule::Residue),
        );
        assert_eq!(report.verdict, Some(PredictionVerdict::Excellent));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["first"], "predicted.json");
        assert_eq!(value["comparison"]["rule"], "residue");
        assert_eq!(value["comparison"]["overall"]["precision"], 1.0);
        assert_eq!(value["comparison"]["overall"]["matched"], 3);
        assert_eq!(value["scores"]["ca_rmsd"], 1.2);
        assert_eq!(value["scores"]["tm_score"], 0.93);
        assert!(value["scores"]["all_atom_rmsd"].is_null());
        assert_eq!(value["verdict"], "Excellent");
        assert_eq!(value["comparison"]["matched"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_residue_rule_is_looser_than_atom_rule() {
        let (p, e) = (predicted(), experimental());

        let res = compare(&p, &e, MatchRule::Residue);
        assert_eq!(res.overall.matched, 2);
        assert!((res.overall.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((res.overall.recall - 0.5).abs() < 1e-12);
        let f1 = 2.0 * (2.0 / 3.0) * 0.5 / (2.0 / 3.0 + 0.5);
        assert!((res.overall.f1 - f1).abs() < 1e-12);
        assert_eq!(res.only_in_first.len(), 1);
        assert_eq!(res.only_in_second.len(), 2);

        let res = compare(&p, &e, MatchRule::Atom);
        assert_eq!(res.overall.matched, 1);
    }

    #[test]
    fn test_order_and_direction_do_not_matter() {
        let (p, e) = (predicted(), experimental());
        let mut shuffled: Vec<ContactRecord> = p.iter().rev().map(|r| r.reversed()).collect();
        shuffled.extend(p.iter().cloned());
        assert_eq!(
            compare(&p, &e, MatchRule::Atom).overall,
            compare(&shuffled, &e, MatchRule::Atom).overall
        );
    }

    #[test]
    fn test_per_type_breakdown() {
        let res = compare(&predicted(), &experimental(), MatchRule::Residue);
        let hbond = res
            .by_type
            .iter()
            .find(|t| t.interaction == "hbond")
            .unwrap();
        assert_eq!(hbond.metrics.first_total, 2);
        assert_eq!(hbond.metrics.matched, 2);
        assert_eq!(hbond.metrics.precision, 1.0);
        assert_eq!(res.by_type[0].interaction, "hbond");

        let aromatic = res
            .by_type
            .iter()
            .find(|t| t.interaction == "aromatic")
            .unwrap();
        assert_eq!(aromatic.metrics.first_total, 0);
        assert_eq!(aromatic.metrics.recall, 0.0);
    }

    #[test]
    fn test_classified_and_raw_contacts_share_atom_keys() {
        let raw = predicted();
        let classified = classify(&raw, &Selection::ligand("NUX").unwrap());
        for rule in [MatchRule::Residue, MatchRule::Atom] {
            let res = compare(&classified, &raw, rule);
            assert_eq!(res.overall.matched, raw.len(), "Mismatch under {rule} rule");
            assert_eq!(res.overall.f1, 1.0);
        }
        assert_eq!(
            classified[0].match_key(MatchRule::Atom),
            raw[0].reversed().match_key(MatchRule::Atom)
        );
    }

    #[test]
    fn test_classified_contacts_can_be_compared() {
        let sel = Selection::ligand("NUX").unwrap();
        let p = classify(&predicted(), &sel);
        let e = classify(&experimental(), &sel);
        let raw = compare(&predicted(), &experimental(), MatchRule::Residue);
        let classified = compare(&p, &e, MatchRule::Residue);
        assert_eq!(raw.overall, classified.overall);
    }
}
