//! Human-readable reports.
use super::compare::ValidationReport;
use super::profile::{hot_spots, render_profiles};
use super::summary::ContactSummary;
use std::fmt::{self, Write};

const RULE: &str = "======================================================================";
const THIN_RULE: &str = "----------------------------------------------------------------------";

/// Full report for a single contact file.
pub fn summary_report(summary: &ContactSummary, min_interactions: usize) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    write_summary(&mut out, summary, min_interactions).unwrap_or_default();
    out
}

fn write_summary<W: Write>(
    out: &mut W,
    summary: &ContactSummary,
    min_interactions: usize,
) -> fmt::Result {
    writeln!(out, "{RULE}\nARPEGGIO INTERACTION ANALYSIS REPORT\n{RULE}\n")?;
    writeln!(out, "Total interactions: {}", summary.total)?;
    writeln!(
        out,
        "Unique residue pairs: {}\n",
        summary.unique_residue_pairs
    )?;

    writeln!(out, "INTERACTIONS BY TYPE\n{THIN_RULE}")?;
    if summary.types.is_empty() {
        writeln!(out, "  0 interactions found")?;
    }
    for (t, n) in summary.types.sorted() {
        writeln!(out, "  {:<20} : {n:>5}", t.to_string())?;
    }

    let d = &summary.distances;
    writeln!(out, "\nDISTANCE STATISTICS\n{THIN_RULE}")?;
    writeln!(out, "  Mean:    {:.2} Å", d.mean)?;
    writeln!(out, "  Min:     {:.2} Å", d.min)?;
    writeln!(out, "  Max:     {:.2} Å", d.max)?;

    writeln!(
        out,
        "\nHOT SPOT RESIDUES (>= {min_interactions} interactions)\n{THIN_RULE}"
    )?;
    let hot = hot_spots(&summary.residues, min_interactions);
    if hot.is_empty() {
        writeln!(out, "  None")?;
    } else {
        for line in render_profiles(hot).lines() {
            writeln!(out, "  {line}")?;
        }
    }

    writeln!(out, "\n{RULE}")
}

/// Validation report comparing two interaction sets.
pub fn comparison_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    write_comparison(&mut out, report).unwrap_or_default();
    out
}

fn write_comparison<W: Write>(out: &mut W, report: &ValidationReport) -> fmt::Result {
    let res = &report.comparison;
    let scores = &report.scores;
    writeln!(out, "{RULE}\nSTRUCTURE PREDICTION VALIDATION REPORT\n{RULE}\n")?;
    writeln!(out, "First set:  {}", report.first)?;
    writeln!(out, "Second set: {}", report.second)?;
    writeln!(out, "Match rule: {}\n", res.rule)?;

    if !scores.is_empty() {
        writeln!(out, "STRUCTURAL ALIGNMENT\n{THIN_RULE}")?;
        if let Some(rmsd) = scores.ca_rmsd {
            writeln!(out, "C-alpha RMSD:  {rmsd:6.3} Å")?;
        }
        if let Some(rmsd) = scores.all_atom_rmsd {
            writeln!(out, "All-atom RMSD: {rmsd:6.3} Å")?;
        }
        if let Some(tm) = scores.tm_score {
            writeln!(out, "TM-score:      {tm:6.3}")?;
        }
        if let Some(quality) = scores.ca_quality() {
            writeln!(out, "Quality: {quality}")?;
        }
        writeln!(out)?;
    }

    let o = &res.overall;
    writeln!(out, "INTERACTION COMPARISON\n{THIN_RULE}")?;
    writeln!(out, "First set interactions:   {}", o.first_total)?;
    writeln!(out, "Second set interactions:  {}", o.second_total)?;
    writeln!(out, "Matched:                  {}", o.matched)?;
    writeln!(out, "Only in first:            {}", o.only_in_first)?;
    writeln!(out, "Only in second:           {}\n", o.only_in_second)?;
    writeln!(out, "Precision: {:6.3}", o.precision)?;
    writeln!(out, "Recall:    {:6.3}", o.recall)?;
    writeln!(out, "F1-score:  {:6.3}\n", o.f1)?;
    writeln!(out, "Quality: {}\n", res.agreement)?;

    writeln!(out, "{RULE}\nINTERACTION COMPARISON BY TYPE\n{THIN_RULE}")?;
    writeln!(
        out,
        "{:<15} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "Type", "First", "Second", "Match", "Prec", "Rec", "F1"
    )?;
    writeln!(out, "{THIN_RULE}")?;
    for t in &res.by_type {
        let m = &t.metrics;
        writeln!(
            out,
            "{:<15} {:>6} {:>6} {:>6} {:>6.3} {:>6.3} {:>6.3}",
            t.interaction, m.first_total, m.second_total, m.matched, m.precision, m.recall, m.f1
        )?;
    }

    if let Some(verdict) = report.verdict {
        writeln!(out, "\n{RULE}\nSUMMARY\n{THIN_RULE}")?;
        writeln!(out, "{verdict}")?;
    }
    writeln!(out, "\n{RULE}")
}
