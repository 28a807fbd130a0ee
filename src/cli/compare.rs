use super::{resolve_input, SelectionArgs};
use arpdigest::report::{comparison_report, StructuralScores, ValidationReport};
use arpdigest::{
    classify, compare, ensure_parent_dir, load_contacts, write_json, write_text, DedupPolicy,
    ExtractOptions, MatchRule, Result,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Arpeggio JSON output of the candidate structure (e.g. the prediction)
    #[arg(long)]
    first: PathBuf,

    /// Arpeggio JSON output of the reference structure (e.g. the experimental model)
    #[arg(long)]
    second: PathBuf,

    /// Output file prefix; `<prefix>_report.txt` and `<prefix>_report.json` are written
    #[arg(short, long, default_value = "comparison/validation")]
    output: PathBuf,

    /// How contacts are matched across the two sets
    #[arg(long = "match-rule", default_value_t = MatchRule::Residue)]
    match_rule: MatchRule,

    // Restricts the comparison to contacts crossing this subject's boundary
    #[command(flatten)]
    selection: SelectionArgs,

    /// How to treat contacts reported from both atoms (A->B and B->A)
    #[arg(long, default_value_t = DedupPolicy::Keep)]
    dedup: DedupPolicy,

    /// Fail on malformed atom paths or contact descriptors instead of skipping them
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// C-alpha RMSD from an external structural alignment, echoed in the report
    #[arg(long = "ca-rmsd")]
    ca_rmsd: Option<f64>,

    /// All-atom RMSD from an external structural alignment, echoed in the report
    #[arg(long = "all-atom-rmsd")]
    all_atom_rmsd: Option<f64>,

    /// TM-score from an external structural alignment, echoed in the report
    #[arg(long = "tm-score")]
    tm_score: Option<f64>,
}

fn label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");

    let first_path = resolve_input(&args.first)?;
    let second_path = resolve_input(&args.second)?;
    let selection = args.selection.selection()?;
    let options = ExtractOptions {
        strict: args.strict,
    };

    let first = load_contacts(&first_path, &options, args.dedup)?;
    let second = load_contacts(&second_path, &options, args.dedup)?;
    info!(
        "Found {} interactions in {} and {} in {}",
        first.records.len(),
        label(&first_path),
        second.records.len(),
        label(&second_path)
    );

    let comparison = match &selection {
        Some(sel) => {
            let first = classify(&first.records, sel);
            let second = classify(&second.records, sel);
            debug!(
                "Comparing {} and {} contacts crossing {sel}",
                first.len(),
                second.len()
            );
            compare(&first, &second, args.match_rule)
        }
        None => compare(&first.records, &second.records, args.match_rule),
    };
    info!(
        "Precision: {:.3}, Recall: {:.3}, F1-score: {:.3}",
        comparison.overall.precision, comparison.overall.recall, comparison.overall.f1
    );

    let report = ValidationReport::new(
        label(&first_path),
        label(&second_path),
        StructuralScores {
            ca_rmsd: args.ca_rmsd,
            all_atom_rmsd: args.all_atom_rmsd,
            tm_score: args.tm_score,
        },
        comparison,
    );
    if let Some(verdict) = report.verdict {
        info!("{verdict}");
    }

    let prefix = std::path::absolute(&args.output).unwrap_or_else(|_| args.output.clone());
    ensure_parent_dir(&prefix)?;
    let text_file = PathBuf::from(format!("{}_report.txt", prefix.display()));
    write_text(
        &text_file,
        &comparison_report(&report),
    )?;
    let json_file = PathBuf::from(format!("{}_report.json", prefix.display()));
    write_json(&json_file, &report)?;
    info!(
        "Reports saved to {} and {}",
        text_file.display(),
        json_file.display()
    );

    Ok(())
}
