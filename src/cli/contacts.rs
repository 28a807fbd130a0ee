use super::{prepare_output_dir, resolve_input, SelectionArgs};
use arpdigest::report::{classified_to_df, hot_spots, profiles_to_df, render_profiles};
use arpdigest::{
    analyze_interface, run_with_threads, table_for, write_df_to_file, write_text, DataFrameFileType,
    DedupPolicy, Error, ExtractOptions, Result,
};
use clap::Parser;
use polars::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info, trace, warn};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Path to the Arpeggio JSON output to be analyzed
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    // Contacts crossing the subject boundary are reported
    #[command(flatten)]
    selection: SelectionArgs,

    /// Name of the output files
    #[arg(short = 'f', long = "filename", default_value_t = String::from("contacts"))]
    filename: String,

    /// Output file type of the contact table
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// How to treat contacts reported from both atoms (A->B and B->A)
    #[arg(long, default_value_t = DedupPolicy::Keep)]
    dedup: DedupPolicy,

    /// Fail on malformed atom paths or contact descriptors instead of skipping them
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Minimum number of interactions for a residue to be reported as a hot spot
    #[arg(short = 'm', long = "min-interactions", default_value_t = 3)]
    min_interactions: usize,

    /// Number of threads to use for parsing. One thread should be sufficient unless the file is very large
    #[arg(short = 'j', long = "num-threads", default_value_t = 1)]
    num_threads: usize,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");

    let selection = args
        .selection
        .selection()?
        .ok_or_else(|| Error::InvalidSelection {
            input: String::new(),
            reason: "either --ligand or --chains is required",
        })?;
    let input_path = resolve_input(&args.input)?;
    let output_path = prepare_output_dir(&args.output)?;
    debug!("Using input file {}", input_path.display());
    debug!("Results will be saved to {}", output_path.display());

    let options = ExtractOptions {
        strict: args.strict,
    };
    let analysis = run_with_threads(args.num_threads, || {
        debug!("Using {} thread(s)", rayon::current_num_threads());
        analyze_interface(&input_path, &selection, &options, args.dedup)
    })?;
    if analysis.skipped > 0 {
        warn!(
            "Skipped {} malformed contact {}",
            analysis.skipped,
            match analysis.skipped {
                1 => "record",
                _ => "records",
            }
        );
    }

    let output_file = output_path.join(&args.filename);
    let mut df_contacts = table_for(
        &output_file,
        classified_to_df(&analysis.contacts, selection.subject_column()),
    )?;

    // Log the identified interactions
    let df_clash = table_for(
        &output_file,
        df_contacts
            .clone()
            .lazy()
            .filter(
                col("type")
                    .eq(lit("clash"))
                    .or(col("type").eq(lit("vdw_clash"))),
            )
            .collect(),
    )?;
    if df_clash.height() > 0 {
        warn!(
            "Found {} steric {}\n{}",
            df_clash.height(),
            match df_clash.height() {
                1 => "clash",
                _ => "clashes",
            },
            df_clash
        );
    }
    info!("Interactions by type\n{}", analysis.tally.render());
    let hot = hot_spots(&analysis.residues, args.min_interactions);
    info!(
        "Residues with >= {} interactions\n{}",
        args.min_interactions,
        render_profiles(hot)
    );

    // Save results
    let written = write_df_to_file(&mut df_contacts, &output_file, args.output_format)?;
    info!("Contacts saved to {}", written.display());

    let types_file = output_path.join(format!("{}_types.txt", args.filename));
    write_text(&types_file, &analysis.tally.render())?;
    let residues_file = output_path.join(format!("{}_residues.txt", args.filename));
    write_text(&residues_file, &render_profiles(&analysis.residues))?;
    let residues_table = output_path.join(format!("{}_residues", args.filename));
    let mut df_residues = table_for(&residues_table, profiles_to_df(&analysis.residues))?;
    write_df_to_file(&mut df_residues, &residues_table, args.output_format)?;
    info!("Summaries saved to {}", output_path.display());

    Ok(())
}
