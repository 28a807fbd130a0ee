use super::{prepare_output_dir, resolve_input};
use arpdigest::report::{contacts_to_df, summary_report, tally_to_df};
use arpdigest::{
    load_contacts, run_with_threads, summarize, table_for, write_df_to_file, write_text,
    DataFrameFileType, DedupPolicy, ExtractOptions, Result,
};
use clap::Parser;
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

    /// Prefix of the output files
    #[arg(short = 'f', long = "filename", default_value_t = String::from("analysis"))]
    filename: String,

    /// Output file type of the contact tables
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

    /// Number of threads to use for parsing
    #[arg(short = 'j', long = "num-threads", default_value_t = 1)]
    num_threads: usize,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");

    let input_path = resolve_input(&args.input)?;
    let output_path = prepare_output_dir(&args.output)?;

    let options = ExtractOptions {
        strict: args.strict,
    };
    let extraction = run_with_threads(args.num_threads, || {
        debug!("Using {} thread(s)", rayon::current_num_threads());
        load_contacts(&input_path, &options, args.dedup)
    })?;
    if extraction.skipped > 0 {
        warn!("Skipped {} malformed contact record(s)", extraction.skipped);
    }

    let summary = summarize(&extraction.records);
    let report = summary_report(&summary, args.min_interactions);
    info!("\n{report}");

    // Save tables and the text report
    let contacts_table = output_path.join(format!("{}_interactions", args.filename));
    let mut df_contacts = table_for(&contacts_table, contacts_to_df(&extraction.records))?;
    let contacts_file = write_df_to_file(&mut df_contacts, &contacts_table, args.output_format)?;
    info!(
        "Exported {} interactions to {}",
        df_contacts.height(),
        contacts_file.display()
    );

    let types_table = output_path.join(format!("{}_types", args.filename));
    let mut df_types = table_for(&types_table, tally_to_df(&summary.types))?;
    write_df_to_file(&mut df_types, &types_table, args.output_format)?;

    let report_file = output_path.join(format!("{}_report.txt", args.filename));
    write_text(&report_file, &report)?;
    info!("Report saved to {}", report_file.display());

    Ok(())
}
