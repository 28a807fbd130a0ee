pub(crate) mod compare;
pub(crate) mod contacts;
pub(crate) mod summary;

use arpdigest::{Error, Result, Selection};
use std::path::{Path, PathBuf};

/// Subject selection flags shared by subcommands.
#[derive(clap::Args, Debug, Clone)]
#[group(multiple = false)]
pub(crate) struct SelectionArgs {
    /// Ligand residue code(s) defining the subject, e.g. NUX or NUX,ATP
    #[arg(short, long)]
    ligand: Option<String>,

    /// Chain(s) defining the subject, e.g. A or A,B
    #[arg(short = 'c', long)]
    chains: Option<String>,
}

impl SelectionArgs {
    /// `None` when neither flag was given.
    pub(crate) fn selection(&self) -> Result<Option<Selection>> {
        match (&self.ligand, &self.chains) {
            (Some(codes), _) => Selection::ligand(codes).map(Some),
            (None, Some(ids)) => Selection::chains(ids).map(Some),
            (None, None) => Ok(None),
        }
    }
}

/// Resolve an input file, reporting a missing file as [`Error::InputNotFound`].
pub(crate) fn resolve_input(input: &Path) -> Result<PathBuf> {
    input.canonicalize().map_err(|source| Error::InputNotFound {
        path: input.to_path_buf(),
        source,
    })
}

/// Resolve and create the output directory.
pub(crate) fn prepare_output_dir(output: &Path) -> Result<PathBuf> {
    let output_path = std::path::absolute(output).map_err(|source| Error::Serialization {
        path: output.to_path_buf(),
        source,
    })?;
    std::fs::create_dir_all(&output_path).map_err(|source| Error::Serialization {
        path: output_path.clone(),
        source,
    })?;
    Ok(output_path)
}
