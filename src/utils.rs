use crate::error::{Error, Result};
use polars::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Run `f` on a dedicated rayon pool with `num_threads` threads (0 for all cores).
///
/// Falls back to the global pool if the dedicated one cannot be built.
pub fn run_with_threads<F, R>(num_threads: usize, f: F) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    match rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
    {
        Ok(pool) => pool.install(f),
        Err(e) => {
            warn!("Failed to build a thread pool, using the global one: {e}");
            f()
        }
    }
}

/// Write a DataFrame to `file_path`, replacing its extension with the file type.
///
/// Returns the path that was written.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<PathBuf> {
    let path = file_path.with_extension(file_type.to_string());
    let mut file = std::fs::File::create(&path).map_err(|source| Error::Serialization {
        path: path.clone(),
        source,
    })?;
    let written = match file_type {
        DataFrameFileType::Csv => CsvWriter::new(&mut file).finish(df),
        DataFrameFileType::Parquet => ParquetWriter::new(&mut file).finish(df).map(|_| ()),
        DataFrameFileType::Json => JsonWriter::new(&mut file)
            .with_json_format(JsonFormat::Json)
            .finish(df),
        DataFrameFileType::NDJson => JsonWriter::new(&mut file)
            .with_json_format(JsonFormat::JsonLines)
            .finish(df),
    };
    written.map_err(|source| Error::Table {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Attribute a failure to build `df` to the table that was going to be written at `file_path`.
pub fn table_for(file_path: &Path, df: PolarsResult<DataFrame>) -> Result<DataFrame> {
    df.map_err(|source| Error::Table {
        path: file_path.to_path_buf(),
        source,
    })
}

/// Write a text report.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| Error::Serialization {
        path: path.to_path_buf(),
        source,
    })
}

/// Write any serializable value as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value).map_err(|e| Error::Serialization {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    write_text(path, &contents)
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|source| Error::Serialization {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    #[value(name = "ndjson")]
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}
