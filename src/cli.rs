use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{pipeline::ImportOptions, profile::DEFAULT_SAMPLE_ROWS};

#[derive(Debug, Parser)]
#[command(author, version, about = "Analyze and validate CSV uploads against known import schemas", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Profile an upload and suggest a target schema and column mapping
    Analyze(AnalyzeArgs),
    /// Validate every row of an upload and report accepted and rejected rows
    Import(ImportArgs),
    /// List the target schemas, their fields, and header keywords
    Schemas,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Input CSV file (`-` reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Reject uploads larger than this many bytes
    #[arg(long = "max-bytes", default_value_t = crate::pipeline::DEFAULT_MAX_BYTES)]
    pub max_bytes: usize,
    /// Number of data rows sampled for type inference
    #[arg(long = "sample-rows", default_value_t = DEFAULT_SAMPLE_ROWS)]
    pub sample_rows: usize,
    /// Use this target schema instead of matching on headers
    #[arg(short = 's', long = "schema")]
    pub schema: Option<String>,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub upload: UploadArgs,
    /// Render the column profile as a table instead of JSON
    #[arg(long = "table")]
    pub table: bool,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub upload: UploadArgs,
    /// Maximum number of rejected rows listed in the report
    #[arg(long = "error-limit", default_value_t = crate::report::DEFAULT_ERROR_RECORD_LIMIT)]
    pub error_limit: usize,
    /// Write the report here instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Write accepted records as a JSON array to this file
    #[arg(long = "records")]
    pub records: Option<PathBuf>,
    /// Write rejected rows with their errors to this CSV file
    #[arg(long = "rejects")]
    pub rejects: Option<PathBuf>,
}

impl UploadArgs {
    pub fn options(&self) -> ImportOptions {
        ImportOptions {
            sample_rows: self.sample_rows,
            max_bytes: self.max_bytes,
            schema: self.schema.clone(),
            ..ImportOptions::default()
        }
    }

    pub fn display_name(&self) -> String {
        if crate::io_utils::is_dash(&self.input) {
            return "stdin".to_string();
        }
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}

impl ImportArgs {
    pub fn options(&self) -> ImportOptions {
        ImportOptions {
            error_record_limit: self.error_limit,
            ..self.upload.options()
        }
    }
}
