pub mod cli;
pub mod data;
pub mod error;
pub mod import_cmd;
pub mod io_utils;
pub mod mapper;
pub mod matcher;
pub mod pipeline;
pub mod profile;
pub mod registry;
pub mod report;
pub mod table;
pub mod tokenizer;
pub mod validator;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands};

pub use crate::error::IntakeError;
pub use crate::pipeline::{FileAnalysis, ImportOptions, ImportOutcome, analyze, import};
pub use crate::report::ImportResult;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_intake", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => handle_analyze(&args),
        Commands::Import(args) => import_cmd::execute(&args),
        Commands::Schemas => {
            print!("{}", table::render_schemas());
            Ok(())
        }
    }
}

fn handle_analyze(args: &cli::AnalyzeArgs) -> Result<()> {
    let upload = &args.upload;
    let options = upload.options();
    let encoding = io_utils::resolve_encoding(upload.input_encoding.as_deref())?;
    info!("Analyzing {:?} as {}", upload.input, encoding.name());
    let text = io_utils::read_upload(&upload.input, encoding, options.max_bytes)?;
    let analysis = pipeline::analyze(&upload.display_name(), &text, &options)
        .with_context(|| format!("Analyzing {:?}", upload.input))?;
    if args.table {
        print!("{}", table::render_analysis(&analysis));
        Ok(())
    } else {
        io_utils::write_json(None, &analysis)
    }
}
