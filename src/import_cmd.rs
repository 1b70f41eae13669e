use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::ImportArgs,
    io_utils,
    pipeline::{self, ImportOutcome},
    report::ErrorRecord,
};

pub fn execute(args: &ImportArgs) -> Result<()> {
    let options = args.options();
    let encoding = io_utils::resolve_encoding(args.upload.input_encoding.as_deref())?;
    let text = io_utils::read_upload(&args.upload.input, encoding, options.max_bytes)?;
    let outcome = pipeline::import(&text, &options)
        .with_context(|| format!("Importing {:?}", args.upload.input))?;

    if let Some(path) = &args.records {
        write_records(path, &outcome)?;
    }
    if let Some(path) = &args.rejects {
        write_rejects(path, &outcome.result.error_records)?;
    }
    io_utils::write_json(args.output.as_deref(), &outcome.result)
        .with_context(|| "Writing import report".to_string())?;

    info!(
        "{:?} imported as '{}': {} accepted, {} rejected",
        args.upload.input, outcome.schema.name, outcome.result.valid_rows, outcome.result.error_rows
    );
    Ok(())
}

fn write_records(path: &Path, outcome: &ImportOutcome) -> Result<()> {
    let records = outcome.valid_records();
    io_utils::write_json(Some(path), &records)
        .with_context(|| format!("Writing accepted records to {path:?}"))?;
    info!("Wrote {} accepted record(s) to {:?}", records.len(), path);
    Ok(())
}

fn write_rejects(path: &Path, records: &[ErrorRecord]) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(path)?;
    writer.write_record(["row", "data", "errors"])?;
    for record in records {
        writer
            .write_record([
                record.row.to_string(),
                record.data.clone(),
                record.errors.join("; "),
            ])
            .with_context(|| format!("Writing rejected row {}", record.row))?;
    }
    writer.flush().context("Flushing rejected rows")?;
    info!("Wrote {} rejected row(s) to {:?}", records.len(), path);
    Ok(())
}
