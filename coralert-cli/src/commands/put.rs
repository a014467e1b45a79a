//! Put command - store a payload file as the current snapshot of a dataset.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use coralert::cache::{DataSource, EntryMeta, PutOutcome};
use coralert::geo::BoundingBox;
use coralert::Dataset;
use tracing::info;

use super::common::Context;
use crate::error::CliError;

/// Where a stored payload came from.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SourceArg {
    /// Live API response
    Api,
    /// Last-known-good fallback
    Fallback,
}

impl From<SourceArg> for DataSource {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Api => DataSource::Api,
            SourceArg::Fallback => DataSource::Fallback,
        }
    }
}

#[derive(Debug, Args)]
pub struct PutArgs {
    /// Dataset to write (weather, forecast, radar, incidents, rain_gauges, alerts_inbox)
    pub dataset: Dataset,

    /// File containing the payload (usually the JSON response body)
    #[arg(long, short)]
    pub file: PathBuf,

    /// Payload origin
    #[arg(long, value_enum, default_value = "api")]
    pub source: SourceArg,

    /// ETag returned with the payload
    #[arg(long)]
    pub etag: Option<String>,

    /// Area the payload covers, as north,south,east,west
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<String>,
}

/// Run the put command.
pub fn run(ctx: &Context, args: PutArgs) -> Result<(), CliError> {
    let bytes = store_payload(ctx, &args)?;
    println!("Cached {} ({} bytes)", args.dataset, bytes);
    Ok(())
}

/// Read the payload file and store it. Returns the payload size.
pub fn store_payload(ctx: &Context, args: &PutArgs) -> Result<usize, CliError> {
    let payload = read_payload(&args.file)?;
    let meta = build_meta(args)?;
    let bytes = payload.len();

    let store = ctx.open_store()?;
    let outcome = store.put(args.dataset.key(), payload, meta)?;
    check_outcome(args.dataset, outcome)?;
    info!(dataset = %args.dataset, bytes, file = %args.file.display(), "Stored payload");
    Ok(bytes)
}

fn check_outcome(dataset: Dataset, outcome: PutOutcome) -> Result<(), CliError> {
    match outcome {
        PutOutcome::Applied => Ok(()),
        PutOutcome::Superseded { current } => Err(CliError::Superseded {
            dataset: dataset.to_string(),
            current,
        }),
    }
}

fn read_payload(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

fn build_meta(args: &PutArgs) -> Result<EntryMeta, CliError> {
    let mut meta = EntryMeta::default().with_source(args.source.into());
    if let Some(etag) = &args.etag {
        meta = meta.with_etag(etag.clone());
    }
    if let Some(raw) = &args.bbox {
        let bbox = BoundingBox::parse_csv(raw).ok_or_else(|| {
            CliError::InvalidArgument(format!(
                "bbox '{}' must be north,south,east,west in degrees",
                raw
            ))
        })?;
        meta = meta.with_bbox(bbox);
    }
    Ok(meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coralert::staleness::Staleness;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Context) {
        let temp = TempDir::new().unwrap();
        let ctx = Context::load(
            Some(temp.path().join("config.ini")),
            Some(temp.path().join("store")),
        )
        .unwrap();
        (temp, ctx)
    }

    fn args(file: PathBuf) -> PutArgs {
        PutArgs {
            dataset: Dataset::Incidents,
            file,
            source: SourceArg::Api,
            etag: None,
            bbox: None,
        }
    }

    #[test]
    fn test_put_stores_payload_with_meta() {
        let (temp, ctx) = setup();
        let file = temp.path().join("incidents.json");
        fs::write(&file, r#"{"data": []}"#).unwrap();

        let mut put = args(file);
        put.source = SourceArg::Fallback;
        put.etag = Some("abc".to_string());
        put.bbox = Some("-22.7,-23.1,-43.1,-43.8".to_string());

        assert_eq!(store_payload(&ctx, &put).unwrap(), 12);

        let store = ctx.open_store().unwrap();
        let entry = store.get("incidents").unwrap();
        assert_eq!(entry.payload, r#"{"data": []}"#);
        assert_eq!(entry.source, Some(DataSource::Fallback));
        assert_eq!(entry.etag.as_deref(), Some("abc"));
        assert!(entry.bbox.is_some());
        assert_eq!(store.classify("incidents"), Staleness::Fresh);
    }

    #[test]
    fn test_put_missing_file() {
        let (temp, ctx) = setup();
        let err = store_payload(&ctx, &args(temp.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, CliError::ReadInput { .. }));
    }

    #[test]
    fn test_put_bad_bbox() {
        let (temp, ctx) = setup();
        let file = temp.path().join("payload.json");
        fs::write(&file, "[]").unwrap();
        let mut put = args(file);
        put.bbox = Some("north".to_string());

        let err = store_payload(&ctx, &put).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_superseded_write_is_reported_as_such() {
        let err = check_outcome(Dataset::Radar, PutOutcome::Superseded { current: 4 }).unwrap_err();
        assert!(matches!(err, CliError::Superseded { current: 4, .. }));
        assert_eq!(err.to_string(), "Write to radar was superseded by version 4");

        assert!(check_outcome(Dataset::Radar, PutOutcome::Applied).is_ok());
    }
}
