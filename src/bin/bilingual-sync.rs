use bilingual_sync::{
    BilingualSynchronizer, ChangeSet, Entity, FieldPair, MockMode, MockProvider, ProviderKind,
    SyncConfig, SyncError, SyncRequest, SyncResult, pairs_from_bases,
};
use clap::{Arg, ArgAction, Command};
use serde_json::{Map, Value};
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("bilingual-sync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Synchronise the French/Arabic field pairs of a JSON record")
        .arg(
            Arg::new("record")
                .help("JSON record to synchronise, or '-' for stdin")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("entity")
                .long("entity")
                .short('e')
                .help("Use the field pairs of an entity (category, domain, item, goal, note, strategy)")
                .conflicts_with("field"),
        )
        .arg(
            Arg::new("field")
                .long("field")
                .short('f')
                .help("Base name of a field pair (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("changed")
                .long("changed")
                .short('c')
                .help("Physical field edited by the user (repeatable); enables smart mode")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("stored")
                .long("stored")
                .help("Previously stored record; the input is treated as an update of it"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON configuration file (default: environment variables)"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .short('r')
                .help("Print the per-pair report to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the mock provider instead of Google Translate")
                .action(ArgAction::SetTrue)
                .conflicts_with("offline"),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .help("Use only the script heuristic and the fallback dictionary")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every pair decision")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(format!("Failed to load .env: {}", e).into());
        }
    }

    let default_level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => {
            let mut config = SyncConfig::from_json_file(path)?;
            if config.google_api_key.is_none() {
                config.google_api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY").ok();
            }
            config
        }
        None => SyncConfig::from_env()?,
    };
    if matches.get_flag("offline") {
        config.provider = ProviderKind::Offline;
    }

    let pairs = select_pairs(
        matches.get_one::<String>("entity"),
        matches.get_many::<String>("field"),
        &config.localized_suffix,
    )?;

    let record_path = matches
        .get_one::<String>("record")
        .ok_or("record argument is required")?;
    let submitted = read_record(record_path)?;

    let sync = if matches.get_flag("mock") {
        BilingualSynchronizer::new(Some(Arc::new(MockProvider::new(MockMode::Suffix))))
            .with_primary_language(&config.primary_language())
    } else {
        BilingualSynchronizer::from_config(&config)
    };
    info!(
        provider = ?config.provider,
        mock = matches.get_flag("mock"),
        pairs = pairs.len(),
        "synchronising record"
    );

    let mut changes: Option<ChangeSet> = matches
        .get_many::<String>("changed")
        .map(|names| names.cloned().collect());

    let (mut record, request) = match matches.get_one::<String>("stored") {
        Some(stored_path) => {
            let stored = read_record(stored_path)?;
            let stored_request = SyncRequest::from_json_record(&stored, &pairs)?;
            let submitted_request = SyncRequest::from_json_record(&submitted, &pairs)?;

            let detected = ChangeSet::between(&stored_request, &submitted_request);
            debug!(changed = ?detected, "fields edited since stored record");
            let mut edited = changes.take().unwrap_or_default();
            for name in detected.iter() {
                edited.insert(name);
            }
            changes = Some(edited);

            let mut record = stored;
            for (key, value) in submitted {
                record.insert(key, value);
            }
            (record, stored_request.merge(&submitted_request))
        }
        None => {
            let request = SyncRequest::from_json_record(&submitted, &pairs)?;
            (submitted, request)
        }
    };

    let (synced, report) = match &changes {
        Some(changes) => {
            sync.smart_translate_with_report(request, &pairs, changes)
                .await
        }
        None => sync.auto_translate_with_report(request, &pairs).await,
    };

    synced.apply_to_json_record(&mut record);

    if matches.get_flag("report") {
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }
    println!("{}", serde_json::to_string_pretty(&Value::Object(record))?);

    Ok(())
}

fn select_pairs<'a>(
    entity: Option<&String>,
    fields: Option<impl Iterator<Item = &'a String>>,
    suffix: &str,
) -> SyncResult<Vec<FieldPair>> {
    if let Some(entity) = entity {
        return Ok(entity.parse::<Entity>()?.field_pairs_with_suffix(suffix));
    }
    match fields {
        Some(fields) => Ok(pairs_from_bases(fields, suffix)),
        None => Err(SyncError::ConfigError(
            "no field pairs given: use --entity or --field".to_string(),
        )),
    }
}

fn read_record(path: &str) -> SyncResult<Map<String, Value>> {
    let content = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };

    let value: Value = serde_json::from_str(&content)?;
    match value {
        Value::Object(record) => Ok(record),
        other => Err(SyncError::InvalidRecord(format!(
            "expected a JSON object, found {}",
            other
        ))),
    }
}
