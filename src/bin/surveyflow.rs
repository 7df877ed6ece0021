//! Surveyflow CLI - submit survey responses and report pairwise correlations
//!
//! ## Usage
//!
//! ```bash
//! surveyflow [--backend sqlite|jsonl] questions
//! surveyflow [--backend sqlite|jsonl] submit [--fingerprint HASH] [JSON]
//! surveyflow [--backend sqlite|jsonl] report [--json] [--top N]
//! surveyflow [--backend sqlite|jsonl] count
//! ```
//!
//! `submit` reads the payload from the argument or, when absent, from stdin. The payload
//! is either bare answers (`{"sleepHours":5,"moodRating":null,...}`) or
//! `{"answers":{...},"device":{...}}`.
//!
//! ## Environment Variables
//!
//! - SURVEYFLOW_DB_PATH - SQLite database path (default: data/surveyflow.db)
//! - SURVEYFLOW_JSONL_PATH - JSONL response file (default: data/responses.jsonl)
//! - TOP_K - number of correlations reported (default: 5)
//! - DEDUPE_SUBMISSIONS - ignore repeat submissions per fingerprint (default: false)
//! - STRONG_THRESHOLD / MODERATE_THRESHOLD / WEAK_THRESHOLD - strength bands
//!   (default: 0.7 / 0.4 / 0.2)
//! - RUST_LOG - Logging level (optional, default: info)

use std::env;
use std::io::Read;
use surveyflow::correlation_core::report;
use surveyflow::survey::{self, SubmissionPayload};
use surveyflow::{BackendType, Config, CorrelationEngine, SurveyService, SurveyStore};

const USAGE: &str =
    "usage: surveyflow [--backend sqlite|jsonl] <questions|submit|report|count> [options]";

#[derive(Debug)]
enum Command {
    Questions,
    Submit {
        fingerprint: Option<String>,
        payload: Option<String>,
    },
    Report {
        json: bool,
        top: Option<usize>,
    },
    Count,
}

#[derive(Debug)]
struct CliArgs {
    backend: BackendType,
    command: Command,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut backend = BackendType::Sqlite;
    let mut command_name: Option<&str> = None;
    let mut fingerprint = None;
    let mut payload = None;
    let mut json = false;
    let mut top = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--backend" => {
                let value = iter.next().ok_or("--backend needs a value")?;
                backend = BackendType::parse(value)
                    .ok_or_else(|| format!("unknown backend '{}'", value))?;
            }
            "--fingerprint" => {
                fingerprint = Some(iter.next().ok_or("--fingerprint needs a value")?.clone());
            }
            "--json" => json = true,
            "--top" => {
                let value = iter.next().ok_or("--top needs a value")?;
                let n: usize = value
                    .parse()
                    .map_err(|_| format!("--top expects a positive integer, got '{}'", value))?;
                if n == 0 {
                    return Err("--top must be at least 1".to_string());
                }
                top = Some(n);
            }
            other if command_name.is_none() => command_name = Some(other),
            other if payload.is_none() => payload = Some(other.to_string()),
            other => return Err(format!("unexpected argument '{}'", other)),
        }
    }

    let command = match command_name {
        Some("questions") => Command::Questions,
        Some("submit") => Command::Submit {
            fingerprint,
            payload,
        },
        Some("report") => Command::Report { json, top },
        Some("count") => Command::Count,
        Some(other) => return Err(format!("unknown command '{}'", other)),
        None => return Err("missing command".to_string()),
    };

    Ok(CliArgs { backend, command })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let config = Config::from_env()?;

    if let Command::Questions = cli.command {
        for (i, question) in survey::catalog().iter().enumerate() {
            println!(
                "{:>2}. {:<18} {} (1 = {}, 7 = {})",
                i + 1,
                question.key.as_str(),
                question.description,
                question.low_label,
                question.high_label
            );
        }
        return Ok(());
    }

    let store_path = config.store_path(cli.backend);
    let store = SurveyStore::open(cli.backend, store_path)?;
    let engine = CorrelationEngine::new(config.classifier());

    let top_k = match &cli.command {
        Command::Report { top: Some(n), .. } => *n,
        _ => config.top_k,
    };

    let mut service =
        SurveyService::new(store, engine, top_k).with_dedupe(config.dedupe_submissions);

    log::info!("🚀 Surveyflow");
    log::info!("   Backend: {} ({})", service.backend_type(), store_path.display());
    log::info!("   Top correlations: {}", top_k);

    match cli.command {
        Command::Questions => {}
        Command::Submit {
            fingerprint,
            payload,
        } => {
            let raw = match payload {
                Some(raw) => raw,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };

            let (answers, device_fingerprint) = SubmissionPayload::from_json(&raw)?.into_parts();
            let fingerprint = fingerprint.unwrap_or(device_fingerprint);

            let result = service.submit(answers, &fingerprint).await;
            println!("{}", serde_json::to_string_pretty(&result)?);

            if !result.success {
                std::process::exit(1);
            }
        }
        Command::Report { json, .. } => {
            let correlations = service.correlations().await?;
            let total = service.total_responses().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&correlations)?);
            } else if correlations.is_empty() {
                println!("No overlapping answers yet ({} responses).", total);
            } else {
                println!("Top {} correlations from {} responses\n", correlations.len(), total);
                for (i, result) in correlations.iter().enumerate() {
                    println!("{}\n", report::render(i + 1, result));
                }
            }
        }
        Command::Count => {
            println!("{}", service.total_responses().await?);
        }
    }

    Ok(())
}
