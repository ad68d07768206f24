use chart_trendlines::core::{DataPoint, TrendDirection, Trendline, TrendlineId};
use chart_trendlines::persistence::{DEFAULT_STORAGE_KEY, FileStorage, TrendlinePersistence};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Summary,
    Migrate,
}

#[derive(Debug)]
struct CliArgs {
    command: CommandKind,
    dir: PathBuf,
    key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrendlineSummary {
    id: TrendlineId,
    start_point: DataPoint,
    end_point: DataPoint,
    price_change: f64,
    percent_change: Option<f64>,
    slope: Option<f64>,
    direction: TrendDirection,
}

impl From<&Trendline> for TrendlineSummary {
    fn from(trendline: &Trendline) -> Self {
        Self {
            id: trendline.id().clone(),
            start_point: trendline.start_point(),
            end_point: trendline.end_point(),
            price_change: trendline.price_change(),
            percent_change: trendline.percent_change(),
            slope: trendline.slope(),
            direction: trendline.direction(),
        }
    }
}

fn main() {
    let _ = chart_trendlines::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let mut persistence =
        TrendlinePersistence::new(FileStorage::new(args.dir.clone())).with_key(args.key.clone());

    match args.command {
        CommandKind::Summary => {
            let summaries: Vec<TrendlineSummary> = read_slot(&persistence)?
                .iter()
                .map(TrendlineSummary::from)
                .collect();
            let json = serde_json::to_string_pretty(&summaries)
                .map_err(|err| format!("failed to serialize summary: {err}"))?;
            println!("{json}");
            Ok(())
        }
        CommandKind::Migrate => {
            let count = migrate(&mut persistence)?;
            println!(
                "rewrote {count} trendline(s) under `{}` in {}",
                args.key,
                args.dir.display()
            );
            Ok(())
        }
    }
}

/// Strict read: a missing or malformed slot is an error, never an empty set.
fn read_slot(persistence: &TrendlinePersistence) -> Result<Vec<Trendline>, String> {
    let trendlines = persistence
        .try_load()
        .map_err(|err| format!("cannot read `{}`: {err}", persistence.key()))?
        .ok_or_else(|| format!("no persisted trendlines under `{}`", persistence.key()))?;
    Ok(trendlines.into_iter().map(Trendline::normalized).collect())
}

/// Re-saves the slot in the v1 contract. The slot is left untouched on error.
fn migrate(persistence: &mut TrendlinePersistence) -> Result<usize, String> {
    let trendlines = read_slot(persistence)?;
    persistence
        .save(&trendlines)
        .map_err(|err| format!("failed to rewrite `{}`: {err}", persistence.key()))?;
    Ok(trendlines.len())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("summary") => CommandKind::Summary,
        Some("migrate") => CommandKind::Migrate,
        _ => {
            return Err(
                "usage: trendline_store_tool <summary|migrate> --dir <path> [--key <storage-key>]"
                    .to_owned(),
            );
        }
    };

    let mut dir = None::<PathBuf>;
    let mut key = DEFAULT_STORAGE_KEY.to_owned();

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --dir".to_owned())?;
                dir = Some(PathBuf::from(value));
            }
            "--key" => {
                key = args
                    .next()
                    .ok_or_else(|| "missing value for --key".to_owned())?;
            }
            other => return Err(format!("unknown flag `{other}`")),
        }
    }

    Ok(CliArgs {
        command,
        dir: dir.ok_or_else(|| "missing --dir".to_owned())?,
        key,
    })
}
