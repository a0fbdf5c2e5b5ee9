//! Entry point for the pulsedeck TUI. Parses args and runs the App.

use std::env;
use std::time::Duration;

use pulsedeck::app::App;
use pulsedeck::config::{stream_url, StreamConfig};

const DEFAULT_BASE: &str = "ws://127.0.0.1:8080";

struct ParsedArgs {
    base: String,
    cfg: StreamConfig,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--endpoint|-e PATH] [--min-retry-ms N] [--max-retry-ms N] \
         [--throttle-ms N] [--window N] [ws://HOST:PORT]"
    )
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "pulsedeck".into());
    let mut base: Option<String> = None;
    let mut cfg = StreamConfig::default();

    fn ms_value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<Duration, String> {
        it.next()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .ok_or_else(|| format!("{flag} expects a millisecond count"))
    }

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage(&prog)),
            "--endpoint" | "-e" => {
                cfg.endpoint_path = it
                    .next()
                    .ok_or_else(|| "--endpoint expects a path".to_string())?;
            }
            "--min-retry-ms" => cfg.min_retry_delay = ms_value(&mut it, "--min-retry-ms")?,
            "--max-retry-ms" => cfg.max_retry_delay = ms_value(&mut it, "--max-retry-ms")?,
            "--throttle-ms" => cfg.throttle = ms_value(&mut it, "--throttle-ms")?,
            "--window" => {
                cfg.window_capacity = it
                    .next()
                    .and_then(|v| v.parse::<usize>().ok())
                    .ok_or_else(|| "--window expects a sample count".to_string())?;
            }
            _ if arg.starts_with("--endpoint=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        cfg.endpoint_path = v.to_string();
                    }
                }
            }
            _ => {
                if base.is_none() {
                    base = Some(arg);
                } else {
                    return Err(format!("Unexpected argument '{arg}'. {}", usage(&prog)));
                }
            }
        }
    }

    Ok(ParsedArgs {
        base: base.unwrap_or_else(|| DEFAULT_BASE.into()),
        cfg,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    let url = stream_url(&parsed.base, &parsed.cfg.endpoint_path)
        .map_err(|e| anyhow::anyhow!("invalid URL '{}': {e}", parsed.base))?;

    let mut app = App::new(&parsed.cfg);
    app.run(&url, parsed.cfg).await
}
