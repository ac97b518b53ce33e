//! Czytelnia RPC Server: JSON-RPC over stdin/stdout for the reading UI shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"stories.get", "params":{"id":"01-kot"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use tracing::{debug, info};

use czytelnia::app::App;
use czytelnia::config::{AppConfig, ConfigOverrides};
use czytelnia::logging;
use czytelnia::rpc_handler::handle_method;

#[derive(Parser, Debug)]
#[command(author, version, about = "Czytelnia JSON-RPC backend over stdin/stdout", long_about = None)]
struct Args {
    #[command(flatten)]
    config: ConfigOverrides,
}

fn respond(out: &mut impl Write, response: &Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let config = AppConfig::from_env()?.with_overrides(args.config);
    let mut app = App::new(config).context("Failed to initialize Czytelnia")?;
    app.startup();
    let app = Mutex::new(app);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Signal ready
    respond(
        &mut out,
        &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}),
    )?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                respond(&mut out, &json!({"id": null, "error": format!("parse error: {}", e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));
        debug!(method, "RPC request");

        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        respond(&mut out, &response)?;
    }

    info!("Input closed, shutting down");
    Ok(())
}
