//! CLI probe for the job board core.
//!
//! Opens the configured database, prints its schema version, and resolves
//! each argument as a route path for an anonymous visitor.
//!
//! ```text
//! JOBBOARD_DB_PATH=/tmp/board.sqlite3 jobboard_cli /jobs /signup
//! ```

use jobboard_core::db::migrations::latest_version;
use jobboard_core::db::open_db;
use jobboard_core::{core_version, init_from_config, resolve, BoardConfig, RouteResolution};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("jobboard_cli error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = BoardConfig::load().map_err(|err| format!("config: {err}"))?;
    init_from_config(&config)?;

    let conn = open_db(&config.db_path).map_err(|err| format!("database: {err}"))?;
    let schema_version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|err| format!("database: {err}"))?;
    info!("event=cli_start module=cli status=ok schema_version={schema_version}");

    println!("jobboard_core version={}", core_version());
    println!(
        "db={} schema_version={schema_version} latest={}",
        config.db_path.display(),
        latest_version()
    );

    for path in std::env::args().skip(1) {
        let outcome = match resolve(&path, None) {
            RouteResolution::Render(target) => format!("render {target:?}"),
            RouteResolution::RedirectToLogin => "redirect /login".to_string(),
            RouteResolution::RedirectTo(to) => format!("redirect {to}"),
        };
        println!("{path} -> {outcome}");
    }
    Ok(())
}
