//! CLI entry point.
//!
//! # Responsibility
//! - Print the core version as a linkage probe.
//! - `studydesk report` prints the academic report from the local database.

use std::process::ExitCode;
use studydesk_core::db::{open_db, resolve_db_path};
use studydesk_core::{ensure_seeded, DomainStore, GradeService, SqliteMedium};

fn main() -> ExitCode {
    println!("studydesk_core version={}", studydesk_core::core_version());

    match std::env::args().nth(1).as_deref() {
        None => ExitCode::SUCCESS,
        Some("report") => match print_report() {
            Ok(()) => ExitCode::SUCCESS,
            Err(message) => {
                eprintln!("{message}");
                ExitCode::FAILURE
            }
        },
        Some(other) => {
            eprintln!("unknown command `{other}`; expected `report`");
            ExitCode::from(2)
        }
    }
}

fn print_report() -> Result<(), String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path)
        .map_err(|err| format!("failed to open `{}`: {err}", db_path.display()))?;
    let medium = SqliteMedium::try_new(&conn).map_err(|err| err.to_string())?;
    let store = DomainStore::new(medium);
    ensure_seeded(&store).map_err(|err| err.to_string())?;

    print!("{}", GradeService::new(&store).report());
    Ok(())
}
