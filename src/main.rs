//! dbgen
//!
//! Reverse-engineers a live MySQL database into Laravel migrations, seeders
//! and a seeder registry.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match dbgen_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            for (depth, cause) in e.chain().skip(1).enumerate() {
                eprintln!("\nCaused by:\n  {}: {}", depth + 1, cause);
            }
            ExitCode::FAILURE
        }
    }
}
