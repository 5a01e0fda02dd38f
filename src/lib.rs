pub mod backends;
pub mod cli;
pub mod error;
pub mod logging;
pub mod project_identity;
pub mod ui;

use clap::Parser;
use std::process::exit;

use crate::error::QuarryError;

/// Run quarry CLI entrypoint.
pub fn run_cli() {
    // 0. Initialize color settings (must be first)
    ui::init_colors();

    // 1. Signal handling: interruption is a graceful exit, not a failure
    ctrlc::set_handler(move || {
        eprintln!();
        ui::mark_interrupted();
        ui::warning("Fetch interrupted by user. Exiting.");
        exit(0);
    })
    .expect("Error setting Ctrl-C handler");

    // 2. Parse. Help never reaches the registry; neither does --version.
    let args = cli::args::Cli::parse();

    if args.global.version {
        println!(
            "{} {}",
            project_identity::BINARY_NAME,
            env!("CARGO_PKG_VERSION")
        );
        return;
    }

    // 3. Logging profile, fixed for the rest of the run
    logging::configure(args.global.debug);

    // 4. Dispatch; the error kind decides the exit code
    if let Err(e) = cli::dispatcher::dispatch(&args) {
        // A backend that died because the user hit Ctrl-C is not a failure.
        let e = if ui::is_interrupted() {
            QuarryError::Interrupted
        } else {
            e
        };
        if e.exit_code() != 0 {
            ui::error(&format!("{}", e));
        }
        exit(e.exit_code());
    }
}
