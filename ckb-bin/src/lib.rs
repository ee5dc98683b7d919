//! CKB Rosetta executable.
//!
//! This crate is created to reduce the link time to build CKB Rosetta.
mod setup_guard;
mod subcommand;

use ckb_rosetta_app_config::{cli, ExitCode, Setup};
use setup_guard::SetupGuard;

/// The executable main entry.
///
/// It returns `Ok` when the process exist normally, otherwise the `ExitCode` is converted to the
/// process exit status code.
///
/// ## Parameters
///
/// * `version` - The version is passed in so the bin crate can collect the version without trigger
///   re-linking.
pub fn run_app(version: &str) -> Result<(), ExitCode> {
    // Always print backtrace on panic.
    ::std::env::set_var("RUST_BACKTRACE", "full");

    let app_matches = cli::get_matches(version);
    let (cmd, matches) = app_matches.subcommand().ok_or_else(|| {
        eprintln!("missing subcommand, see `{} --help`", cli::BIN_NAME);
        ExitCode::Cli
    })?;
    let setup = Setup::from_matches(matches)?;

    match cmd {
        cli::CMD_INIT => subcommand::init(setup.init(matches)?),
        cli::CMD_RUN => {
            let args = setup.run(matches)?;
            let _guard = SetupGuard::from_config(&args.config)?;
            subcommand::run(args, version)
        }
        _ => {
            eprintln!("unknown subcommand {cmd}");
            Err(ExitCode::Cli)
        }
    }
}
