use ckb_rosetta_app_config::{ExitCode, RosettaAppConfig};
use ckb_rosetta_logger::LoggerInitGuard;

/// Keeps the process wide services alive until `run` returns.
pub struct SetupGuard {
    _logger_guard: LoggerInitGuard,
}

impl SetupGuard {
    pub(crate) fn from_config(config: &RosettaAppConfig) -> Result<Self, ExitCode> {
        let logger_guard = ckb_rosetta_logger::init(config.logger.clone()).map_err(|err| {
            eprintln!("Config Error: {err:?}");
            ExitCode::Failure
        })?;
        Ok(SetupGuard {
            _logger_guard: logger_guard,
        })
    }
}
