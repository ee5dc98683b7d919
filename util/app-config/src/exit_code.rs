/// Exit codes of the `ckb-rosetta` process.
#[repr(i32)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ExitCode {
    /// Command line arguments error.
    Cli = 64,
    /// Config file error.
    Config = 65,
    /// IO error.
    IO = 66,
    /// General failure.
    Failure = 113,
}

impl ExitCode {
    /// Converts into the process exit status.
    pub fn into(self) -> i32 {
        self as i32
    }
}

impl From<std::io::Error> for ExitCode {
    fn from(err: std::io::Error) -> ExitCode {
        eprintln!("IO Error: {err:?}");
        ExitCode::IO
    }
}

impl From<toml::de::Error> for ExitCode {
    fn from(err: toml::de::Error) -> ExitCode {
        eprintln!("Config Error: {err:?}");
        ExitCode::Config
    }
}
