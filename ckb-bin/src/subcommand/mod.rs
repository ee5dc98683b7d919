mod init;
mod run;

pub use self::init::init;
pub use self::run::run;
