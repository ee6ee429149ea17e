//! rmb-verifier: command line front end for envelope signature verification.

pub mod cli;
pub mod config;

pub use cli::Cli;
pub use config::VerifierConfig;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    /// The envelope was rejected.
    VerificationFailed = 2,
    Timeout = 3,
    /// Bad arguments, unreadable envelope or missing configuration.
    InvalidInput = 5,
}

impl ExitCode {
    pub fn to_exit_code(self) -> std::process::ExitCode {
        std::process::ExitCode::from(self as u8)
    }
}
