//! Process exit codes
//!
//! Values line up with `stash_core::Error::exit_code`.

/// Exit codes returned by the `stash` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    /// Bad arguments or configuration
    UsageError = 2,
    NetworkError = 3,
    AuthError = 4,
    NotFound = 5,
    Conflict = 6,
}

impl ExitCode {
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(ExitCode::Success),
            1 => Some(ExitCode::GeneralError),
            2 => Some(ExitCode::UsageError),
            3 => Some(ExitCode::NetworkError),
            4 => Some(ExitCode::AuthError),
            5 => Some(ExitCode::NotFound),
            6 => Some(ExitCode::Conflict),
            _ => None,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<&stash_core::Error> for ExitCode {
    fn from(error: &stash_core::Error) -> Self {
        ExitCode::from_i32(error.exit_code()).unwrap_or(ExitCode::GeneralError)
    }
}
