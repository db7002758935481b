use std::io;
use std::path::PathBuf;

use thiserror::Error;

use vip8_core::{ExecError, LoadError};

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("unable to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("unable to load {}: {source}", .path.display())]
    Load { path: PathBuf, source: LoadError },

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("halted at {pc:#06X}: {source}")]
    Exec { pc: u16, source: ExecError },
}

impl FrontendError {
    /// Process exit code for this failure.
    /// A program that crashes the machine exits with 1; anything that kept it from starting with 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            FrontendError::Exec { .. } => 1,
            _ => 2,
        }
    }
}

impl From<String> for FrontendError {
    fn from(message: String) -> Self {
        FrontendError::Sdl(message)
    }
}
