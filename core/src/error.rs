use std::io;

use thiserror::Error;

use crate::constants::MAX_PROGRAM_SIZE;

/// Reasons a program image can't be placed into memory.
/// The machine never starts when loading fails.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("program is {size} bytes but only {max} bytes fit above 0x200")]
    TooLarge { size: usize, max: usize },

    #[error("unable to read program image")]
    Io(#[from] io::Error),
}

impl LoadError {
    pub(crate) fn too_large(size: usize) -> Self {
        LoadError::TooLarge {
            size,
            max: MAX_PROGRAM_SIZE,
        }
    }
}

/// Fatal conditions raised while executing an instruction.
///
/// None of these are recoverable; the run loop is expected to halt.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExecError {
    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),

    #[error("call stack overflow")]
    StackOverflow,

    #[error("return with an empty call stack")]
    StackUnderflow,
}

/// What the machine is doing after a successful cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The instruction completed and `pc` points at the next one
    Continue,
    /// `Fx0A` found no pressed key; `pc` stays put until one is observed.
    /// Carries the register that will receive the key.
    AwaitingKey(u8),
}

pub type ExecResult = Result<Step, ExecError>;
