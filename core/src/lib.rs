pub use chip8::{Chip8, Config};
pub use error::{ExecError, ExecResult, LoadError, Step};
pub use frame::FrameView;
pub use keypad::{KeyState, Keypad};
pub use timers::Timers;

mod chip8;
pub mod constants;
mod error;
pub mod frame;
pub mod instruction;
mod keypad;
pub mod memory;
pub mod opcode;
mod operations;
pub mod stack;
pub mod state;
mod timers;
