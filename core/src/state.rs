use crate::constants::PROGRAM_START;
use crate::error::LoadError;
use crate::frame::FrameBuffer;
use crate::memory::Memory;
use crate::stack::Stack;
use crate::timers::Timers;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Timers
/// - 2 8-bit timers (delay & sound)
///
/// ## Memory
/// - a 16 slot call stack of return addresses
/// - 4096 bytes of addressable memory
/// - 64x32 frame buffer
///     - stores the contents of the next frame to be drawn
///     - `draw_flag` records that it changed since it was last presented
///
/// ## Input
/// - `awaiting_key` holds the register an `Fx0A` is waiting to fill
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub timers: Timers,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub awaiting_key: Option<u8>,
}

impl State {
    /// A freshly powered on machine with `program` loaded at 0x200.
    pub fn new(program: &[u8]) -> Result<Self, LoadError> {
        Ok(State::with_memory(Memory::initialize(program)?))
    }

    pub fn with_memory(memory: Memory) -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::default(),
            timers: Timers::default(),
            memory,
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            awaiting_key: None,
        }
    }

    /// Moves on to the next instruction
    pub fn next(&mut self) {
        self.pc = self.pc.wrapping_add(0x2);
    }

    /// Skips the next instruction if `condition` holds, otherwise moves on to it
    pub fn skip_if(&mut self, condition: bool) {
        let step = if condition { 0x4 } else { 0x2 };
        self.pc = self.pc.wrapping_add(step);
    }
}

impl Default for State {
    fn default() -> Self {
        State::with_memory(Memory::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_starts_at_program_start() {
        let state = State::new(&[0x00, 0xE0]).unwrap();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.v, [0; 16]);
        assert_eq!(state.i, 0);
        assert_eq!(state.stack.depth(), 0);
        assert_eq!(state.timers, Timers::default());
        assert!(!state.draw_flag);
        assert_eq!(state.memory.word(0x200), 0x00E0);
    }

    #[test]
    fn test_skip_if() {
        let mut state = State::default();
        state.skip_if(true);
        assert_eq!(state.pc, 0x204);
        state.skip_if(false);
        assert_eq!(state.pc, 0x206);
    }
}
