use std::collections::VecDeque;
use std::io::Read;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{MAX_PROGRAM_SIZE, MAX_SAVED_STATES};
use crate::error::{ExecResult, LoadError, Step};
use crate::frame::FrameView;
use crate::instruction::{execute, Context};
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::state::State;
use crate::timers::Timers;

/// Runtime knobs for a `Chip8`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// How many past states to keep for rewinding; 0 disables rewinding
    pub history_depth: usize,
    /// Seed for the random number generator; `None` seeds it from the OS
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            history_depth: MAX_SAVED_STATES,
            seed: None,
        }
    }
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - a random number generator seeded once when the machine is created
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing and reversing the CPU
/// - advancing its timers
/// - taking its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    history_depth: usize,
    rng: StdRng,
}

impl Chip8 {
    /// Creates a machine running `program` with the default configuration
    pub fn new(program: &[u8]) -> Result<Self, LoadError> {
        Self::with_config(program, Config::default())
    }

    pub fn with_config(program: &[u8], config: Config) -> Result<Self, LoadError> {
        let memory = Memory::initialize(program)?;
        info!("loaded {} byte program", program.len());

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Chip8 {
            state: State::with_memory(memory),
            previous_states: VecDeque::with_capacity(config.history_depth.min(MAX_SAVED_STATES)),
            history_depth: config.history_depth,
            rng,
        })
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    /// * `config` runtime configuration for the machine
    pub fn from_reader(reader: &mut dyn Read, config: Config) -> Result<Self, LoadError> {
        // one byte past the limit is enough to know the image doesn't fit
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE);
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut program)?;
        Self::with_config(&program, config)
    }

    /// Advances the CPU by a single cycle
    /// - gets and executes the next opcode
    /// - saves the prior state if the pc moved on
    ///
    /// While an `Fx0A` is waiting for a key this polls `keypad` again and
    /// returns `Step::AwaitingKey` until one is pressed.
    pub fn advance_cpu(&mut self, keypad: &dyn Keypad) -> ExecResult {
        let op = Opcode::fetch(&self.state.memory, self.state.pc);
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op.word(),
            self.state.v,
            self.state.i,
            self.state.pc
        );

        let previous = if self.history_depth > 0 {
            Some(self.state)
        } else {
            None
        };
        let mut ctx = Context {
            keypad,
            rng: &mut self.rng,
        };
        let step = execute(op, &mut self.state, &mut ctx)?;

        if let (Step::Continue, Some(previous)) = (step, previous) {
            self.save_state(previous);
        }
        Ok(step)
    }

    /// Reverses the CPU by a single cycle if possible
    /// - if there are previous_states, pops the last one and restores it
    ///
    /// Returns whether a state was restored.
    pub fn reverse_cpu(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                debug!("rewound to pc {:04X}", state.pc);
                self.state = state;
                self.state.draw_flag = true;
                true
            }
            None => false,
        }
    }

    /// Puts `state` in previous_states
    /// - if there are already `history_depth` saved then the oldest is dropped
    fn save_state(&mut self, state: State) {
        if self.previous_states.len() == self.history_depth {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(state);
    }

    /// Counts both timers down by one; call this at 60Hz
    pub fn advance_timers(&mut self) {
        self.state.timers.tick();
    }

    /// Returns the FrameBuffer if the display should be redrawn and marks it as drawn
    pub fn take_frame(&mut self) -> Option<FrameView<'_>> {
        if !self.state.draw_flag {
            return None;
        }
        self.state.draw_flag = false;
        Some(self.state.frame_buffer.view())
    }

    /// Whether the beeper should currently be sounding
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }

    /// The register an `Fx0A` is waiting to fill, if any
    pub fn awaiting_key(&self) -> Option<u8> {
        self.state.awaiting_key
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.state.v
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn stack_depth(&self) -> usize {
        self.state.stack.depth()
    }

    pub fn timers(&self) -> Timers {
        self.state.timers
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    /// Number of states that can currently be rewound
    pub fn history_len(&self) -> usize {
        self.previous_states.len()
    }
}
