use crate::constants::STACK_SIZE;
use crate::error::ExecError;

/// # Call Stack
/// Return addresses for up to `STACK_SIZE` nested subroutine calls.
///
/// `sp` is the next free slot: pushing stores then increments, popping decrements then loads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    slots: [u16; STACK_SIZE],
    sp: u8,
}

impl Stack {
    pub fn push(&mut self, addr: u16) -> Result<(), ExecError> {
        let slot = self
            .slots
            .get_mut(self.sp as usize)
            .ok_or(ExecError::StackOverflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, ExecError> {
        if self.sp == 0 {
            return Err(ExecError::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.slots[self.sp as usize])
    }

    /// Number of return addresses currently held
    pub fn depth(&self) -> usize {
        self.sp as usize
    }
}
