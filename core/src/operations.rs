use log::debug;
use rand::Rng;

use crate::constants::{KEY_COUNT, SPRITE_HEIGHT};
use crate::error::{ExecResult, Step};
use crate::instruction::Context;
use crate::opcode::Opcode;
use crate::state::State;

/// clear
pub fn clr(_op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.frame_buffer.clear();
    state.draw_flag = true;
    state.next();
    Ok(Step::Continue)
}

/// PC = STACK.pop()
/// The popped address already points past the call.
pub fn rts(_op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.pc = state.stack.pop()?;
    Ok(Step::Continue)
}

/// PC = nnn
pub fn jump(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.pc = op.nnn();
    Ok(Step::Continue)
}

/// STACK.push(PC + 2); PC = nnn
pub fn call(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.stack.push(state.pc.wrapping_add(0x2))?;
    state.pc = op.nnn();
    Ok(Step::Continue)
}

/// if Vx == nn then pc += 2
pub fn ske(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.skip_if(state.v[op.x() as usize] == op.nn());
    Ok(Step::Continue)
}

/// if Vx != nn then pc += 2
pub fn skne(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.skip_if(state.v[op.x() as usize] != op.nn());
    Ok(Step::Continue)
}

/// if Vx == Vy then pc += 2
pub fn skre(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.skip_if(state.v[op.x() as usize] == state.v[op.y() as usize]);
    Ok(Step::Continue)
}

/// Vx = nn
pub fn load(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.v[op.x() as usize] = op.nn();
    state.next();
    Ok(Step::Continue)
}

/// Vx += nn
/// Add nn to Vx; allow for overflow but implicitly drop it
pub fn add(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    let x = op.x() as usize;
    state.v[x] = state.v[x].wrapping_add(op.nn());
    state.next();
    Ok(Step::Continue)
}

/// Vx = Vy
pub fn mv(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.v[op.x() as usize] = state.v[op.y() as usize];
    state.next();
    Ok(Step::Continue)
}

/// Vx |= Vy
pub fn or(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.v[op.x() as usize] |= state.v[op.y() as usize];
    state.next();
    Ok(Step::Continue)
}

/// Vx &= Vy
pub fn and(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.v[op.x() as usize] &= state.v[op.y() as usize];
    state.next();
    Ok(Step::Continue)
}

/// Vx ^= Vy
pub fn xor(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.v[op.x() as usize] ^= state.v[op.y() as usize];
    state.next();
    Ok(Step::Continue)
}

/// Vx += Vy; VF = overflow
pub fn addr(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    let (res, over) = state.v[op.x() as usize].overflowing_add(state.v[op.y() as usize]);
    state.v[0xF] = over as u8;
    state.v[op.x() as usize] = res;
    state.next();
    Ok(Step::Continue)
}

/// Vx -= Vy; VF = !underflow
pub fn sub(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    let (res, under) = state.v[op.x() as usize].overflowing_sub(state.v[op.y() as usize]);
    state.v[0xF] = !under as u8;
    state.v[op.x() as usize] = res;
    state.next();
    Ok(Step::Continue)
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    let vx = state.v[op.x() as usize];
    state.v[0xF] = vx & 0x1;
    state.v[op.x() as usize] = vx >> 1;
    state.next();
    Ok(Step::Continue)
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    let (res, under) = state.v[op.y() as usize].overflowing_sub(state.v[op.x() as usize]);
    state.v[0xF] = !under as u8;
    state.v[op.x() as usize] = res;
    state.next();
    Ok(Step::Continue)
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    let vx = state.v[op.x() as usize];
    state.v[0xF] = vx >> 7;
    state.v[op.x() as usize] = vx << 1;
    state.next();
    Ok(Step::Continue)
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.skip_if(state.v[op.x() as usize] != state.v[op.y() as usize]);
    Ok(Step::Continue)
}

/// I = nnn
pub fn loadi(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.i = op.nnn();
    state.next();
    Ok(Step::Continue)
}

/// PC = V0 + nnn
pub fn jumpi(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.pc = u16::from(state.v[0x0]) + op.nnn();
    Ok(Step::Continue)
}

/// Vx = rand_byte & nn
pub fn rnd(op: Opcode, state: &mut State, ctx: &mut Context<'_>) -> ExecResult {
    let rand_byte: u8 = ctx.rng.gen();
    state.v[op.x() as usize] = rand_byte & op.nn();
    state.next();
    Ok(Step::Continue)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    let x = state.v[op.x() as usize] as usize;
    let y = state.v[op.y() as usize] as usize;

    // Reset the carry flag (used for collision detection)
    state.v[0xF] = 0x0;

    for row in 0..u16::from(op.n()) {
        let sprite = state.memory[state.i + row];
        for bit in 0..8 {
            if sprite & (0x80 >> bit) == 0 {
                continue;
            }
            if state.frame_buffer.flip(x + bit, y + row as usize) {
                state.v[0xF] = 0x1;
            }
        }
    }

    state.draw_flag = true;
    state.next();
    Ok(Step::Continue)
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: Opcode, state: &mut State, ctx: &mut Context<'_>) -> ExecResult {
    state.skip_if(ctx.keypad.is_key_pressed(state.v[op.x() as usize]));
    Ok(Step::Continue)
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: Opcode, state: &mut State, ctx: &mut Context<'_>) -> ExecResult {
    state.skip_if(!ctx.keypad.is_key_pressed(state.v[op.x() as usize]));
    Ok(Step::Continue)
}

/// Vx = DT
pub fn moved(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.v[op.x() as usize] = state.timers.delay;
    state.next();
    Ok(Step::Continue)
}

/// await keypress for Vx
/// Polls every key once; the pc only moves on once some key is down.
/// When several are down the highest one wins.
pub fn keyd(op: Opcode, state: &mut State, ctx: &mut Context<'_>) -> ExecResult {
    let pressed = (0..KEY_COUNT as u8)
        .rev()
        .find(|&key| ctx.keypad.is_key_pressed(key));

    match pressed {
        Some(key) => {
            if state.awaiting_key.take().is_some() {
                debug!("key {:X} released the wait on V{:X}", key, op.x());
            }
            state.v[op.x() as usize] = key;
            state.next();
            Ok(Step::Continue)
        }
        None => {
            if state.awaiting_key.is_none() {
                debug!("waiting for a key to store in V{:X}", op.x());
            }
            state.awaiting_key = Some(op.x());
            Ok(Step::AwaitingKey(op.x()))
        }
    }
}

/// DT = Vx
pub fn loads(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.timers.delay = state.v[op.x() as usize];
    state.next();
    Ok(Step::Continue)
}

/// ST = Vx
pub fn ld(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.timers.sound = state.v[op.x() as usize];
    state.next();
    Ok(Step::Continue)
}

/// I += Vx
pub fn addi(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x() as usize]));
    state.next();
    Ok(Step::Continue)
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    state.i = u16::from(state.v[op.x() as usize]) * SPRITE_HEIGHT;
    state.next();
    Ok(Step::Continue)
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address I
pub fn bcd(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    let vx = state.v[op.x() as usize];
    state.memory[state.i..state.i + 0x3].copy_from_slice(&[vx / 100, vx / 10 % 10, vx % 10]);
    state.next();
    Ok(Step::Continue)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    let x = op.x() as usize;
    let end = state.i + op.x() as u16 + 1;
    state.memory[state.i..end].copy_from_slice(&state.v[..=x]);
    state.next();
    Ok(Step::Continue)
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: Opcode, state: &mut State, _ctx: &mut Context<'_>) -> ExecResult {
    let x = op.x() as usize;
    let end = state.i + op.x() as u16 + 1;
    state.v[..=x].copy_from_slice(&state.memory[state.i..end]);
    state.next();
    Ok(Step::Continue)
}
