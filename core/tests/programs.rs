use vip8_core::constants::KEY_COUNT;
use vip8_core::{Chip8, Config, ExecError, KeyState, Step};

const NO_KEYS: [bool; KEY_COUNT] = [false; KEY_COUNT];

fn boot(program: &[u8]) -> Chip8 {
    let config = Config {
        seed: Some(0xC8),
        ..Config::default()
    };
    Chip8::with_config(program, config).expect("program fits in memory")
}

/// Runs until `pc` reaches `halt` (a jump to itself), giving up after `limit` cycles
fn run_until(chip8: &mut Chip8, halt: u16, limit: usize) -> usize {
    for cycle in 0..limit {
        if chip8.pc() == halt {
            return cycle;
        }
        chip8.advance_cpu(&NO_KEYS).expect("program runs cleanly");
    }
    panic!("pc never reached {:04X}", halt);
}

#[test]
fn test_draws_decimal_digit_of_a_register() {
    #[rustfmt::skip]
    let program = [
        0x6A, 0x9D, // VA = 157
        0xA3, 0x00, // I = 0x300
        0xFA, 0x33, // mem[I..I+3] = bcd(VA)
        0xF2, 0x65, // V0..=V2 = mem[I..=I+2]
        0xF1, 0x29, // I = sprite(V1)
        0x63, 0x00, // V3 = 0
        0x64, 0x00, // V4 = 0
        0xD3, 0x45, // draw 5 rows at (V3, V4)
        0x12, 0x10, // halt
    ];
    let mut chip8 = boot(&program);
    run_until(&mut chip8, 0x210, 20);

    assert_eq!(chip8.memory()[0x300..0x303], [1, 5, 7]);
    assert_eq!(chip8.registers()[0..3], [1, 5, 7]);
    assert_eq!(chip8.index(), 5 * 5);

    let frame = chip8.take_frame().expect("drawing marks the frame dirty");
    assert_eq!(frame.lit_pixels(), 14);
    assert!(frame.pixel(0, 1));
    assert!(!frame.pixel(3, 1));
    assert!(frame.pixel(3, 3));
    assert!(!frame.pixel(0, 3));
    assert!(chip8.take_frame().is_none());
}

#[test]
fn test_counts_with_a_subroutine() {
    #[rustfmt::skip]
    let program = [
        0x60, 0x00, // V0 = 0
        0x22, 0x0A, // call 0x20A
        0x30, 0x05, // skip if V0 == 5
        0x12, 0x02, // jump 0x202
        0x12, 0x08, // halt
        0x70, 0x01, // V0 += 1
        0x00, 0xEE, // return
    ];
    let mut chip8 = boot(&program);
    run_until(&mut chip8, 0x208, 100);

    assert_eq!(chip8.registers()[0x0], 5);
    assert_eq!(chip8.stack_depth(), 0);
}

#[test]
fn test_unbounded_recursion_overflows_the_stack() {
    let mut chip8 = boot(&[0x22, 0x00]);
    for _ in 0..16 {
        assert_eq!(chip8.advance_cpu(&NO_KEYS), Ok(Step::Continue));
    }
    assert_eq!(chip8.advance_cpu(&NO_KEYS), Err(ExecError::StackOverflow));
    assert_eq!(chip8.stack_depth(), 16);
}

#[test]
fn test_busy_waits_on_the_delay_timer() {
    #[rustfmt::skip]
    let program = [
        0x60, 0x03, // V0 = 3
        0xF0, 0x15, // DT = V0
        0xF1, 0x07, // V1 = DT
        0x31, 0x00, // skip if V1 == 0
        0x12, 0x04, // jump 0x204
        0x12, 0x0A, // halt
    ];
    let mut chip8 = boot(&program);
    let mut ticks = 0;
    for cycle in 1..=100 {
        if chip8.pc() == 0x20A {
            break;
        }
        chip8.advance_cpu(&NO_KEYS).unwrap();
        if cycle % 8 == 0 {
            chip8.advance_timers();
            ticks += 1;
        }
    }

    assert_eq!(chip8.pc(), 0x20A);
    assert_eq!(chip8.registers()[0x1], 0);
    assert!(ticks >= 3);
}

#[test]
fn test_waits_for_a_key_before_moving_on() {
    #[rustfmt::skip]
    let program = [
        0xF5, 0x0A, // V5 = wait for key
        0x12, 0x02, // halt
    ];
    let mut chip8 = boot(&program);
    let mut keys = KeyState::new();
    for _ in 0..10 {
        assert_eq!(chip8.advance_cpu(&keys), Ok(Step::AwaitingKey(0x5)));
    }
    keys.key_press(0xC);
    assert_eq!(chip8.advance_cpu(&keys), Ok(Step::Continue));
    assert_eq!(chip8.registers()[0x5], 0xC);
    assert_eq!(chip8.pc(), 0x202);
}

#[test]
fn test_skips_on_held_key() {
    #[rustfmt::skip]
    let program = [
        0x60, 0x04, // V0 = 4
        0xE0, 0x9E, // skip if key V0 is down
        0x12, 0x04, // halt: key was up
        0x12, 0x06, // halt: key was down
    ];
    let mut keys = KeyState::new();
    keys.key_press(0x4);
    let mut chip8 = boot(&program);
    chip8.advance_cpu(&keys).unwrap();
    chip8.advance_cpu(&keys).unwrap();
    assert_eq!(chip8.pc(), 0x206);

    let mut chip8 = boot(&program);
    chip8.advance_cpu(&NO_KEYS).unwrap();
    chip8.advance_cpu(&NO_KEYS).unwrap();
    assert_eq!(chip8.pc(), 0x204);
}
