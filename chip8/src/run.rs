use std::time::{Duration, Instant};

use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vip8_core::{Chip8, KeyState};
use vip8_display::Display;

use crate::beeper::Beeper;
use crate::error::FrontendError;
use crate::keymap::keymap;

/// How fast the machine and its timers run, and how big the window is.
#[derive(Clone, Copy, Debug)]
pub struct Settings {
    pub clock_hz: u32,
    pub timer_hz: u32,
    pub scale: u32,
}

/// Fires once every `period`, catching up if it falls behind
struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    fn new(hz: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / f64::from(hz));
        Interval {
            period,
            next: Instant::now() + period,
        }
    }

    fn elapsed(&mut self, now: Instant) -> bool {
        if now >= self.next {
            self.next += self.period;
            true
        } else {
            false
        }
    }

    /// Starts counting a fresh period from `now`, forgetting any missed ones
    fn restart(&mut self, now: Instant) {
        self.next = now + self.period;
    }
}

/// Runs `chip8` in an SDL2 window until it's closed or the machine halts.
///
/// - Escape or closing the window quits
/// - holding Space ignores the clock speed
/// - holding Backspace runs the CPU backwards
pub fn run(mut chip8: Chip8, settings: Settings) -> Result<(), FrontendError> {
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, settings.scale)?;
    let mut beeper = Beeper::new(&sdl)?;
    let mut events = sdl.event_pump()?;

    let cycle_time = Duration::from_secs_f64(1.0 / f64::from(settings.clock_hz));
    let mut last_cycle = Instant::now();
    let mut timers = Interval::new(settings.timer_hz);
    let mut keys = KeyState::new();

    // Whether or not the default clock speed should be respected
    let mut fast_forward = false;
    // Whether the game's state should be cycled forwards or backwards
    let mut rewind = false;

    info!(
        "running at {}Hz with timers at {}Hz",
        settings.clock_hz, settings.timer_hz
    );

    'event: loop {
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame)?;
        }

        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if key == Keycode::Escape {
                        break 'event;
                    }
                    match keymap(key) {
                        Some(kc) => keys.key_press(kc),
                        None if key == Keycode::Space => fast_forward = true,
                        None if key == Keycode::Backspace => rewind = true,
                        None => {}
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match keymap(key) {
                    Some(kc) => keys.key_release(kc),
                    None if key == Keycode::Space => fast_forward = false,
                    None if key == Keycode::Backspace => rewind = false,
                    None => {}
                },
                _ => {}
            }
        }

        if rewind {
            if !chip8.reverse_cpu() {
                debug!("nothing left to rewind");
            }
            // timers are frozen while rewinding
            timers.restart(Instant::now());
        } else {
            let pc = chip8.pc();
            chip8
                .advance_cpu(&keys)
                .map_err(|source| FrontendError::Exec { pc, source })?;
            while timers.elapsed(Instant::now()) {
                chip8.advance_timers();
            }
        }
        beeper.set_active(!rewind && chip8.sound_active());

        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("window closed");
    Ok(())
}
