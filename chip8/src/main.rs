use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use vip8_core::constants::{CPU_FREQUENCY_HZ, MAX_SAVED_STATES, TIMER_FREQUENCY_HZ};
use vip8_core::{Chip8, Config};

use crate::error::FrontendError;
use crate::run::{run, Settings};

mod beeper;
mod error;
mod keymap;
mod run;

/// Runs a CHIP-8 program in a window.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the program image
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = CPU_FREQUENCY_HZ, value_parser = clap::value_parser!(u32).range(1..))]
    clock_hz: u32,

    /// Timer decrements per second
    #[arg(long, default_value_t = TIMER_FREQUENCY_HZ, value_parser = clap::value_parser!(u32).range(1..))]
    timer_hz: u32,

    /// Size multiplier for each pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    scale: u32,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Number of cycles that can be rewound; 0 disables rewinding
    #[arg(long, default_value_t = MAX_SAVED_STATES)]
    rewind_depth: usize,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            history_depth: self.rewind_depth,
            seed: self.seed,
        }
    }

    fn settings(&self) -> Settings {
        Settings {
            clock_hz: self.clock_hz,
            timer_hz: self.timer_hz,
            scale: self.scale,
        }
    }
}

/// Reads the ROM at `args.rom` into a fresh machine
fn load(args: &Args) -> Result<Chip8, FrontendError> {
    let file = File::open(&args.rom).map_err(|source| FrontendError::Open {
        path: args.rom.clone(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let chip8 = Chip8::from_reader(&mut reader, args.config()).map_err(|source| {
        FrontendError::Load {
            path: args.rom.clone(),
            source,
        }
    })?;
    info!("loaded {}", args.rom.display());
    Ok(chip8)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match load(&args).and_then(|chip8| run(chip8, args.settings())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_args_require_a_rom() {
        let err = Args::try_parse_from(["vip8"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["vip8", "pong.ch8"]).unwrap();
        assert_eq!(args.rom, PathBuf::from("pong.ch8"));
        assert_eq!(args.clock_hz, CPU_FREQUENCY_HZ);
        assert_eq!(args.timer_hz, TIMER_FREQUENCY_HZ);
        assert_eq!(args.config(), Config::default());
    }

    #[test]
    fn test_args_reject_zero_clock() {
        assert!(Args::try_parse_from(["vip8", "pong.ch8", "--clock-hz", "0"]).is_err());
    }

    #[test]
    fn test_missing_rom_fails_to_load_with_code_2() {
        let args = Args::try_parse_from(["vip8", "/nonexistent/rom.ch8"]).unwrap();
        let err = load(&args).err().expect("file doesn't exist");
        assert!(matches!(err, FrontendError::Open { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
