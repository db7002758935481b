/// # Timers
/// Two 8-bit countdown timers.
///
/// Both count down toward zero once per tick of an external 60Hz clock and stop there.
/// While the sound timer is above zero the machine should be beeping.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Decrements both timers, each clamped at zero.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_timers_count_down_independently() {
        let mut timers = Timers { delay: 2, sound: 1 };
        timers.tick();
        assert_eq!(timers, Timers { delay: 1, sound: 0 });
        assert!(!timers.sound_active());
        timers.tick();
        assert_eq!(timers, Timers { delay: 0, sound: 0 });
    }

    proptest! {
        #[test]
        fn test_delay_timer_decreases_by_ticks_and_clamps(start in any::<u8>(), ticks in 0usize..600) {
            let mut timers = Timers { delay: start, sound: 0 };
            for _ in 0..ticks {
                timers.tick();
            }
            let expected = (start as usize).saturating_sub(ticks) as u8;
            prop_assert_eq!(timers.delay, expected);
            prop_assert_eq!(timers.sound, 0);
        }
    }
}
