//! Periodic tick sensor
//!
//! Mirrors a host "always" sensor in pulse mode: once enabled with a skip
//! count it fires on the first tick and then on every `skip + 1`th tick.
//! Disabled, it never fires.

/// Pulse-mode tick sensor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PulseSensor {
    pulse: Option<u32>,
    countdown: u32,
}

impl PulseSensor {
    /// Create a disabled sensor
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an update interval: `>= 0` enables pulse mode with that many
    /// skipped ticks, `< 0` disables it
    ///
    /// Reconfiguring with the current mode is a no-op so the phase survives.
    pub fn configure(&mut self, update_interval: i32) {
        let wanted = u32::try_from(update_interval).ok();
        if wanted != self.pulse {
            self.pulse = wanted;
            self.countdown = 0;
        }
    }

    /// Whether pulse mode is on
    pub fn is_pulsing(&self) -> bool {
        self.pulse.is_some()
    }

    /// Advance one tick, returning whether the sensor fired
    pub fn tick(&mut self) -> bool {
        let Some(skip) = self.pulse else {
            return false;
        };
        if self.countdown == 0 {
            self.countdown = skip;
            true
        } else {
            self.countdown -= 1;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_pattern(sensor: &mut PulseSensor, ticks: usize) -> Vec<bool> {
        (0..ticks).map(|_| sensor.tick()).collect()
    }

    #[test]
    fn test_disabled_never_fires() {
        let mut sensor = PulseSensor::new();
        assert!(!sensor.is_pulsing());
        assert!(fire_pattern(&mut sensor, 5).iter().all(|f| !f));
        sensor.configure(-1);
        assert!(!sensor.tick());
    }

    #[test]
    fn test_zero_skip_fires_every_tick() {
        let mut sensor = PulseSensor::new();
        sensor.configure(0);
        assert!(sensor.is_pulsing());
        assert_eq!(fire_pattern(&mut sensor, 3), vec![true, true, true]);
    }

    #[test]
    fn test_skip_count() {
        let mut sensor = PulseSensor::new();
        sensor.configure(2);
        assert_eq!(
            fire_pattern(&mut sensor, 7),
            vec![true, false, false, true, false, false, true]
        );
    }

    #[test]
    fn test_reconfigure_same_interval_keeps_phase() {
        let mut sensor = PulseSensor::new();
        sensor.configure(1);
        assert!(sensor.tick());
        sensor.configure(1);
        assert!(!sensor.tick());
        sensor.configure(3);
        assert!(sensor.tick());
    }
}
