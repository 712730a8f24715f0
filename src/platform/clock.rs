//! Wall-clock frame timing

use std::time::Instant;

use crate::consts::{MAX_FRAME_DT, SIM_DT};

/// Measures the time between frames
#[derive(Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: None,
            frames: 0,
        }
    }

    /// Seconds since the previous call, clamped to `MAX_FRAME_DT`.
    /// The first call reports one simulation step.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => SIM_DT,
        };
        self.last = Some(now);
        self.frames += 1;
        dt.min(MAX_FRAME_DT)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_tick_is_one_step() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_at(Instant::now()), SIM_DT);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn test_long_frames_clamped() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        let dt = clock.tick_at(t0 + Duration::from_millis(20));
        assert!((dt - 0.02).abs() < 1e-4);
        assert_eq!(clock.tick_at(t0 + Duration::from_secs(5)), MAX_FRAME_DT);
    }
}
