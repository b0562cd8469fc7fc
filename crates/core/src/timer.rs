/// One-shot countdown advanced by the host's fixed-timestep tick.
///
/// `tick` reports `true` exactly once, on the tick that drains the remaining
/// time. A cancelled timer never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DelayTimer {
    remaining_ms: Option<u32>,
}

impl DelayTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, duration_ms: u32) {
        self.remaining_ms = Some(duration_ms);
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.remaining_ms.is_some()
    }

    pub fn remaining_ms(&self) -> Option<u32> {
        self.remaining_ms
    }

    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let Some(remaining) = self.remaining_ms else {
            return false;
        };

        let remaining = remaining.saturating_sub(elapsed_ms);
        if remaining == 0 {
            self.remaining_ms = None;
            true
        } else {
            self.remaining_ms = Some(remaining);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_duration() {
        let mut timer = DelayTimer::new();
        timer.start(500);

        assert!(!timer.tick(16));
        assert_eq!(timer.remaining_ms(), Some(484));
        assert!(!timer.tick(483));
        assert!(timer.tick(1));
        assert!(!timer.is_running());
        assert!(!timer.tick(16));
    }

    #[test]
    fn test_overshoot_still_fires() {
        let mut timer = DelayTimer::new();
        timer.start(10);
        assert!(timer.tick(1000));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timer = DelayTimer::new();
        timer.start(100);
        timer.tick(50);
        timer.cancel();

        assert!(!timer.is_running());
        assert!(!timer.tick(1000));
    }

    #[test]
    fn test_zero_duration_fires_on_next_tick() {
        let mut timer = DelayTimer::new();
        timer.start(0);
        assert!(timer.is_running());
        assert!(timer.tick(0));
    }
}
