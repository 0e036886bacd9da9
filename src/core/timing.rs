use instant::Instant;
use std::time::Duration;

/// Collapses a burst of notifications into one firing after a quiet period.
#[derive(Clone, Debug)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// Record a notification; pushes the deadline out to `now + wait`.
    #[inline]
    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per burst, on the first poll at or after the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Leading-edge throttle: lets a call through, then blocks for `limit`.
#[derive(Clone, Debug)]
pub struct Throttle {
    limit: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self { limit, last: None }
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now < last + self.limit => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Eased count from zero to `target` over `duration`.
#[derive(Clone, Copy, Debug)]
pub struct CountUp {
    pub target: i64,
    pub duration: Duration,
}

impl CountUp {
    pub fn new(target: i64, duration: Duration) -> Self {
        Self { target, duration }
    }

    /// Value to display after `elapsed`, and whether the count has finished.
    /// The finishing frame always shows the exact target.
    pub fn value_at(&self, elapsed: Duration) -> (i64, bool) {
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        if progress >= 1.0 {
            return (self.target, true);
        }
        let value = (ease_out_cubic(progress) * self.target as f64).floor() as i64;
        (value, false)
    }
}
