use std::time::Instant;

use chrono::TimeDelta;

// @module: Session time source

/// Wall clock measured from the moment playback began
pub trait Clock {
    /// Take the reference point
    fn mark_start(&mut self);

    /// Time since the reference point (zero before `mark_start`)
    fn elapsed(&mut self) -> TimeDelta;
}

#[derive(Debug, Default)]
pub struct SystemClock {
    started: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn mark_start(&mut self) {
        self.started = Some(Instant::now());
    }

    fn elapsed(&mut self) -> TimeDelta {
        match self.started {
            Some(start) => TimeDelta::from_std(start.elapsed()).unwrap_or(TimeDelta::MAX),
            None => TimeDelta::zero(),
        }
    }
}
