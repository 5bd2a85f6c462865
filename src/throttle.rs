/// What a throttled handler should do with the event it just received.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admit {
    /// Run the handler now.
    Now,
    /// Inside the window: schedule one trailing run after this many ms.
    Later(u32),
    /// Inside the window and a trailing run is already scheduled.
    Skip,
}

/// Time-based throttle with a trailing edge.
///
/// At most one run per `interval_ms`; an event arriving inside the window
/// schedules exactly one trailing run so the last event of a burst is never
/// lost.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: f64,
    last_run: Option<f64>,
    trailing_pending: bool,
}

impl Throttle {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms),
            last_run: None,
            trailing_pending: false,
        }
    }

    pub fn admit(&mut self, now_ms: f64) -> Admit {
        let elapsed = self.last_run.map(|last| now_ms - last);
        match elapsed {
            Some(elapsed) if (0.0..self.interval_ms).contains(&elapsed) => {
                if self.trailing_pending {
                    Admit::Skip
                } else {
                    self.trailing_pending = true;
                    Admit::Later((self.interval_ms - elapsed).ceil() as u32)
                }
            }
            _ => {
                self.last_run = Some(now_ms);
                Admit::Now
            }
        }
    }

    /// Records that the scheduled trailing run has happened.
    pub fn trailing_ran(&mut self, now_ms: f64) {
        self.trailing_pending = false;
        self.last_run = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_event_runs_immediately() {
        let mut throttle = Throttle::new(16);
        assert_eq!(throttle.admit(1000.0), Admit::Now);
    }

    #[test]
    fn burst_collapses_into_one_trailing_run() {
        let mut throttle = Throttle::new(16);
        assert_eq!(throttle.admit(0.0), Admit::Now);
        assert_eq!(throttle.admit(4.0), Admit::Later(12));
        assert_eq!(throttle.admit(8.0), Admit::Skip);
        assert_eq!(throttle.admit(12.0), Admit::Skip);

        throttle.trailing_ran(16.0);
        assert_eq!(throttle.admit(20.0), Admit::Later(12));
    }

    #[test]
    fn events_spaced_past_the_window_all_run() {
        let mut throttle = Throttle::new(16);
        assert_eq!(throttle.admit(0.0), Admit::Now);
        assert_eq!(throttle.admit(16.0), Admit::Now);
        assert_eq!(throttle.admit(40.0), Admit::Now);
    }

    #[test]
    fn clock_going_backwards_does_not_stall() {
        let mut throttle = Throttle::new(16);
        assert_eq!(throttle.admit(100.0), Admit::Now);
        assert_eq!(throttle.admit(50.0), Admit::Now);
    }
}
