//! scheduler - Fixed-period, self-rescheduling tick loop
//!
//! Each tick arms its successor one period after it finishes. A slow tick
//! therefore delays every later tick by the overrun; nothing is skipped
//! and nothing is caught up.

use core::time::Duration;

use log::debug;

/// Time source for the scheduler.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    fn sleep(&mut self, duration: Duration);
}

/// Returned by the tick handler to re-arm or end the chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

pub struct TickScheduler<C> {
    clock: C,
    period: Duration,
    fired: u64,
}

impl<C: Clock> TickScheduler<C> {
    pub fn new(clock: C, period: Duration) -> Self {
        assert!(!period.is_zero(), "tick period must be non-zero");
        Self {
            clock,
            period,
            fired: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Ticks fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Runs `on_tick` (given the 1-based tick number) until it returns
    /// `TickControl::Stop`. Returns the number of ticks fired.
    pub fn run<F>(&mut self, mut on_tick: F) -> u64
    where
        F: FnMut(u64) -> TickControl,
    {
        loop {
            self.fired += 1;
            let started = self.clock.now();
            let control = on_tick(self.fired);
            let busy = self.clock.now().saturating_sub(started);
            if busy > self.period {
                debug!(
                    "tick {} took {:?}, longer than the {:?} period",
                    self.fired, busy, self.period
                );
            }

            if control == TickControl::Stop {
                return self.fired;
            }
            // Re-arm relative to the end of this tick.
            self.clock.sleep(self.period);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Virtual time: only `sleep` and explicit work move it forward.
    #[derive(Clone, Default)]
    struct FakeClock {
        now: Rc<Cell<Duration>>,
    }

    impl FakeClock {
        fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Duration {
            self.now.get()
        }

        fn sleep(&mut self, duration: Duration) {
            self.advance(duration);
        }
    }

    const PERIOD: Duration = Duration::from_millis(50);

    #[test]
    fn stops_when_the_handler_says_so() {
        let mut scheduler = TickScheduler::new(FakeClock::default(), PERIOD);
        let fired = scheduler.run(|tick| {
            if tick == 4 {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        });
        assert_eq!(fired, 4);
        assert_eq!(scheduler.fired(), 4);
        // Three re-arms, none after the final tick.
        assert_eq!(scheduler.clock().now(), PERIOD * 3);
    }

    #[test]
    fn slow_ticks_delay_but_never_skip() {
        let clock = FakeClock::default();
        let handle = clock.clone();
        let mut scheduler = TickScheduler::new(clock, PERIOD);
        let mut fired_at = Vec::new();
        let mut numbers = Vec::new();

        scheduler.run(|tick| {
            fired_at.push(handle.now());
            numbers.push(tick);
            // Tick 2 overruns the period badly.
            let work = if tick == 2 { 120 } else { 10 };
            handle.advance(Duration::from_millis(work));
            if tick == 4 {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        });

        assert_eq!(numbers, vec![1, 2, 3, 4]);
        let ms: Vec<u128> = fired_at.iter().map(|d| d.as_millis()).collect();
        assert_eq!(ms, vec![0, 60, 230, 290]);
    }

    #[test]
    #[should_panic]
    fn zero_period_is_rejected() {
        let _ = TickScheduler::new(FakeClock::default(), Duration::ZERO);
    }
}
