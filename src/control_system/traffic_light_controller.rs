use crate::error::ProcessError;
use crate::global_variables::{MAX_TICK_PERIOD_SECS, MIN_TICK_PERIOD_MICROS};
use crate::shared_data::{ActivePhase, LightState, SignalTiming};
use std::sync::{Arc, Mutex};
use tokio::time::{interval, Duration};

/// Round-robin playback of a signal plan: one lane at a time runs green then yellow while every
/// other lane holds red.
#[derive(Debug, Clone)]
pub struct SignalCycle {
    pub timings: Vec<SignalTiming>,
    pub current_signal: usize,
    pub elapsed_in_signal: u32,
}

impl SignalCycle {
    pub fn new(timings: Vec<SignalTiming>) -> Self {
        let mut cycle = Self {
            timings,
            current_signal: 0,
            elapsed_in_signal: 0,
        };
        cycle.skip_empty_signals();
        cycle
    }

    pub fn cycle_time(&self) -> u32 {
        self.timings
            .iter()
            .fold(0u32, |acc, t| acc.saturating_add(t.active_time()))
    }

    // Advances one second and moves to the next signal once the current one has run its
    // green and yellow. Signals with no active time are passed over.
    pub fn tick(&mut self) {
        if self.cycle_time() == 0 {
            return;
        }
        self.elapsed_in_signal += 1;
        let current = &self.timings[self.current_signal];
        if self.elapsed_in_signal >= current.active_time() {
            self.advance_signal();
            self.announce_current_signal();
        }
    }

    pub fn light_for(&self, lane_index: usize) -> LightState {
        if lane_index != self.current_signal {
            return LightState::Red;
        }
        match self.timings.get(lane_index) {
            Some(timing) if timing.active_time() == 0 => LightState::Red,
            Some(timing) if self.elapsed_in_signal < timing.green => LightState::Green,
            Some(_) => LightState::Yellow,
            None => LightState::Red,
        }
    }

    pub fn lights(&self) -> Vec<LightState> {
        (0..self.timings.len()).map(|i| self.light_for(i)).collect()
    }

    /// Light states `offset` seconds after the start of the cycle (wrapping).
    pub fn state_at(&self, offset: u32) -> Vec<LightState> {
        let cycle = self.cycle_time();
        let mut lights = vec![LightState::Red; self.timings.len()];
        if cycle == 0 {
            return lights;
        }
        let mut remaining = offset % cycle;
        for (i, timing) in self.timings.iter().enumerate() {
            if remaining < timing.active_time() {
                lights[i] = if remaining < timing.green {
                    LightState::Green
                } else {
                    LightState::Yellow
                };
                break;
            }
            remaining -= timing.active_time();
        }
        lights
    }

    /// Seconds left before the active signal hands over.
    pub fn time_remaining(&self) -> u32 {
        self.timings
            .get(self.current_signal)
            .map(|t| t.active_time().saturating_sub(self.elapsed_in_signal))
            .unwrap_or(0)
    }

    // Manual override of a lane's green or yellow time. Every red time is re-derived.
    pub fn set_timing(
        &mut self,
        lane_index: usize,
        phase: ActivePhase,
        seconds: u32,
    ) -> Result<(), ProcessError> {
        let lanes = self.timings.len();
        let current = self
            .timings
            .get(lane_index)
            .ok_or(ProcessError::LaneIndexOutOfRange {
                index: lane_index,
                lanes,
            })?;
        let new_active = match phase {
            ActivePhase::Green => seconds.checked_add(current.yellow),
            ActivePhase::Yellow => current.green.checked_add(seconds),
        };
        let fits = new_active.and_then(|active| {
            self.timings
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != lane_index)
                .try_fold(active, |acc, (_, t)| {
                    t.green.checked_add(t.yellow).and_then(|a| acc.checked_add(a))
                })
        });
        if fits.is_none() {
            return Err(ProcessError::TimingOverflow { lane_index });
        }

        let timing = &mut self.timings[lane_index];
        let previous = match phase {
            ActivePhase::Green => std::mem::replace(&mut timing.green, seconds),
            ActivePhase::Yellow => std::mem::replace(&mut timing.yellow, seconds),
        };
        log::info!(
            "Adjusted {:?} time for lane {} ({}) from {} to {} seconds",
            phase,
            lane_index,
            timing.direction,
            previous,
            seconds
        );
        self.recompute_red_times();
        if lane_index == self.current_signal
            && self.elapsed_in_signal >= self.timings[lane_index].active_time()
        {
            self.advance_signal();
        } else {
            self.skip_empty_signals();
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.current_signal = 0;
        self.elapsed_in_signal = 0;
        self.skip_empty_signals();
    }

    fn advance_signal(&mut self) {
        self.elapsed_in_signal = 0;
        self.current_signal = (self.current_signal + 1) % self.timings.len();
        self.skip_empty_signals();
    }

    // Moves off zero-length signals so the active one always has time to run.
    fn skip_empty_signals(&mut self) {
        if self.cycle_time() == 0 {
            return;
        }
        while self.timings[self.current_signal].active_time() == 0 {
            self.elapsed_in_signal = 0;
            self.current_signal = (self.current_signal + 1) % self.timings.len();
        }
    }

    fn recompute_red_times(&mut self) {
        let cycle = self.cycle_time();
        for timing in self.timings.iter_mut() {
            timing.red = cycle.saturating_sub(timing.active_time());
        }
    }

    fn announce_current_signal(&self) {
        if let Some(timing) = self.timings.get(self.current_signal) {
            log::info!(
                "Switching to signal {} ({}): green {}s, yellow {}s",
                self.current_signal + 1,
                timing.direction,
                timing.green,
                timing.yellow
            );
        }
    }

    // Ticks the shared cycle forever, `speed` simulated seconds per wall-clock second.
    pub async fn run_update_loop(cycle: Arc<Mutex<Self>>, speed: f64) {
        let mut ticker = interval(tick_period(speed));
        loop {
            ticker.tick().await;
            match cycle.lock() {
                Ok(mut guard) => guard.tick(),
                Err(_) => {
                    log::warn!("Signal cycle lock poisoned, stopping update loop");
                    return;
                }
            }
        }
    }
}

/// Wall-clock time per simulated second at `speed`, kept between one millisecond and one hour.
/// Non-positive or non-finite speeds play back in real time.
pub fn tick_period(speed: f64) -> Duration {
    let speed = if speed.is_finite() && speed > 0.0 { speed } else { 1.0 };
    let longest = Duration::from_secs(MAX_TICK_PERIOD_SECS);
    Duration::try_from_secs_f64(1.0 / speed)
        .unwrap_or(longest)
        .clamp(Duration::from_micros(MIN_TICK_PERIOD_MICROS), longest)
}
