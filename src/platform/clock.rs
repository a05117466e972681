//! Frame timing
//!
//! Turns wall-clock frame durations into simulation steps. By default each
//! frame is one tick of the measured length; fixed stepping runs whole
//! `SIM_DT` sub-steps from an accumulator instead.

use std::time::{Duration, Instant};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// How many ticks to run this frame, and how long each one is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    pub steps: u32,
    pub dt: f32,
}

#[derive(Debug)]
pub struct FrameClock {
    fixed_step: bool,
    accumulator: f32,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(fixed_step: bool) -> Self {
        Self {
            fixed_step,
            accumulator: 0.0,
            last: None,
        }
    }

    /// Seconds since the previous call (zero on the first), clamped to `MAX_FRAME_DT`
    pub fn frame_dt(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self
            .last
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        dt.min(MAX_FRAME_DT)
    }

    /// Plan the ticks for a frame that lasted `frame_dt` seconds
    pub fn plan(&mut self, frame_dt: f32) -> StepPlan {
        let frame_dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        if !self.fixed_step {
            return StepPlan {
                steps: 1,
                dt: frame_dt,
            };
        }

        self.accumulator += frame_dt;
        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        // Drop time we could not catch up on rather than carrying it forward
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        StepPlan { steps, dt: SIM_DT }
    }
}

/// Sleep away whatever is left of the frame budget
pub fn pace(frame_start: Instant, target_fps: u32) {
    let budget = Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1)));
    let elapsed = frame_start.elapsed();
    if elapsed < budget {
        std::thread::sleep(budget - elapsed);
    }
}
