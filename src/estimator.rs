//! Queue position and wait-time estimation for a waiting customer.
//!
//! A [`WaitEstimate`] captures a baseline at join time and decays it
//! linearly with elapsed minutes. Current values never increase and never go
//! below zero.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::models::JitterConfig;

pub const MS_PER_MINUTE: u64 = 60_000;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WaitEstimate {
    pub baseline_ahead: u32,
    pub baseline_wait: f64,
    pub current_ahead: u32,
    pub current_wait: f64,
    pub per_person: f64,
    pub started_at_ms: u64,
}

impl WaitEstimate {
    /// Estimate for a customer appended behind `waiting` tickets.
    pub fn join(avg_service_minutes: u32, waiting: u32, jitter_minutes: u32, now_ms: u64) -> Self {
        let estimated = avg_service_minutes
            .saturating_mul(waiting)
            .saturating_add(jitter_minutes) as f64;
        let per_person = if waiting > 0 {
            estimated / waiting as f64
        } else {
            0.0
        };

        Self {
            baseline_ahead: waiting,
            baseline_wait: estimated,
            current_ahead: waiting,
            current_wait: estimated,
            per_person,
            started_at_ms: now_ms,
        }
    }

    /// Recomputes position and wait from the baseline. Returns whether
    /// anything changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.per_person <= 0.0 {
            return false;
        }

        let elapsed = elapsed_minutes(self.started_at_ms, now_ms) as f64;
        let served = (elapsed / self.per_person).floor() as u32;
        let expected_ahead = self
            .baseline_ahead
            .saturating_sub(served)
            .min(self.current_ahead);
        let expected_wait = (self.baseline_wait - elapsed)
            .max(0.0)
            .min(self.current_wait);

        let mut changed = false;
        if expected_ahead != self.current_ahead {
            self.current_ahead = expected_ahead;
            changed = true;
        }
        if expected_wait != self.current_wait {
            self.current_wait = expected_wait;
            changed = true;
        }
        changed
    }

    /// Moves the customer forward by up to `places`. The baseline moves by
    /// the same amount so later ticks keep the gain. Returns the places
    /// actually skipped.
    pub fn skip_places(&mut self, places: u32) -> u32 {
        let skipped = places.min(self.current_ahead);
        let saved = skipped as f64 * self.per_person;

        self.current_ahead -= skipped;
        self.current_wait = (self.current_wait - saved).max(0.0);
        self.baseline_ahead = self.baseline_ahead.saturating_sub(skipped);
        self.baseline_wait = (self.baseline_wait - saved).max(0.0);
        skipped
    }

    /// 1-based place in line.
    pub fn position(&self) -> u32 {
        self.current_ahead + 1
    }

    pub fn wait_minutes(&self) -> u32 {
        self.current_wait.ceil() as u32
    }

    pub fn at_front(&self) -> bool {
        self.current_ahead == 0
    }
}

pub fn elapsed_minutes(since_ms: u64, now_ms: u64) -> u32 {
    (now_ms.saturating_sub(since_ms) / MS_PER_MINUTE) as u32
}

/// Random offset added to a fresh estimate. Disabled jitter always yields 0.
pub struct Jitter {
    rng: Option<StdRng>,
    max_minutes: u32,
}

impl Jitter {
    pub fn new(config: JitterConfig, seed: Option<u64>, max_minutes: u32) -> Self {
        let rng = match config {
            JitterConfig::Seeded => Some(StdRng::seed_from_u64(seed.unwrap_or(0))),
            JitterConfig::Off => None,
        };
        Self { rng, max_minutes }
    }

    pub fn off() -> Self {
        Self {
            rng: None,
            max_minutes: 0,
        }
    }

    pub fn draw(&mut self) -> u32 {
        match self.rng.as_mut() {
            Some(rng) => rng.gen_range(0..=self.max_minutes),
            None => 0,
        }
    }
}

/// One-shot projection: join behind `ahead`, optionally skip, then decay for
/// `minutes`.
pub fn project(
    avg_service_minutes: u32,
    ahead: u32,
    jitter_minutes: u32,
    skip: Option<u32>,
    minutes: u32,
) -> (WaitEstimate, WaitEstimate) {
    let joined = WaitEstimate::join(avg_service_minutes, ahead, jitter_minutes, 0);
    let mut projected = joined.clone();
    if let Some(places) = skip {
        projected.skip_places(places);
    }
    projected.tick(minutes as u64 * MS_PER_MINUTE);
    (joined, projected)
}
