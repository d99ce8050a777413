//! Deterministic dispatch generator for demo mode.
//!
//! Seeded PRNG generation of realistic dispatch records. Two runs with
//! the same seed produce identical datasets, so demos and tests are
//! reproducible.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rand::prelude::IndexedRandom;
use rand_pcg::Pcg64;

use super::{Dispatch, DispatchStatus};

/// Workflow name stems (computational-science style).
const LATTICE_STEMS: &[&str] = &[
    "band-structure",
    "basis-set-scan",
    "charge-density",
    "docking-screen",
    "energy-surface",
    "ensemble-average",
    "feature-extraction",
    "geometry-relax",
    "hyperparameter-sweep",
    "md-equilibration",
    "monte-carlo",
    "orbital-analysis",
    "phonon-spectrum",
    "qaoa-optimize",
    "reaction-path",
    "spin-lattice",
    "trajectory-batch",
    "vqe-ground-state",
];

/// Workflow name qualifiers.
const LATTICE_QUALIFIERS: &[&str] = &[
    "prod", "dev", "test", "v2", "nightly", "large", "small", "retry",
];

/// How many dispatches a default demo dataset holds.
pub const DEFAULT_COUNT: usize = 47;

/// Deterministic dispatch generator.
pub struct Generator {
    rng: Pcg64,
    base_time: DateTime<Utc>,
}

impl Generator {
    /// Create a generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::new(seed.into(), 0x5851_f42d_4c95_7f2d),
            base_time: DateTime::from_timestamp(1_750_000_000, 0).unwrap_or_else(Utc::now),
        }
    }

    /// Generate `count` dispatches.
    pub fn dispatches(&mut self, count: usize) -> Vec<Dispatch> {
        (0..count).map(|i| self.dispatch(i)).collect()
    }

    fn dispatch(&mut self, index: usize) -> Dispatch {
        let status = self.status();
        let lattice_name = self.lattice_name(index);
        let dispatch_id = self.dispatch_id();

        let total_electrons = self.rng.random_range(2..=40);
        let completed_electrons = match status {
            DispatchStatus::NewObject => 0,
            DispatchStatus::Completed => total_electrons,
            _ => self.rng.random_range(0..total_electrons),
        };

        // Start times spread over the last two days, oldest first.
        let started_at = (status != DispatchStatus::NewObject).then(|| {
            let offset_secs = self.rng.random_range(0..=1800) + (index as i64) * 3600;
            self.base_time - TimeDelta::seconds(offset_secs)
        });

        let ended_at = match (status, started_at) {
            (s, Some(start)) if s.is_terminal() => {
                let run_secs = self.rng.random_range(30..=2700);
                Some(start + TimeDelta::seconds(run_secs))
            }
            _ => None,
        };

        Dispatch {
            dispatch_id,
            lattice_name,
            status,
            started_at,
            ended_at,
            total_electrons,
            completed_electrons,
        }
    }

    fn status(&mut self) -> DispatchStatus {
        // Weighted toward completed and running, the common states on a
        // busy server.
        let roll = self.rng.random_range(0..100u32);
        match roll {
            0..=44 => DispatchStatus::Completed,
            45..=69 => DispatchStatus::Running,
            70..=81 => DispatchStatus::Failed,
            82..=91 => DispatchStatus::NewObject,
            _ => DispatchStatus::Cancelled,
        }
    }

    fn lattice_name(&mut self, index: usize) -> String {
        let stem = LATTICE_STEMS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("workflow");
        let qualifier = LATTICE_QUALIFIERS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("run");
        format!("{stem}-{qualifier}-{index:03}")
    }

    /// UUID-shaped identifier from the seeded stream.
    fn dispatch_id(&mut self) -> String {
        let v: u128 = self.rng.random();
        let hex = format!("{v:032x}");
        format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    }
}
