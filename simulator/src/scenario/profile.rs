use anyhow::Context;
use mineguardcore::report::WireMetrics;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Baseline metrics emitted by the stand-in pipeline. A jitter fraction is
/// applied per job so repeated runs look like distinct inspections.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioProfile {
    pub illegal_area_m2: f64,
    pub volume_m3: f64,
    pub avg_depth_m: f64,
    /// Cubic metres hauled per truckload when deriving the impact count.
    pub truckload_capacity_m3: f64,
    /// Fraction of each baseline metric used as symmetric jitter, 0.0..=0.9.
    pub jitter: f64,
    /// Every Nth job reports zero volume and therefore carries no 3D model.
    /// Zero disables the behaviour.
    pub zero_volume_every: u64,
}

impl Default for ScenarioProfile {
    fn default() -> Self {
        Self {
            illegal_area_m2: 500.0,
            volume_m3: 1200.0,
            avg_depth_m: 3.5,
            truckload_capacity_m3: 15.0,
            jitter: 0.2,
            zero_volume_every: 4,
        }
    }
}

impl ScenarioProfile {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scenario {}", path_ref.display()))?;
        let profile: ScenarioProfile = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scenario {}", path_ref.display()))?;
        Ok(profile)
    }
}

/// Deterministic metrics and job-id source backed by a seeded PRNG.
pub struct MetricsGenerator {
    profile: ScenarioProfile,
    rng: StdRng,
    produced: u64,
}

impl MetricsGenerator {
    pub fn new(profile: ScenarioProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
            produced: 0,
        }
    }

    /// Short opaque identifier, matching the service's 8-character job ids.
    pub fn next_job_id(&mut self) -> String {
        format!("{:08x}", self.rng.gen::<u32>())
    }

    pub fn next_metrics(&mut self) -> WireMetrics {
        self.produced += 1;
        if self.profile.zero_volume_every > 0 && self.produced % self.profile.zero_volume_every == 0
        {
            return WireMetrics {
                illegal_area_m2: Some(0.0),
                volume_m3: Some(0.0),
                avg_depth_m: Some(0.0),
                truckloads: Some(0.0),
            };
        }

        let area = self.jittered(self.profile.illegal_area_m2);
        let volume = self.jittered(self.profile.volume_m3);
        let depth = self.jittered(self.profile.avg_depth_m);
        let truckloads = (volume / self.profile.truckload_capacity_m3.max(1.0)).round();

        WireMetrics {
            illegal_area_m2: Some(area),
            volume_m3: Some(volume),
            avg_depth_m: Some(depth),
            truckloads: Some(truckloads),
        }
    }

    fn jittered(&mut self, base: f64) -> f64 {
        let jitter = self.profile.jitter.clamp(0.0, 0.9);
        base * self.rng.gen_range(1.0 - jitter..=1.0 + jitter)
    }
}
