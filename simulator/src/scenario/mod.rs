pub mod profile;

pub use profile::{MetricsGenerator, ScenarioProfile};
