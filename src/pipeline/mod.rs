pub mod pipeline;
pub mod builder;
pub mod director;
pub mod config;

pub use pipeline::{Experiment, ExperimentInfo, ExperimentOutcome};
pub use builder::ExperimentBuilder;
pub use director::ExperimentDirector;
pub use config::{ExperimentConfig, SplitConfig};
