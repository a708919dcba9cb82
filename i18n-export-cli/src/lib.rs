//! CLI library for testing purposes

pub mod host;
pub mod inputs;

pub use host::{HOST_ROOT_KEYS, PlanRow, build_registry, load_config, plan_rows};
pub use inputs::expand_inputs;
