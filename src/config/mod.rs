//! Settings snapshot: YAML file plus environment overrides.

pub mod settings;
