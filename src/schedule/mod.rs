//! Outer run loop: repeat cycles, pick the next delay, stop on shutdown.

pub mod runner;
