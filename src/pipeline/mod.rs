//! One fetch → composite → persist → deliver cycle.

pub mod cycle;
