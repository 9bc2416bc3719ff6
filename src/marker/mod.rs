//! Residential location marker: a small house pictogram pasted at a projected point.

pub mod icon;
