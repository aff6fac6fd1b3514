//! Small helpers shared by the data and service layers.

pub mod budget;
pub mod parse;
