//! API handlers module

pub mod datasets;
pub mod health;
