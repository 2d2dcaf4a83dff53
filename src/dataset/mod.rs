// src/dataset/mod.rs

pub mod aggregator;
pub mod bundle;
