// src/data_input/mod.rs

pub mod file_discovery;
pub mod trajectory;
pub mod trajectory_parser;

// src/data_input/mod.rs
