// src/data_output/mod.rs

pub mod trajectory_writer;
