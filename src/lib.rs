//! Rigor - Statistical rigor auditor for TSP heuristic benchmark results
//!
//! This library provides the statistical enforcement core (effect sizes,
//! rank tests, bootstrap CIs, power analysis), the Johnson compliance
//! audit, and the loading/reporting glue around precomputed benchmark
//! results. It never runs a solver.

pub mod audit;
pub mod benchmark;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod dataset;
pub mod enforcement;
pub mod html_output;
pub mod json_output;
pub mod machine;
pub mod normalize;
pub mod optima;
pub mod pipeline;
pub mod summary;
pub mod tsplib;
