//! ReportMate · evaluation comment (평어) backend.
//!
//! The heart of the crate is [`generator`]: a pure, reproducible selection of
//! one template sentence per evaluation area. Everything else is the service
//! shell around it (in-memory classroom store, axum routes, telemetry).

pub mod config;
pub mod domain;
pub mod error;
pub mod generator;
pub mod logic;
pub mod protocol;
pub mod routes;
pub mod seeds;
pub mod state;
pub mod telemetry;
pub mod util;

pub use generator::{generate_comment, select_index, GenerateOptions};
