//! Core library for the application tracking service: the fixed technical
//! workflow, the append-only audit log, and the transition policy that decides
//! which actor may move an application to which status.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracking;
