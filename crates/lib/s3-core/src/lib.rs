//! Core types and services for s3-mcp.
//!
//! This crate owns the object storage seam, the `aws-sdk-s3` backed store and
//! an in-memory double, and the control plane that turns tool requests into
//! single storage calls.

pub mod control;
pub mod models;
pub mod store;
