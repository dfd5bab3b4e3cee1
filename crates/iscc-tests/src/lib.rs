//! Integration tests for the ISCC workspace.
//!
//! This crate provides:
//! - Deterministic input fixtures shared by the integration tests
//! - Published conformance vectors for the generators and the codec

pub mod fixtures;
pub mod vectors;
