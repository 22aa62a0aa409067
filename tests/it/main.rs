//! Single test binary entry point.
//!
//! This consolidates all tests into a single binary following matklad's best practices,
//! reducing linking overhead from Nx to 1x.
//!
//! Structure:
//! - helpers: Builders and mock canvas items
//! - integration: Multi-component workflow tests
//! - unit: Single-component unit tests

mod integration;
