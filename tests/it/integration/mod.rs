//! Integration tests for the playfield monitor.
//!
//! These tests verify the interaction between multiple components
//! and test complete workflows end-to-end.
