//! Integration tests for docuprox-batch
//!
//! These tests run the node with the real reqwest transport against a local mock of the
//! DocuProx API.

pub mod cli_tests;
pub mod config_tests;
pub mod node_tests;
