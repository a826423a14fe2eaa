//! Unit tests for dockfinder configuration types.
//!
//! This module contains tests organised into:
//! - [`helpers`] - Shared fixtures and helper functions
//! - [`types_tests`] - Basic type and serialisation tests
//! - [`validation`] - Section validation and normalisation tests
//! - [`layer_precedence_tests`] - `MergeComposer` layer precedence tests

mod helpers;
