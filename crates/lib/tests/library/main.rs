//! Library integration tests.

mod common;

mod binding_tests;
mod settings_tests;
