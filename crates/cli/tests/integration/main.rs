//! CLI integration tests against a shared fixture description.

mod common;

mod inspect_tests;
mod resolve_tests;
mod settings_tests;
