//! Integration tests

mod concurrency_tests;
mod lifecycle_tests;
mod registry_invariant_tests;
