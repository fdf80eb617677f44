//! Host-side integration test entry point.
//!
//! Single test binary: shared mocks live in [`mock_hw`], the scenarios in
//! [`monitor_service_tests`].

mod mock_hw;
mod monitor_service_tests;
