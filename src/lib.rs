//! Smoke-test runner for the meal battle API: drives the service through a
//! fixed scenario of HTTP calls and aborts on the first response that is
//! missing its success marker.

pub mod asserter;
pub mod cli;
pub mod config;
pub mod outputter;
pub mod runner;
pub mod scenario;
