//! Integration tests for the dust console

mod config_integration;
mod console_session;
mod run_context;
