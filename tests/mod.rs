//! Integration tests for PopcornTUI
//!
//! Tests are organized by component:
//! - omdb_test: OMDb client (search, lookup, error mapping, cancellation)
//! - app_flow_test: Search, selection and watched-list flows through the app shell
//! - ui_test: Full-frame rendering against a TestBackend
//! - cli_test: Subcommand parsing and exit codes

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
