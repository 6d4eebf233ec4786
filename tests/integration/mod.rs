//! Integration Tests Module
//!
//! End-to-end tests for tagmend: settings loading, analysis against a mock
//! provider server and merging into a mailbox snapshot.

// Settings file to provider configuration
mod config_test;

// Analysis through a real provider binding and a mock HTTP server
mod analysis_test;

// Pair construction and merge application on a snapshot
mod merge_test;
