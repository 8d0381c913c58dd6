// Common helpers for executing unit tests.
mod common;

// Individual conformance test modules.
mod copybooks;
mod data;
mod pipeline;
