//! FFI boundary crate for the Unforgotten mobile shell.
//!
//! All exported functions live in [`api`]; FRB codegen reads that module.

pub mod api;
