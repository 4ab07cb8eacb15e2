//! Panel presentation coordination.
//!
//! # Responsibility
//! - Decide which single surface the content area shows.
//! - Distribute typed panel actions to views without coupling them to the
//!   coordinator.
//! - Produce render plans for the host overlay.
//!
//! # Invariants
//! - At most one surface is visible at any time.
//! - Every close path (backdrop, cancel, save, delete, navigation) goes
//!   through dismiss-all.

pub mod coordinator;
pub mod flags;
pub mod intent;
pub mod multiplexer;
pub mod navigation;
pub mod policy;
pub mod registry;
pub mod store;
