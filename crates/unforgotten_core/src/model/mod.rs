//! Presentation-facing domain model.
//!
//! # Responsibility
//! - Define typed references to repository-owned entities.
//! - Define the closed set of panel surfaces and the active-panel value.
//!
//! # Invariants
//! - Domain entities are referenced by stable `EntityId`, never copied.
//! - "Which panel is open" is a single `ActivePanel` value.

pub mod entity;
pub mod member;
pub mod panel;
