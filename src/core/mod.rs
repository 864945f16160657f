//! Core business logic - framework-agnostic catalog, pricing, pipeline,
//! voting, and reporting operations.

/// Code and version derivation, product kinds
pub mod catalog;

/// Kanban grouping, status moves, reminders
pub mod pipeline;

/// Cost computation and price suggestions
pub mod pricing;

/// Product drafts, CRUD, cloning, filtering
pub mod product;

/// Dashboard indicators and display formatting
pub mod report;

/// Reviewer votes and unanimity
pub mod vote;
