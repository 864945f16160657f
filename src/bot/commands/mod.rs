//! Discord command implementations organized by category.

/// General utility commands
pub mod general;

/// Pipeline board, moves, reminders, and dashboard
pub mod pipeline;

/// Product catalog management commands
pub mod product;

/// Reviewer voting commands
pub mod vote;

// Export commands
pub use general::*;
pub use pipeline::*;
pub use product::*;
pub use vote::*;
