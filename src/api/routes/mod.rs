//! API Routes
//!
//! Route handlers organized by functionality.

pub mod counter;
pub mod favorites;
pub mod health;
pub mod store;
