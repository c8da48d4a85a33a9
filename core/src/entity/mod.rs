//! Table definitions for the five relations of the training store.

pub mod prelude;

pub mod dishes;
pub mod questions;
pub mod restaurants;
pub mod training_sessions;
pub mod users;
