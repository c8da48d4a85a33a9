pub mod common;
pub mod dish;
pub mod question;
pub mod restaurant;
pub mod stats;
pub mod training;
pub mod user;
