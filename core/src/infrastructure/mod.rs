pub mod consistency;
pub mod db;
pub mod dish;
pub mod question;
pub mod restaurant;
pub mod training;
pub mod user;
