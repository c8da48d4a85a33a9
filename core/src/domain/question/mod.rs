pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Difficulty, Question};
pub use ports::{QuestionRepository, QuestionService};
