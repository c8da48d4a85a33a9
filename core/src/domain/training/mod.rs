pub mod entities;
pub mod ports;
pub mod scoring;
pub mod services;
pub mod value_objects;

pub use entities::{AnswerRecord, SessionDetails, SessionState, TrainingSession};
pub use ports::{TrainingService, TrainingSessionRepository};
pub use scoring::ScoringPolicy;
