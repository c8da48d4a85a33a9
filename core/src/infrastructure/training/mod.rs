pub mod mappers;
pub mod repositories;

pub use repositories::training_session_repository::SqlTrainingSessionRepository;
