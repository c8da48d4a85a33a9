pub mod mappers;
pub mod repositories;

pub use repositories::question_repository::SqlQuestionRepository;
