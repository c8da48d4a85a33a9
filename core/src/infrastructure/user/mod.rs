pub mod mappers;
pub mod repositories;

pub use repositories::user_repository::SqlUserRepository;
