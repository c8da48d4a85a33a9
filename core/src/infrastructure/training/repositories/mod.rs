pub mod training_session_repository;
