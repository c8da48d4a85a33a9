pub mod dish_repository;
