pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Dish, DishMedia, Ingredient};
pub use ports::{DishRepository, DishService};
