pub use super::dishes::Entity as Dishes;
pub use super::questions::Entity as Questions;
pub use super::restaurants::Entity as Restaurants;
pub use super::training_sessions::Entity as TrainingSessions;
pub use super::users::Entity as Users;
