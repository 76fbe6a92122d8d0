//! User aggregate
//!
//! Contains the User entity, the profile read model, the creation DTO and
//! the repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use dto_create::CreateUserDto;
pub use model::{NewUser, User, UserId, UserProfile};
pub use repository::UserRepository;
