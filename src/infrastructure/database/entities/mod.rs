//! Database entities module

pub mod rating;
pub mod skill;
pub mod swap_request;
pub mod user;
pub mod user_skill_offered;
pub mod user_skill_wanted;

pub use rating::Entity as Rating;
pub use skill::Entity as Skill;
pub use swap_request::Entity as SwapRequest;
pub use user::Entity as User;
pub use user_skill_offered::Entity as UserSkillOffered;
pub use user_skill_wanted::Entity as UserSkillWanted;
