//! Skill aggregate
//!
//! Skills are created lazily by name and shared between users.

pub mod model;
pub mod repository;

pub use model::{normalize_skill_name, normalize_skill_names, Skill, SkillId};
pub use repository::SkillRepository;
