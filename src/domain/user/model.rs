//! User domain entity

use super::CreateUserDto;
use crate::domain::skill::normalize_skill_names;
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

pub type UserId = i32;

/// Directory member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub location: Option<String>,
    /// URL or file path
    pub profile_photo: Option<String>,
    /// Free text, e.g. "weekends, evenings"
    pub availability: Option<String>,
    pub is_public: bool,
}

impl User {
    /// Private profiles are never shown to anyone. There is no notion of
    /// an owner that could be exempted.
    pub fn ensure_visible(&self) -> DomainResult<()> {
        if self.is_public {
            Ok(())
        } else {
            Err(DomainError::Forbidden("Profile is private".into()))
        }
    }
}

/// User together with skill names derived from the association tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
}

/// A validated user ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub location: Option<String>,
    pub profile_photo: Option<String>,
    pub availability: Option<String>,
    pub is_public: bool,
    /// Normalized, duplicate-free
    pub skills_offered: Vec<String>,
    /// Normalized, duplicate-free
    pub skills_wanted: Vec<String>,
}

impl TryFrom<CreateUserDto> for NewUser {
    type Error = DomainError;

    fn try_from(dto: CreateUserDto) -> Result<Self, Self::Error> {
        let name = dto
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DomainError::Validation("Name is required".into()))?
            .to_string();

        Ok(Self {
            name,
            location: dto.location,
            profile_photo: dto.profile_photo,
            availability: dto.availability,
            is_public: dto.is_public.unwrap_or(true),
            skills_offered: normalize_skill_names(&dto.skills_offered)?,
            skills_wanted: normalize_skill_names(&dto.skills_wanted)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: Option<&str>) -> CreateUserDto {
        CreateUserDto {
            name: name.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn missing_name_is_rejected() {
        assert!(matches!(
            NewUser::try_from(dto(None)),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            NewUser::try_from(dto(Some("   "))),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn defaults_to_public() {
        let user = NewUser::try_from(dto(Some("Ada"))).unwrap();
        assert!(user.is_public);
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn skill_lists_are_normalized() {
        let input = CreateUserDto {
            name: Some("Ada".into()),
            skills_offered: vec!["Cooking".into(), "cooking".into()],
            skills_wanted: vec![" Chess".into()],
            ..Default::default()
        };
        let user = NewUser::try_from(input).unwrap();
        assert_eq!(user.skills_offered, vec!["cooking"]);
        assert_eq!(user.skills_wanted, vec!["chess"]);
    }

    #[test]
    fn private_user_is_not_visible() {
        let user = User {
            id: 1,
            name: "Ada".into(),
            location: None,
            profile_photo: None,
            availability: None,
            is_public: false,
        };
        assert!(matches!(user.ensure_visible(), Err(DomainError::Forbidden(_))));
    }
}
