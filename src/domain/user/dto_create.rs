/// Raw input for registering a user, before validation.
#[derive(Debug, Clone, Default)]
pub struct CreateUserDto {
    pub name: Option<String>,
    pub location: Option<String>,
    pub profile_photo: Option<String>,
    pub availability: Option<String>,
    pub is_public: Option<bool>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
}
