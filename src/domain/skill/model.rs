//! Skill domain entity

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

pub type SkillId = i32;

/// A named skill. Names are stored lowercase and are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
}

/// Canonical form of a skill name: surrounding whitespace removed, lowercase.
pub fn normalize_skill_name(raw: &str) -> DomainResult<String> {
    let name = raw.trim().to_lowercase();
    if name.is_empty() {
        return Err(DomainError::Validation(
            "Skill name cannot be empty".into(),
        ));
    }
    Ok(name)
}

/// Normalize a list of names, collapsing duplicates while keeping the
/// order in which each name first appeared.
pub fn normalize_skill_names<I, S>(raw: I) -> DomainResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = Vec::new();
    for item in raw {
        let name = normalize_skill_name(item.as_ref())?;
        if !names.contains(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize_skill_name("  Cooking ").unwrap(), "cooking");
        assert_eq!(normalize_skill_name("RUST").unwrap(), "rust");
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = normalize_skill_name("   ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn case_variants_collapse_to_one() {
        let names = normalize_skill_names(["Cooking", "cooking", "Guitar", "COOKING"]).unwrap();
        assert_eq!(names, vec!["cooking".to_string(), "guitar".to_string()]);
    }

    #[test]
    fn empty_list_is_fine() {
        let names = normalize_skill_names(Vec::<String>::new()).unwrap();
        assert!(names.is_empty());
    }
}
