use serde::{Deserialize, Serialize};

use super::error::AppError;

/// Application-owned display record.
///
/// `id` equals the corresponding [`super::user::User`] id by convention at
/// creation time; uniqueness is delegated to the remote data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
}

impl Profile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Checks entity invariants in fixed order, first violation wins.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.id.is_empty() {
            return Err(AppError::validation("id", "id is required"));
        }
        if self.name.is_empty() {
            return Err(AppError::validation("name", "name is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_profile_passes() {
        let profile = Profile::new("u1", "Alice");
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn empty_id_fails_on_id_field() {
        let profile = Profile::new("", "Alice");
        let err = profile.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "id", .. }));
    }

    #[test]
    fn empty_id_wins_over_empty_name() {
        // Both fields empty: the id check runs first and stops validation.
        let profile = Profile::new("", "");
        let err = profile.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "id", .. }));
    }

    #[test]
    fn empty_name_fails_on_name_field() {
        let profile = Profile::new("u1", "");
        let err = profile.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "name", .. }));
    }
}
