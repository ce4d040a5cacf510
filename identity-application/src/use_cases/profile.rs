use serde::{Deserialize, Serialize};

use identity_core::{AppError, Profile, ProfileRepository};

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
        }
    }
}

/// Profile use cases: each is a single linear pipeline of
/// validate, persist or fetch, project.
pub struct ProfileUsecase<P>
where
    P: ProfileRepository,
{
    profile_repo: P,
}

impl<P> ProfileUsecase<P>
where
    P: ProfileRepository,
{
    pub fn new(profile_repo: P) -> Self {
        Self { profile_repo }
    }

    #[tracing::instrument(name = "ProfileUsecase::get_profile", skip(self))]
    pub async fn get_profile(&self, id: &str) -> Result<ProfileResponse, AppError> {
        let profile = self.profile_repo.get_by_id(id).await?;
        Ok(profile.into())
    }

    /// Validates the new entity before any remote call is made.
    #[tracing::instrument(name = "ProfileUsecase::create_profile", skip(self, request), fields(id = %request.id))]
    pub async fn create_profile(
        &self,
        request: CreateProfileRequest,
    ) -> Result<ProfileResponse, AppError> {
        let profile = Profile::new(request.id, request.name);
        profile.validate()?;

        let created = self.profile_repo.create(&profile).await?;
        Ok(created.into())
    }

    /// Fetches the current row first so a missing profile surfaces as
    /// `NOT_FOUND` before anything is written, then mutates only the name.
    #[tracing::instrument(name = "ProfileUsecase::update_profile", skip(self, request))]
    pub async fn update_profile(
        &self,
        id: &str,
        request: UpdateProfileRequest,
    ) -> Result<ProfileResponse, AppError> {
        let mut profile = self.profile_repo.get_by_id(id).await?;

        profile.name = request.name;
        profile.validate()?;

        self.profile_repo.update(&profile).await?;
        Ok(profile.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Mock profile store recording per-operation call counts.
    #[derive(Default)]
    struct MockProfileRepository {
        existing: Option<Profile>,
        get_calls: AtomicUsize,
        create_calls: AtomicUsize,
        update_calls: AtomicUsize,
    }

    #[async_trait]
    impl ProfileRepository for &MockProfileRepository {
        async fn get_by_id(&self, id: &str) -> Result<Profile, AppError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            match &self.existing {
                Some(profile) if profile.id == id => Ok(profile.clone()),
                _ => Err(AppError::not_found("profile not found")),
            }
        }

        async fn create(&self, profile: &Profile) -> Result<Profile, AppError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            Ok(profile.clone())
        }

        async fn update(&self, _profile: &Profile) -> Result<(), AppError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn create_profile_with_empty_name_performs_no_remote_call() {
        let repo = MockProfileRepository::default();
        let usecase = ProfileUsecase::new(&repo);

        let err = usecase
            .create_profile(CreateProfileRequest {
                id: "u1".to_string(),
                name: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { field: "name", .. }));
        assert_eq!(repo.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_profile_persists_and_projects() {
        let repo = MockProfileRepository::default();
        let usecase = ProfileUsecase::new(&repo);

        let response = usecase
            .create_profile(CreateProfileRequest {
                id: "u1".to_string(),
                name: "Alice".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            response,
            ProfileResponse {
                id: "u1".to_string(),
                name: "Alice".to_string(),
            }
        );
        assert_eq!(repo.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn get_profile_passes_not_found_through() {
        let repo = MockProfileRepository::default();
        let usecase = ProfileUsecase::new(&repo);

        let err = usecase.get_profile("missing").await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_profile_with_empty_name_fetches_but_never_patches() {
        let repo = MockProfileRepository {
            existing: Some(Profile::new("id1", "Alice")),
            ..Default::default()
        };
        let usecase = ProfileUsecase::new(&repo);

        let err = usecase
            .update_profile(
                "id1",
                UpdateProfileRequest {
                    name: String::new(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { field: "name", .. }));
        assert_eq!(repo.get_calls.load(Ordering::SeqCst), 1);
        assert_eq!(repo.update_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_profile_on_missing_row_surfaces_not_found_before_writing() {
        let repo = MockProfileRepository::default();
        let usecase = ProfileUsecase::new(&repo);

        let err = usecase
            .update_profile(
                "missing",
                UpdateProfileRequest {
                    name: "Bob".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(repo.update_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_profile_mutates_only_the_name() {
        let repo = MockProfileRepository {
            existing: Some(Profile::new("id1", "Alice")),
            ..Default::default()
        };
        let usecase = ProfileUsecase::new(&repo);

        let response = usecase
            .update_profile(
                "id1",
                UpdateProfileRequest {
                    name: "Bob".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(
            response,
            ProfileResponse {
                id: "id1".to_string(),
                name: "Bob".to_string(),
            }
        );
        assert_eq!(repo.update_calls.load(Ordering::SeqCst), 1);
    }
}
