use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use identity_core::{AppError, Profile, ProfileRepository};

use crate::config::SupabaseConfig;
use crate::supabase::identity::APIKEY_HEADER;

/// Profile record adapter speaking to the Supabase REST (PostgREST) API.
pub struct SupabaseProfileRepository {
    http_client: Client,
    config: SupabaseConfig,
}

impl SupabaseProfileRepository {
    pub fn new(config: SupabaseConfig, http_client: Client) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl ProfileRepository for SupabaseProfileRepository {
    #[tracing::instrument(name = "Fetching profile from Supabase", skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Profile, AppError> {
        let url = format!("{}/rest/v1/profiles?id=eq.{}", self.config.base_url, id);

        let response = self
            .http_client
            .get(url)
            .header(APIKEY_HEADER, self.config.anon_key.expose_secret())
            .bearer_auth(self.config.anon_key.expose_secret())
            .send()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to execute request: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to read response: {e}")))?;

        if status != StatusCode::OK {
            return Err(AppError::unexpected(format!(
                "find profile failed with status {status}: {body}"
            )));
        }

        let rows: Vec<ProfileRow> = serde_json::from_str(&body)
            .map_err(|e| AppError::unexpected(format!("failed to parse response: {e}")))?;

        // Id uniqueness is the store's concern; the first row wins.
        match rows.into_iter().next() {
            Some(row) => Ok(row.into()),
            None => Err(AppError::not_found("profile not found")),
        }
    }

    #[tracing::instrument(name = "Creating profile in Supabase", skip_all, fields(id = %profile.id))]
    async fn create(&self, profile: &Profile) -> Result<Profile, AppError> {
        let url = format!("{}/rest/v1/profiles", self.config.base_url);
        let request_body = ProfileWriteBody {
            id: Some(&profile.id),
            name: &profile.name,
        };

        let response = self
            .http_client
            .post(url)
            .header(APIKEY_HEADER, self.config.anon_key.expose_secret())
            .bearer_auth(self.config.anon_key.expose_secret())
            // PostgREST echoes the inserted rows back with this header.
            .header("Prefer", "return=representation")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to execute request: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to read response: {e}")))?;

        if status != StatusCode::CREATED {
            return Err(AppError::unexpected(format!(
                "create profile failed with status {status}: {body}"
            )));
        }

        let rows: Vec<ProfileRow> = serde_json::from_str(&body)
            .map_err(|e| AppError::unexpected(format!("failed to parse response: {e}")))?;

        // An HTTP success with no representation is still a failure; an
        // empty Profile must never masquerade as a created row.
        match rows.into_iter().next() {
            Some(row) => Ok(row.into()),
            None => Err(AppError::unexpected(
                "no profile returned from create operation",
            )),
        }
    }

    #[tracing::instrument(name = "Updating profile in Supabase", skip_all, fields(id = %profile.id))]
    async fn update(&self, profile: &Profile) -> Result<(), AppError> {
        let url = format!(
            "{}/rest/v1/profiles?id=eq.{}",
            self.config.base_url, profile.id
        );
        let request_body = ProfileWriteBody {
            id: None,
            name: &profile.name,
        };

        let response = self
            .http_client
            .patch(url)
            .header(APIKEY_HEADER, self.config.anon_key.expose_secret())
            .bearer_auth(self.config.anon_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::unexpected(format!("failed to execute request: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
            let body = response
                .text()
                .await
                .map_err(|e| AppError::unexpected(format!("failed to read response: {e}")))?;
            return Err(AppError::unexpected(format!(
                "update profile failed with status {status}: {body}"
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ProfileWriteBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile::new(row.id, row.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repository(server: &MockServer) -> SupabaseProfileRepository {
        let config = SupabaseConfig {
            base_url: server.uri(),
            service_role_key: Secret::new("service-role-key".to_string()),
            anon_key: Secret::new("anon-key".to_string()),
        };
        SupabaseProfileRepository::new(config, Client::new())
    }

    #[tokio::test]
    async fn get_by_id_returns_first_matching_row() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .and(query_param("id", "eq.u1"))
            .and(header(APIKEY_HEADER, "anon-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": "u1", "name": "Alice"}])),
            )
            .mount(&server)
            .await;

        let profile = repository(&server).get_by_id("u1").await.unwrap();

        assert_eq!(profile, Profile::new("u1", "Alice"));
    }

    #[tokio::test]
    async fn get_by_id_with_zero_rows_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = repository(&server).get_by_id("missing").await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn get_by_id_surfaces_non_200_as_opaque() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let err = repository(&server).get_by_id("u1").await.unwrap_err();

        assert!(matches!(err, AppError::Unexpected(_)));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn create_requires_201_with_a_returned_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/profiles"))
            .and(header("Prefer", "return=representation"))
            .and(body_json(json!({"id": "u1", "name": "Alice"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!([{"id": "u1", "name": "Alice"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let created = repository(&server)
            .create(&Profile::new("u1", "Alice"))
            .await
            .unwrap();

        assert_eq!(created, Profile::new("u1", "Alice"));
    }

    #[tokio::test]
    async fn create_with_empty_representation_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = repository(&server)
            .create(&Profile::new("u1", "Alice"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unexpected(_)));
        assert!(err.to_string().contains("no profile returned"));
    }

    #[tokio::test]
    async fn create_rejects_non_201_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(409).set_body_string("duplicate key"))
            .mount(&server)
            .await;

        let err = repository(&server)
            .create(&Profile::new("u1", "Alice"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("409"));
    }

    #[tokio::test]
    async fn update_patches_only_the_name() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/profiles"))
            .and(query_param("id", "eq.u1"))
            .and(body_json(json!({"name": "Bob"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        assert!(
            repository(&server)
                .update(&Profile::new("u1", "Bob"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn update_accepts_200_as_well() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(
            repository(&server)
                .update(&Profile::new("u1", "Bob"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn update_surfaces_other_statuses_as_opaque() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/profiles"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = repository(&server)
            .update(&Profile::new("u1", "Bob"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unexpected(_)));
    }
}
