//! HTTP client for end-to-end tests
//!
//! Wraps reqwest and provides methods for all library-server endpoints.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::{RequestBuilder, Response};
use serde_json::{json, Value};
use std::time::Duration;

/// HTTP test client carrying an optional bearer token
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    /// Access token sent as `Authorization: Bearer` when present
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl TestClient {
    /// Creates a new unauthenticated client
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            access_token: None,
            refresh_token: None,
        }
    }

    /// Creates a client that signed up and logged in as the test user
    ///
    /// # Panics
    ///
    /// Panics if signup or login fails (indicates test infrastructure problem).
    pub async fn authenticated(base_url: String) -> Self {
        Self::authenticated_as(base_url, TEST_USER, TEST_PASS).await
    }

    pub async fn authenticated_as(base_url: String, login: &str, password: &str) -> Self {
        let mut client = Self::new(base_url);

        let response = client.signup(login, password).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::CREATED,
            "Test user signup failed: {:?}",
            response.text().await
        );

        client.login_and_keep_tokens(login, password).await;
        client
    }

    /// Logs in and stores the returned token pair
    pub async fn login_and_keep_tokens(&mut self, login: &str, password: &str) {
        let response = self.login(login, password).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "Test user login failed"
        );
        let body: Value = response.json().await.expect("Login body is not JSON");
        self.access_token = body["accessToken"].as_str().map(str::to_string);
        self.refresh_token = body["refreshToken"].as_str().map(str::to_string);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Response {
        self.with_auth(builder)
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Generic Requests
    // ========================================================================

    pub async fn get(&self, path: &str) -> Response {
        self.send(self.client.get(self.url(path))).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    pub async fn post_empty(&self, path: &str) -> Response {
        self.send(self.client.post(self.url(path))).await
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> Response {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.send(self.client.delete(self.url(path))).await
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    pub async fn signup(&self, login: &str, password: &str) -> Response {
        self.post_json("/auth/signup", &json!({"login": login, "password": password}))
            .await
    }

    pub async fn login(&self, login: &str, password: &str) -> Response {
        self.post_json("/auth/login", &json!({"login": login, "password": password}))
            .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Response {
        self.post_json("/auth/refresh", &json!({"refreshToken": refresh_token}))
            .await
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn get_users(&self) -> Response {
        self.get("/user").await
    }

    pub async fn get_user(&self, id: &str) -> Response {
        self.get(&format!("/user/{}", id)).await
    }

    pub async fn create_user(&self, login: &str, password: &str) -> Response {
        self.post_json("/user", &json!({"login": login, "password": password}))
            .await
    }

    pub async fn update_password(&self, id: &str, old: &str, new: &str) -> Response {
        self.put_json(
            &format!("/user/{}", id),
            &json!({"oldPassword": old, "newPassword": new}),
        )
        .await
    }

    pub async fn delete_user(&self, id: &str) -> Response {
        self.delete(&format!("/user/{}", id)).await
    }

    // ========================================================================
    // Artists
    // ========================================================================

    pub async fn get_artists(&self) -> Response {
        self.get("/artist").await
    }

    pub async fn get_artist(&self, id: &str) -> Response {
        self.get(&format!("/artist/{}", id)).await
    }

    pub async fn create_artist(&self, name: &str, grammy: bool) -> Response {
        self.post_json("/artist", &json!({"name": name, "grammy": grammy}))
            .await
    }

    pub async fn update_artist(&self, id: &str, name: &str, grammy: bool) -> Response {
        self.put_json(
            &format!("/artist/{}", id),
            &json!({"name": name, "grammy": grammy}),
        )
        .await
    }

    pub async fn delete_artist(&self, id: &str) -> Response {
        self.delete(&format!("/artist/{}", id)).await
    }

    // ========================================================================
    // Albums
    // ========================================================================

    pub async fn get_albums(&self) -> Response {
        self.get("/album").await
    }

    pub async fn get_album(&self, id: &str) -> Response {
        self.get(&format!("/album/{}", id)).await
    }

    pub async fn create_album(&self, name: &str, year: i64, artist_id: Option<&str>) -> Response {
        self.post_json(
            "/album",
            &json!({"name": name, "year": year, "artistId": artist_id}),
        )
        .await
    }

    pub async fn update_album(
        &self,
        id: &str,
        name: &str,
        year: i64,
        artist_id: Option<&str>,
    ) -> Response {
        self.put_json(
            &format!("/album/{}", id),
            &json!({"name": name, "year": year, "artistId": artist_id}),
        )
        .await
    }

    pub async fn delete_album(&self, id: &str) -> Response {
        self.delete(&format!("/album/{}", id)).await
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    pub async fn get_tracks(&self) -> Response {
        self.get("/track").await
    }

    pub async fn get_track(&self, id: &str) -> Response {
        self.get(&format!("/track/{}", id)).await
    }

    pub async fn create_track(
        &self,
        name: &str,
        artist_id: Option<&str>,
        album_id: Option<&str>,
        duration: i64,
    ) -> Response {
        self.post_json(
            "/track",
            &json!({
                "name": name,
                "artistId": artist_id,
                "albumId": album_id,
                "duration": duration
            }),
        )
        .await
    }

    pub async fn delete_track(&self, id: &str) -> Response {
        self.delete(&format!("/track/{}", id)).await
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    pub async fn get_favorites(&self) -> Response {
        self.get("/favs").await
    }

    /// `kind` is one of `artist`, `album`, `track`
    pub async fn add_favorite(&self, kind: &str, id: &str) -> Response {
        self.post_empty(&format!("/favs/{}/{}", kind, id)).await
    }

    pub async fn remove_favorite(&self, kind: &str, id: &str) -> Response {
        self.delete(&format!("/favs/{}/{}", kind, id)).await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Asserts a 201 and returns the `id` of the created entity
    pub async fn created_id(response: Response) -> String {
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Created body is not JSON");
        body["id"]
            .as_str()
            .expect("Created entity has no id")
            .to_string()
    }
}
