//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per server route. Redirects are not followed
//! so tests can assert on them.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

/// HTTP test client with cookie-based session management
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    /// Creates a new anonymous client
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true) // Automatically handle session cookies
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Creates a client logged in as the plain-password test user
    ///
    /// # Panics
    ///
    /// Panics if authentication fails (indicates test infrastructure problem).
    pub async fn authenticated(base_url: String) -> Self {
        let client = Self::new(base_url);

        let response = client.login(TEST_USER, TEST_PASS).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::SEE_OTHER,
            "Test user authentication failed: {:?}",
            response.text().await
        );

        client
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Pages
    // ========================================================================

    /// GET / - the catalog page
    pub async fn get_index(&self) -> Response {
        self.client
            .get(self.url("/"))
            .send()
            .await
            .expect("Index request failed")
    }

    /// GET /login - the login form
    pub async fn get_login(&self) -> Response {
        self.client
            .get(self.url("/login"))
            .send()
            .await
            .expect("Login page request failed")
    }

    /// POST /login with both form fields
    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.login_form(&[("username", username), ("password", password)])
            .await
    }

    /// POST /login with arbitrary form fields
    pub async fn login_form(&self, fields: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url("/login"))
            .form(fields)
            .send()
            .await
            .expect("Login request failed")
    }

    /// GET /logout
    pub async fn logout(&self) -> Response {
        self.client
            .get(self.url("/logout"))
            .send()
            .await
            .expect("Logout request failed")
    }

    // ========================================================================
    // JSON API
    // ========================================================================

    /// GET /v1/statics
    pub async fn get_statics(&self) -> Response {
        self.client
            .get(self.url("/v1/statics"))
            .send()
            .await
            .expect("Statics request failed")
    }

    /// GET /v1/categories
    pub async fn get_categories(&self) -> Response {
        self.client
            .get(self.url("/v1/categories"))
            .send()
            .await
            .expect("Categories request failed")
    }

    /// GET /v1/categories?q={query}
    pub async fn search_categories(&self, query: &str) -> Response {
        self.client
            .get(self.url("/v1/categories"))
            .query(&[("q", query)])
            .send()
            .await
            .expect("Category search request failed")
    }

    /// GET /v1/categories/{name}
    pub async fn get_category(&self, name: &str) -> Response {
        self.client
            .get(self.url(&format!("/v1/categories/{}", name)))
            .send()
            .await
            .expect("Category request failed")
    }
}
