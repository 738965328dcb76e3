//! Test helpers for integration tests
//!
//! Spawns a server on an ephemeral port and drives it with a client that
//! does not follow redirects, so `302 Found` answers can be asserted.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, redirect, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use warbler_api::{create_app, create_app_state};
use warbler_common::AppConfig;

use crate::fixtures::{CurrentUser, SignupForm};

pub const TEST_SECRET: &str = "integration-test-secret-key";

/// A signed-in client identity
#[derive(Debug, Clone)]
pub struct TestSession {
    /// `name=value` pair to send in the `Cookie` header
    pub cookie: String,
    pub user_id: String,
    pub username: String,
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    cookie_name: String,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server backed by in-memory storage and sessions
    pub async fn start() -> Result<Self> {
        Self::start_with_config(AppConfig::in_memory(TEST_SECRET)).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let cookie_name = config.session.cookie_name.clone();
        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            cookie_name,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make an anonymous GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request carrying the session cookie
    pub async fn get_auth(&self, path: &str, session: &TestSession) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header(header::COOKIE, &session.cookie)
            .send()
            .await?)
    }

    /// Make an anonymous form POST
    pub async fn post_form<T: Serialize + ?Sized>(&self, path: &str, form: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).form(form).send().await?)
    }

    /// Make an anonymous POST with no body
    pub async fn post(&self, path: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).send().await?)
    }

    /// Make a form POST carrying the session cookie
    pub async fn post_form_auth<T: Serialize + ?Sized>(
        &self,
        path: &str,
        session: &TestSession,
        form: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header(header::COOKIE, &session.cookie)
            .form(form)
            .send()
            .await?)
    }

    /// Make a bodiless POST carrying the session cookie
    pub async fn post_auth(&self, path: &str, session: &TestSession) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header(header::COOKIE, &session.cookie)
            .send()
            .await?)
    }

    /// Sign up a fresh account and return its session
    pub async fn signup(&self) -> Result<TestSession> {
        let form = SignupForm::unique();
        let response = self.post_form("/signup", &form).await?;
        self.session_from(response, &form.username).await
    }

    /// Log in with existing credentials
    pub async fn login(&self, username: &str, password: &str) -> Result<TestSession> {
        let response = self
            .post_form("/login", &[("username", username), ("password", password)])
            .await?;
        self.session_from(response, username).await
    }

    async fn session_from(&self, response: Response, username: &str) -> Result<TestSession> {
        let location = assert_redirect(&response, "/")?;
        anyhow::ensure!(location == "/", "unexpected redirect to {location}");

        let cookie = self
            .session_cookie(&response)
            .context("response did not set the session cookie")?;

        let mut session = TestSession {
            cookie,
            user_id: String::new(),
            username: username.to_string(),
        };
        let me: CurrentUser =
            assert_json(self.get_auth("/users/@me", &session).await?, StatusCode::OK).await?;
        session.user_id = me.id;
        Ok(session)
    }

    /// The `name=value` part of the session `Set-Cookie` header
    pub fn session_cookie(&self, response: &Response) -> Option<String> {
        let prefix = format!("{}=", self.cookie_name);
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter(|v| v.starts_with(&prefix))
            .filter_map(|v| v.split(';').next())
            .map(str::to_owned)
            .next()
    }
}

/// Assert a `302 Found` and return its `Location`
pub fn assert_redirect(response: &Response, expected_prefix: &str) -> Result<String> {
    anyhow::ensure!(
        response.status() == StatusCode::FOUND,
        "Expected status 302, got {}",
        response.status()
    );
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .context("redirect without a Location header")?
        .to_string();
    anyhow::ensure!(
        location.starts_with(expected_prefix),
        "Expected redirect to {expected_prefix}, got {location}"
    );
    Ok(location)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
