//! Stubbed authentication.
//!
//! Every call resolves to the same demo identity, whatever credentials are
//! passed in.

use chrono::{DateTime, TimeZone, Utc};
use mock_core::Response;
use mock_query::Latency;
use serde::Serialize;
use uuid::Uuid;

pub const DEMO_USER_ID: Uuid = Uuid::from_u128(0x5d1e_a7c3_8b2f_4e61_9a0d_3c7b_1f24_e8a5);
pub const DEMO_EMAIL: &str = "demo@example.com";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn demo() -> Self {
        Self {
            id: DEMO_USER_ID,
            email: DEMO_EMAIL.to_string(),
            role: "authenticated".to_string(),
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

impl Session {
    pub fn demo() -> Self {
        Self {
            access_token: "mock-access-token".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            user: User::demo(),
        }
    }
}

/// Auth handle returned by [`MockClient::auth`](crate::MockClient::auth).
#[derive(Debug, Clone, Copy)]
pub struct Auth {
    latency: Latency,
}

impl Auth {
    pub(crate) fn new(latency: Latency) -> Self {
        Self { latency }
    }

    pub async fn get_session(&self) -> Response<Session> {
        self.latency.sleep().await;
        Response::ok(Session::demo())
    }

    pub async fn get_user(&self) -> Response<User> {
        self.latency.sleep().await;
        Response::ok(User::demo())
    }

    /// Always succeeds with the demo session.
    pub async fn sign_in_with_password(&self, email: &str, _password: &str) -> Response<Session> {
        self.latency.sleep().await;
        tracing::debug!("Mock sign-in for {} resolved to demo user", email);
        Response::ok(Session::demo())
    }

    pub async fn sign_out(&self) -> Response<()> {
        self.latency.sleep().await;
        Response::empty()
    }
}
