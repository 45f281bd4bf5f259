use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const HEALTH_PATH: &str = "/api/health";
pub const ACCOUNTS_PATH: &str = "/api/accounts/";
pub const MONTHLY_TRENDS_PATH: &str = "/api/analytics/monthly-trends";
pub const ADMIN_PING_PATH: &str = "/api/admin/ping";

/// The seeded demo account every MoneyMinder deployment ships with.
pub const DEMO_EMAIL: &str = "john.doe@example.com";
pub const DEMO_PASSWORD: &str = "Demo@2024";

/// Decode a response body that must be a JSON object.
///
/// Derived struct impls would also accept an array and fill fields by
/// position, so the object check happens on the raw value first.
///
/// # Errors
///
/// Returns a description of the problem if the body is not JSON, is not an
/// object, or does not match `T`.
pub fn decode_object<T: DeserializeOwned>(body: &str) -> Result<T, String> {
    let value: Value = serde_json::from_str(body).map_err(|e| format!("body is not JSON: {e}"))?;
    if !value.is_object() {
        return Err("body is not a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|e| format!("could not be read from the body: {e}"))
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

impl LoginReq {
    #[must_use]
    pub fn demo() -> Self {
        Self {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        }
    }
}

/// Only `token` is inspected; anything else the server sends is ignored.
#[derive(Deserialize, Debug)]
pub struct LoginRes {
    pub token: Option<String>,
}

impl LoginRes {
    /// # Errors
    ///
    /// Describes the problem if the token is absent or empty.
    pub fn into_token(self) -> Result<String, &'static str> {
        match self.token {
            None => Err("field is absent"),
            Some(t) if t.is_empty() => Err("field is empty"),
            Some(t) => Ok(t),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct HealthRes {
    pub status: String,
    pub database: Option<String>,
}

impl HealthRes {
    /// # Errors
    ///
    /// Describes the problem unless the backend is healthy with a connected
    /// database.
    pub fn verify(&self) -> Result<(), String> {
        if self.status != "healthy" {
            return Err(format!("status is {:?}, expected \"healthy\"", self.status));
        }
        match self.database.as_deref() {
            Some("connected") => Ok(()),
            Some(other) => Err(format!("database is {other:?}, expected \"connected\"")),
            None => Err("database is absent, expected \"connected\"".to_string()),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct AccountsRes {
    pub accounts: Vec<Value>,
}

#[derive(Deserialize, Debug)]
pub struct MonthlyTrendsRes {
    pub monthly_trends: Vec<Value>,
}

#[derive(Deserialize, Debug)]
pub struct AdminPingRes {
    pub message: String,
}

impl AdminPingRes {
    /// # Errors
    ///
    /// Describes the message actually received if it is not `admin ok`.
    pub fn verify(&self) -> Result<(), String> {
        if self.message == "admin ok" {
            Ok(())
        } else {
            Err(format!("is {:?}, expected \"admin ok\"", self.message))
        }
    }
}
