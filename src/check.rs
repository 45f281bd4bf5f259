use derive_more::Display;
use reqwest::{StatusCode, blocking::Client};
use serde::de::DeserializeOwned;

use crate::{
    api::{
        ACCOUNTS_PATH, ADMIN_PING_PATH, AccountsRes, AdminPingRes, HEALTH_PATH, HealthRes,
        LOGIN_PATH, LoginReq, LoginRes, MONTHLY_TRENDS_PATH, MonthlyTrendsRes, decode_object,
    },
    error::SmokeError,
    origin::Origin,
};

/// Text the landing page must contain for it to count as rendered.
pub const BRAND: &str = "MoneyMinder";

#[derive(Copy, Clone, Display, Debug, PartialEq, Eq)]
pub enum Step {
    #[display("landing page")]
    Landing,
    #[display("backend health")]
    Health,
    #[display("API login")]
    Login,
    #[display("accounts")]
    Accounts,
    #[display("monthly trends")]
    MonthlyTrends,
    #[display("admin ping")]
    AdminPing,
}

pub struct SmokeCheck {
    client: Client,
    base_url: Origin,
    backend_url: Origin,
    check_health: bool,
    check_authenticated: bool,
}

impl SmokeCheck {
    #[must_use]
    pub fn new(base_url: Origin, backend_url: Origin) -> Self {
        Self {
            client: Client::new(),
            base_url,
            backend_url,
            check_health: false,
            check_authenticated: false,
        }
    }

    /// Also require `/api/health` to report a healthy backend before logging in.
    #[must_use]
    pub fn with_health_check(mut self, enabled: bool) -> Self {
        self.check_health = enabled;
        self
    }

    /// After logging in, also use the token for the read-only account,
    /// analytics and admin endpoints.
    #[must_use]
    pub fn with_authenticated_checks(mut self, enabled: bool) -> Self {
        self.check_authenticated = enabled;
        self
    }

    /// Run every step in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the failure of the first step that did not pass.
    pub fn run(&self) -> Result<Vec<Step>, SmokeError> {
        let mut passed = vec![];

        self.landing_page()?;
        passed.push(Step::Landing);

        if self.check_health {
            self.health()?;
            passed.push(Step::Health);
        }

        let token = self.login()?;
        passed.push(Step::Login);

        if self.check_authenticated {
            self.accounts(&token)?;
            passed.push(Step::Accounts);
            self.monthly_trends(&token)?;
            passed.push(Step::MonthlyTrends);
            self.admin_ping(&token)?;
            passed.push(Step::AdminPing);
        }

        Ok(passed)
    }

    /// Load the front end and look for the brand in the served document.
    ///
    /// # Errors
    ///
    /// [`SmokeError::Render`] if the brand is missing, [`SmokeError::Network`]
    /// if the page could not be fetched.
    pub fn landing_page(&self) -> Result<(), SmokeError> {
        let url = self.base_url.join("/");
        tracing::info!("Loading landing page: {url}");

        let res = self
            .client
            .get(&url)
            .send()
            .map_err(SmokeError::network(&url))?;
        if !res.status().is_success() {
            tracing::warn!("Landing page responded with {}", res.status());
        }
        let document = res.text().map_err(SmokeError::network(&url))?;
        tracing::debug!("Landing page is {} bytes", document.len());

        if !document.contains(BRAND) {
            return Err(SmokeError::Render {
                url,
                expected: BRAND,
                len: document.len(),
            });
        }
        Ok(())
    }

    /// Log in with the demo account and return the issued token.
    ///
    /// # Errors
    ///
    /// [`SmokeError::Status`] unless the backend answers `200`,
    /// [`SmokeError::Shape`] if no usable `token` comes back.
    pub fn login(&self) -> Result<String, SmokeError> {
        let url = self.backend_url.join(LOGIN_PATH);
        tracing::info!("Authenticating against {url}...");

        let res = self
            .client
            .post(&url)
            .json(&LoginReq::demo())
            .send()
            .map_err(SmokeError::network(&url))?;
        let res: LoginRes = expect_ok_json(res, &url, "token")?;

        let token = res.into_token().map_err(|reason| SmokeError::Shape {
            url: url.clone(),
            field: "token",
            reason: reason.to_string(),
        })?;
        tracing::debug!("Token acquired: {token}");
        Ok(token)
    }

    /// # Errors
    ///
    /// [`SmokeError::Status`] or [`SmokeError::Shape`] if the backend does not
    /// report itself healthy.
    pub fn health(&self) -> Result<(), SmokeError> {
        let url = self.backend_url.join(HEALTH_PATH);
        tracing::info!("Checking backend health: {url}");

        let res = self
            .client
            .get(&url)
            .send()
            .map_err(SmokeError::network(&url))?;
        let res: HealthRes = expect_ok_json(res, &url, "status")?;

        res.verify().map_err(|reason| SmokeError::Shape {
            url,
            field: "status",
            reason,
        })
    }

    /// List the demo user's accounts.
    ///
    /// # Errors
    ///
    /// [`SmokeError::Status`] unless `200`, [`SmokeError::Shape`] unless the
    /// body carries an `accounts` list.
    pub fn accounts(&self, token: &str) -> Result<(), SmokeError> {
        let res: AccountsRes = self.get_authenticated(ACCOUNTS_PATH, token, "accounts")?;
        tracing::debug!("Demo user has {} accounts", res.accounts.len());
        Ok(())
    }

    /// # Errors
    ///
    /// [`SmokeError::Status`] unless `200`, [`SmokeError::Shape`] unless the
    /// body carries a `monthly_trends` list.
    pub fn monthly_trends(&self, token: &str) -> Result<(), SmokeError> {
        let res: MonthlyTrendsRes =
            self.get_authenticated(MONTHLY_TRENDS_PATH, token, "monthly_trends")?;
        tracing::debug!("{} months of trends", res.monthly_trends.len());
        Ok(())
    }

    /// The demo user is an admin, so the admin-only ping must answer.
    ///
    /// # Errors
    ///
    /// [`SmokeError::Status`] unless `200`, [`SmokeError::Shape`] unless the
    /// message is `admin ok`.
    pub fn admin_ping(&self, token: &str) -> Result<(), SmokeError> {
        let url = self.backend_url.join(ADMIN_PING_PATH);
        let res: AdminPingRes = self.get_authenticated(ADMIN_PING_PATH, token, "message")?;
        res.verify().map_err(|reason| SmokeError::Shape {
            url,
            field: "message",
            reason,
        })
    }

    fn get_authenticated<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        field: &'static str,
    ) -> Result<T, SmokeError> {
        let url = self.backend_url.join(path);
        tracing::info!("Fetching {url} as the demo user");

        let res = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .map_err(SmokeError::network(&url))?;
        expect_ok_json(res, &url, field)
    }
}

/// Require a `200` and decode the body as a JSON object, blaming `field` if it
/// won't decode.
fn expect_ok_json<T: DeserializeOwned>(
    res: reqwest::blocking::Response,
    url: &str,
    field: &'static str,
) -> Result<T, SmokeError> {
    let status = res.status();
    let body = res.text().map_err(SmokeError::network(url))?;
    tracing::debug!("{url} responded {status}: {body}");

    if status != StatusCode::OK {
        return Err(SmokeError::Status {
            url: url.to_string(),
            expected: StatusCode::OK.as_u16(),
            actual: status.as_u16(),
            body,
        });
    }

    decode_object(&body).map_err(|reason| SmokeError::Shape {
        url: url.to_string(),
        field,
        reason,
    })
}
