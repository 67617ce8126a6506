use std::sync::Arc;

use async_trait::async_trait;
use provolution_core::{
    ApiConfig, ApiError, AppEvent, AuthResponse, Challenge, ChallengeCompleter, ChallengeFilter,
    ChallengeList, Completion, EmissionFactors, EventBus, FootprintAnswers, FootprintResult,
    FootprintService, JoinResponse, Leaderboard, LeaderboardScope, LoginRequest, RegisterRequest,
    User, UserChallenge,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::session::Session;

const UNAUTHORIZED_CODE: &str = "UNAUTHORIZED";
const NON_JSON_ERROR_CODE: &str = "SERVER_ERROR";
/// Largest page `GET /challenges` serves.
const CHALLENGE_PAGE: u32 = 100;

/// Client for the Provolution REST API.
///
/// Every request carries the session's bearer token when there is one. When
/// the server rejects that token with `UNAUTHORIZED`, the session is cleared
/// and `auth:logout` is published on the bus.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: Arc<Session>,
    events: EventBus,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ActiveChallenges {
    Bare(Vec<UserChallenge>),
    Wrapped { challenges: Vec<UserChallenge> },
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        session: Arc<Session>,
        events: EventBus,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!(base_url = %config.base_url, "API client ready");
        Ok(Self {
            http,
            config,
            session,
            events,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // Auth

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .send(self.request(Method::POST, "/auth/register").json(request))
            .await?;
        self.remember(&response);
        Ok(response)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self
            .send(self.request(Method::POST, "/auth/login").json(&request))
            .await?;
        self.remember(&response);
        Ok(response)
    }

    /// Local only; the API keeps no server-side session.
    pub fn logout(&self) {
        self.session.clear();
        self.events.publish(AppEvent::Logout);
        info!("signed out");
    }

    fn remember(&self, response: &AuthResponse) {
        if let Err(err) = self.session.store(&response.token) {
            warn!(error = %err, "token kept for this run only");
        }
        info!(user = %response.user.username, "signed in");
    }

    // Users

    pub async fn me(&self) -> Result<User, ApiError> {
        self.send(self.request(Method::GET, "/users/me")).await
    }

    // Challenges

    pub async fn challenges(&self, filter: &ChallengeFilter) -> Result<ChallengeList, ApiError> {
        let query = filter.query_pairs();
        self.send(self.request(Method::GET, "/challenges").query(&query))
            .await
    }

    pub async fn get_challenge(&self, id: &str) -> Result<Challenge, ApiError> {
        self.send(self.request(Method::GET, &format!("/challenges/{id}")))
            .await
    }

    /// Find a challenge in the list endpoint, which unlike the detail
    /// endpoint reports the signed-in user's participation status. Ids are
    /// matched case-insensitively.
    pub async fn find_challenge(&self, id: &str) -> Result<Option<Challenge>, ApiError> {
        let mut offset = 0;
        loop {
            let filter = ChallengeFilter {
                limit: Some(CHALLENGE_PAGE),
                offset: Some(offset),
                ..Default::default()
            };
            let page = self.challenges(&filter).await?;
            let fetched = page.challenges.len() as u32;
            if let Some(found) = page
                .challenges
                .into_iter()
                .find(|c| c.id.eq_ignore_ascii_case(id))
            {
                return Ok(Some(found));
            }
            offset += CHALLENGE_PAGE;
            if fetched == 0 || offset >= page.total {
                debug!(challenge = id, "challenge not listed");
                return Ok(None);
            }
        }
    }

    pub async fn join_challenge(&self, id: &str) -> Result<JoinResponse, ApiError> {
        self.send(self.request(Method::POST, &format!("/challenges/{id}/join")))
            .await
    }

    pub async fn complete_challenge(&self, id: &str) -> Result<Completion, ApiError> {
        self.send(self.request(Method::POST, &format!("/challenges/{id}/complete")))
            .await
    }

    pub async fn active_challenges(&self) -> Result<Vec<UserChallenge>, ApiError> {
        let active: ActiveChallenges = self
            .send(self.request(Method::GET, "/user/challenges/active"))
            .await?;
        Ok(match active {
            ActiveChallenges::Bare(challenges) | ActiveChallenges::Wrapped { challenges } => {
                challenges
            }
        })
    }

    // Leaderboards

    pub async fn leaderboard(
        &self,
        scope: &LeaderboardScope,
        limit: u32,
    ) -> Result<Leaderboard, ApiError> {
        let path = format!("/leaderboards/{}", scope.path());
        self.send(self.request(Method::GET, &path).query(&[("limit", limit)]))
            .await
    }

    // Footprint

    pub async fn calculate_footprint(
        &self,
        answers: &FootprintAnswers,
    ) -> Result<FootprintResult, ApiError> {
        self.send(self.request(Method::POST, "/footprint/calculate").json(answers))
            .await
    }

    pub async fn save_footprint(
        &self,
        answers: &FootprintAnswers,
    ) -> Result<FootprintResult, ApiError> {
        self.send(self.request(Method::POST, "/footprint/me").json(answers))
            .await
    }

    pub async fn emission_factors(&self) -> Result<EmissionFactors, ApiError> {
        self.send(self.request(Method::GET, "/footprint/factors"))
            .await
    }

    /// Whether the API answers its health probe. Never fails.
    pub async fn health(&self) -> bool {
        let url = self.config.health_url();
        match self.http.get(&url).send().await {
            Ok(response) => {
                debug!(%url, status = response.status().as_u16(), "health probe");
                response.status().is_success()
            }
            Err(err) => {
                debug!(%url, error = %err, "health probe failed");
                false
            }
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.config.endpoint(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let sent_token = self.session.is_authenticated();
        let response = builder.send().await.map_err(|err| {
            warn!(error = %err, "request failed before a response arrived");
            ApiError::Network(err.to_string())
        })?;

        let status = response.status();
        let url = response.url().clone();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        let body = response
            .bytes()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "response received");

        if !is_json {
            if !status.is_success() {
                let code = Some(NON_JSON_ERROR_CODE.to_string());
                return Err(self.failure(status, code, None, sent_token));
            }
            return decode(json!({ "success": true }));
        }

        let value: Value = serde_json::from_slice(&body)
            .map_err(|err| ApiError::Decode(format!("invalid JSON from {url}: {err}")))?;

        if !status.is_success() {
            let (code, message) = error_details(&value);
            return Err(self.failure(status, code, message, sent_token));
        }
        decode(value)
    }

    /// Only a rejected bearer token signs the user out; a wrong password on
    /// `/auth/login` is a plain `401` with its own code.
    fn failure(
        &self,
        status: StatusCode,
        code: Option<String>,
        message: Option<String>,
        sent_token: bool,
    ) -> ApiError {
        if sent_token && code.as_deref() == Some(UNAUTHORIZED_CODE) {
            warn!("session rejected by server, signing out");
            self.session.clear();
            self.events.publish(AppEvent::Logout);
            return ApiError::Unauthorized(message.unwrap_or_else(|| "session expired".to_string()));
        }
        ApiError::Status {
            status: status.as_u16(),
            code,
            message,
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Error code and message from a failure body. The API nests its
/// `{"error": {"code", "message"}}` object under `detail` for raised
/// exceptions; framework errors send a plain `{"detail": "..."}`.
fn error_details(body: &Value) -> (Option<String>, Option<String>) {
    let text = |pointer: &str| {
        body.pointer(pointer)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let code = text("/error/code").or_else(|| text("/detail/error/code"));
    let message = text("/error/message")
        .or_else(|| text("/detail/error/message"))
        .or_else(|| text("/detail"));
    (code, message)
}

#[async_trait]
impl FootprintService for ApiClient {
    async fn calculate(&self, answers: &FootprintAnswers) -> Result<FootprintResult, ApiError> {
        self.calculate_footprint(answers).await
    }

    async fn save(&self, answers: &FootprintAnswers) -> Result<FootprintResult, ApiError> {
        self.save_footprint(answers).await
    }
}

#[async_trait]
impl ChallengeCompleter for ApiClient {
    async fn challenge(&self, id: &str) -> Result<Option<Challenge>, ApiError> {
        self.find_challenge(id).await
    }

    async fn join(&self, id: &str) -> Result<JoinResponse, ApiError> {
        self.join_challenge(id).await
    }

    async fn complete(&self, id: &str) -> Result<Completion, ApiError> {
        self.complete_challenge(id).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn error_details_prefer_error_object() {
        let body = json!({"error": {"code": "VALIDATION_ERROR", "message": "bad size"}});
        assert_eq!(
            error_details(&body),
            (Some("VALIDATION_ERROR".to_string()), Some("bad size".to_string()))
        );
    }

    #[test]
    fn error_details_read_object_nested_in_detail() {
        let body = json!({"detail": {
            "success": false,
            "error": {"code": "CHALLENGE_ALREADY_JOINED", "message": "Already joined"}
        }});
        assert_eq!(
            error_details(&body),
            (
                Some("CHALLENGE_ALREADY_JOINED".to_string()),
                Some("Already joined".to_string())
            )
        );
    }

    #[test]
    fn error_details_fall_back_to_detail() {
        let body = json!({"detail": "Challenge not found"});
        assert_eq!(error_details(&body), (None, Some("Challenge not found".to_string())));
    }

    #[test]
    fn error_details_ignore_structured_detail() {
        let body = json!({"detail": [{"loc": ["body"], "msg": "field required"}]});
        assert_eq!(error_details(&body), (None, None));
    }
}
