//! Sign-in, registration and profile.

use std::fmt::Write as _;

use provolution_core::{ApiError, AppEvent, EventBus, RegisterRequest, User};
use provolution_http::ApiClient;

pub struct AuthView<'a> {
    client: &'a ApiClient,
    events: &'a EventBus,
}

impl<'a> AuthView<'a> {
    pub fn new(client: &'a ApiClient, events: &'a EventBus) -> Self {
        Self { client, events }
    }

    /// Sign in and announce it with `auth:login`.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let response = self.client.login(email, password).await?;
        let greeting = format!(
            "Welcome back, {}! Level {} · {} XP",
            response.user.name(),
            response.user.level,
            response.user.total_xp
        );
        self.events.publish(AppEvent::Login(response.user));
        Ok(greeting)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<String, ApiError> {
        let response = self.client.register(request).await?;
        let greeting = format!("Welcome, {}! Your account is ready.", response.user.name());
        self.events.publish(AppEvent::Login(response.user));
        Ok(greeting)
    }

    /// Sign out; the client publishes `auth:logout`.
    pub fn logout(&self) -> String {
        self.client.logout();
        "Signed out.".to_string()
    }

    pub async fn whoami(&self) -> Result<String, ApiError> {
        if !self.client.is_authenticated() {
            return Ok("Not signed in.".to_string());
        }
        let user = self.client.me().await?;
        Ok(render_profile(&user))
    }
}

pub fn render_profile(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {} (@{})", user.avatar_emoji, user.name(), user.username);
    let _ = writeln!(
        out,
        "Level {} · {} XP · {} day streak",
        user.level, user.total_xp, user.streak_days
    );
    if let Some(region) = &user.region {
        let _ = writeln!(out, "Region: {region}");
    }
    if let Some(stats) = &user.stats {
        let _ = writeln!(
            out,
            "{} challenges completed · {:.0} kg CO₂ saved · {} badges",
            stats.challenges_completed, stats.total_co2_saved_kg, stats.badges_earned
        );
    }
    if let Some(code) = &user.referral_code {
        let _ = writeln!(out, "Referral code: {code}");
    }
    out
}
