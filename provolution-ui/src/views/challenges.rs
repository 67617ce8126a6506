//! Challenge list, join and completion.

use std::fmt::Write as _;

use provolution_core::{
    ApiError, AppEvent, Challenge, ChallengeFilter, ChallengeList, EventBus, ParticipationStatus,
    UserChallenge, XpEarned,
};
use provolution_http::ApiClient;
use tracing::debug;

pub struct ChallengesView<'a> {
    client: &'a ApiClient,
    events: &'a EventBus,
}

impl<'a> ChallengesView<'a> {
    pub fn new(client: &'a ApiClient, events: &'a EventBus) -> Self {
        Self { client, events }
    }

    pub async fn list(&self, filter: &ChallengeFilter) -> Result<String, ApiError> {
        let list = self.client.challenges(filter).await?;
        Ok(render_challenge_list(&list))
    }

    pub async fn active(&self) -> Result<String, ApiError> {
        let active = self.client.active_challenges().await?;
        Ok(render_active(&active))
    }

    pub async fn join(&self, id: &str) -> Result<String, ApiError> {
        let response = self.client.join_challenge(id).await?;
        Ok(response
            .message
            .unwrap_or_else(|| format!("Joined challenge {id}.")))
    }

    /// Complete a challenge and announce the XP with `xp:earned`.
    pub async fn complete(&self, id: &str) -> Result<String, ApiError> {
        let completion = self.client.complete_challenge(id).await?;
        let challenge = match self.client.get_challenge(id).await {
            Ok(challenge) => Some(challenge),
            Err(err) => {
                debug!(challenge = id, error = %err, "no details for completed challenge");
                None
            }
        };

        let earned = XpEarned {
            xp: completion.xp_or(challenge.as_ref()),
            challenge_id: id.to_string(),
            challenge_name: challenge.map(|c| c.name),
        };
        let mut out = format!(
            "🎉 Completed {}: +{} XP",
            earned.challenge_name.as_deref().unwrap_or(id),
            earned.xp
        );
        if let Some(badge) = &completion.badge_earned {
            let _ = write!(out, "\n{} New badge: {}", badge.icon, badge.name);
        }
        self.events.publish(AppEvent::XpEarned(earned));
        Ok(out)
    }
}

fn status_marker(status: Option<ParticipationStatus>) -> &'static str {
    match status {
        Some(ParticipationStatus::Completed) => "[✓]",
        Some(ParticipationStatus::Active) => "[~]",
        Some(ParticipationStatus::Abandoned) => "[x]",
        None => "[ ]",
    }
}

fn challenge_line(challenge: &Challenge) -> String {
    let days = if challenge.duration_days == 1 { "day" } else { "days" };
    format!(
        "{} {:<6} {} {}  {} · {} · {} {} · {} XP · {} joined",
        status_marker(challenge.user_status),
        challenge.id,
        challenge.name_emoji,
        challenge.name,
        challenge.category,
        challenge.difficulty,
        challenge.duration_days,
        days,
        challenge.xp_reward,
        challenge.participants_count
    )
}

pub fn render_challenge_list(list: &ChallengeList) -> String {
    if list.challenges.is_empty() {
        return "No challenges found.\n".to_string();
    }
    let mut out = format!("Challenges ({})\n", list.total.max(list.challenges.len() as u32));
    for challenge in &list.challenges {
        let _ = writeln!(out, "  {}", challenge_line(challenge));
    }
    out
}

pub fn render_active(active: &[UserChallenge]) -> String {
    if active.is_empty() {
        return "No active challenges. Join one with `provolution join <id>`.\n".to_string();
    }
    let mut out = String::from("Active challenges\n");
    for entry in active {
        let _ = writeln!(
            out,
            "  {:<6} {:>3}%  day {} since {}",
            entry.challenge_id,
            entry.progress_percent,
            entry.days_completed,
            entry.started_at.format("%Y-%m-%d")
        );
    }
    out
}
