//! Auto-completion of the onboarding challenge after a saved calculation.

use tracing::{debug, info, warn};

use crate::api::ChallengeCompleter;
use crate::events::{AppEvent, EventBus, XpEarned};
use crate::models::ONBOARDING_CHALLENGE_ID;

/// How one run of the onboarding chain ended.
#[derive(Debug, Clone, PartialEq)]
pub enum OnboardingOutcome {
    /// Completed just now; the XP event has been published.
    Completed(XpEarned),
    /// The server already had the challenge as completed.
    AlreadyCompleted,
    /// The challenge does not exist for this deployment.
    Unavailable,
    /// Lookup or completion failed; worth another attempt later.
    Failed,
}

impl OnboardingOutcome {
    /// Whether the chain should never run again for this wizard.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::AlreadyCompleted)
    }
}

/// Join (when needed) and complete the onboarding challenge.
///
/// Failures are logged and reported through the outcome only. Exactly one
/// `xp:earned` event is published, and only on [`OnboardingOutcome::Completed`].
pub async fn complete_onboarding(
    completer: &dyn ChallengeCompleter,
    events: &EventBus,
) -> OnboardingOutcome {
    let id = ONBOARDING_CHALLENGE_ID;

    let challenge = match completer.challenge(id).await {
        Ok(Some(challenge)) => challenge,
        Ok(None) => {
            debug!(challenge = id, "onboarding challenge not found, skipping");
            return OnboardingOutcome::Unavailable;
        }
        Err(err) => {
            warn!(challenge = id, error = %err, "could not look up onboarding challenge");
            return OnboardingOutcome::Failed;
        }
    };

    if challenge.is_completed() {
        debug!(challenge = id, "onboarding challenge already completed");
        return OnboardingOutcome::AlreadyCompleted;
    }

    if !challenge.is_active() {
        debug!(challenge = id, "joining onboarding challenge");
        // Usually means the user joined from another client; completion decides.
        if let Err(err) = completer.join(id).await {
            debug!(challenge = id, error = %err, "join failed, continuing");
        }
    }

    let completion = match completer.complete(id).await {
        Ok(completion) => completion,
        Err(err) => {
            warn!(challenge = id, error = %err, "could not complete onboarding challenge");
            return OnboardingOutcome::Failed;
        }
    };

    let earned = XpEarned {
        xp: completion.xp_or(Some(&challenge)),
        challenge_id: challenge.id.clone(),
        challenge_name: Some(challenge.name.clone()),
    };
    info!(challenge = id, xp = earned.xp, "onboarding challenge completed");
    events.publish(AppEvent::XpEarned(earned.clone()));

    OnboardingOutcome::Completed(earned)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::ApiError;
    use crate::models::{Challenge, Completion, JoinResponse, ParticipationStatus};

    /// Scripted challenge service that records the calls it receives.
    pub(crate) struct StubCompleter {
        pub status: Option<ParticipationStatus>,
        pub missing: bool,
        pub fail_lookup: bool,
        pub fail_join: bool,
        pub fail_complete: bool,
        pub xp_earned: Option<u32>,
        pub calls: Mutex<Vec<&'static str>>,
    }

    impl StubCompleter {
        pub(crate) fn new() -> Self {
            Self {
                status: None,
                missing: false,
                fail_lookup: false,
                fail_join: false,
                fail_complete: false,
                xp_earned: Some(50),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        fn failure() -> ApiError {
            ApiError::Status {
                status: 500,
                code: None,
                message: Some("boom".to_string()),
            }
        }
    }

    #[async_trait]
    impl ChallengeCompleter for StubCompleter {
        async fn challenge(&self, id: &str) -> Result<Option<Challenge>, ApiError> {
            self.record("challenge");
            if self.fail_lookup {
                return Err(Self::failure());
            }
            if self.missing {
                return Ok(None);
            }
            Ok(Some(Challenge {
                id: id.to_string(),
                name: "Klimaheld-Profil".to_string(),
                name_emoji: "🦸".to_string(),
                description: String::new(),
                category: "onboarding".to_string(),
                difficulty: "easy".to_string(),
                duration_days: 1,
                xp_reward: 50,
                badge: None,
                impact: None,
                participants_count: 0,
                user_status: self.status,
            }))
        }

        async fn join(&self, _id: &str) -> Result<JoinResponse, ApiError> {
            self.record("join");
            if self.fail_join {
                return Err(ApiError::Status {
                    status: 409,
                    code: Some("ALREADY_JOINED".to_string()),
                    message: None,
                });
            }
            Ok(JoinResponse {
                success: true,
                user_challenge: None,
                message: None,
            })
        }

        async fn complete(&self, _id: &str) -> Result<Completion, ApiError> {
            self.record("complete");
            if self.fail_complete {
                return Err(Self::failure());
            }
            Ok(Completion {
                success: true,
                xp_earned: self.xp_earned,
                ..Default::default()
            })
        }
    }

    fn xp_events(events: Vec<AppEvent>) -> Vec<XpEarned> {
        events
            .into_iter()
            .filter_map(|event| match event {
                AppEvent::XpEarned(earned) => Some(earned),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn fresh_user_joins_then_completes() {
        let stub = StubCompleter::new();
        let bus = EventBus::new();
        let mut sub = bus.subscribe();

        let outcome = complete_onboarding(&stub, &bus).await;

        assert_eq!(stub.calls(), vec!["challenge", "join", "complete"]);
        assert!(outcome.is_settled());
        assert_eq!(
            xp_events(sub.drain()),
            vec![XpEarned {
                xp: 50,
                challenge_id: "ON-1".to_string(),
                challenge_name: Some("Klimaheld-Profil".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn active_participation_skips_join() {
        let mut stub = StubCompleter::new();
        stub.status = Some(ParticipationStatus::Active);

        complete_onboarding(&stub, &EventBus::new()).await;

        assert_eq!(stub.calls(), vec!["challenge", "complete"]);
    }

    #[tokio::test]
    async fn completed_challenge_is_left_alone() {
        let mut stub = StubCompleter::new();
        stub.status = Some(ParticipationStatus::Completed);
        let bus = EventBus::new();
        let mut sub = bus.subscribe();

        let outcome = complete_onboarding(&stub, &bus).await;

        assert_eq!(outcome, OnboardingOutcome::AlreadyCompleted);
        assert_eq!(stub.calls(), vec!["challenge"]);
        assert!(sub.drain().is_empty());
    }

    #[tokio::test]
    async fn join_failure_is_swallowed() {
        let mut stub = StubCompleter::new();
        stub.fail_join = true;
        stub.xp_earned = Some(75);

        let outcome = complete_onboarding(&stub, &EventBus::new()).await;

        match outcome {
            OnboardingOutcome::Completed(earned) => assert_eq!(earned.xp, 75),
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_xp_falls_back_to_reward() {
        let mut stub = StubCompleter::new();
        stub.xp_earned = None;

        let outcome = complete_onboarding(&stub, &EventBus::new()).await;

        assert!(matches!(outcome, OnboardingOutcome::Completed(XpEarned { xp: 50, .. })));
    }

    #[tokio::test]
    async fn completion_failure_publishes_nothing() {
        let mut stub = StubCompleter::new();
        stub.fail_complete = true;
        let bus = EventBus::new();
        let mut sub = bus.subscribe();

        let outcome = complete_onboarding(&stub, &bus).await;

        assert_eq!(outcome, OnboardingOutcome::Failed);
        assert!(!outcome.is_settled());
        assert!(sub.drain().is_empty());
    }

    #[tokio::test]
    async fn unknown_challenge_stops_the_chain() {
        let mut stub = StubCompleter::new();
        stub.missing = true;

        let outcome = complete_onboarding(&stub, &EventBus::new()).await;

        assert_eq!(outcome, OnboardingOutcome::Unavailable);
        assert_eq!(stub.calls(), vec!["challenge"]);
    }
}
