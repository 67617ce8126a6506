//! The footprint wizard: four questionnaire steps followed by a result.
//!
//! [`WizardState`] holds the data and the step pointer; [`FootprintWizard`]
//! owns a state together with the services it needs and runs the async
//! parts (calculation, onboarding, reacting to auth events).

mod error;
mod field;
mod onboarding;
mod state;
mod step;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{ChallengeCompleter, FootprintService};
use crate::events::{AppEvent, EventBus};
use crate::models::FootprintResult;

pub use error::{CalculationError, FieldError, GENERIC_CALCULATION_FAILURE};
pub use field::{Answer, Category, Control, Field};
pub use onboarding::{OnboardingOutcome, complete_onboarding};
pub use state::{Celebration, WizardState};
pub use step::Step;

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: Step, to: Step },
    Unchanged,
}

pub struct FootprintWizard {
    state: WizardState,
    footprint: Arc<dyn FootprintService>,
    challenges: Option<Arc<dyn ChallengeCompleter>>,
    events: EventBus,
    onboarding_settled: bool,
}

impl FootprintWizard {
    pub fn new(
        footprint: Arc<dyn FootprintService>,
        events: EventBus,
        is_authenticated: bool,
    ) -> Self {
        Self {
            state: WizardState::new(is_authenticated),
            footprint,
            challenges: None,
            events,
            onboarding_settled: false,
        }
    }

    /// Enable onboarding completion after authenticated calculations.
    pub fn with_challenges(mut self, challenges: Arc<dyn ChallengeCompleter>) -> Self {
        self.challenges = Some(challenges);
        self
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> Step {
        self.state.current_step()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Move to the next step. Entering the result step runs a calculation
    /// before returning; its failure is recorded in the state, not returned.
    pub async fn advance(&mut self) -> Transition {
        let from = self.state.current_step();
        let Some(to) = self.state.step_forward() else {
            return Transition::Unchanged;
        };
        debug!(%from, %to, "wizard advanced");

        if to.is_terminal() {
            // Already recorded in the state.
            let _ = self.calculate().await;
        }
        Transition::Moved { from, to }
    }

    /// Move to the previous step. Never calculates.
    pub fn retreat(&mut self) -> Transition {
        let from = self.state.current_step();
        match self.state.step_back() {
            Some(to) => {
                debug!(%from, %to, "wizard retreated");
                Transition::Moved { from, to }
            }
            None => Transition::Unchanged,
        }
    }

    /// See [`WizardState::set_field`].
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<bool, FieldError> {
        self.state.set_field(name, value)
    }

    pub fn apply(&mut self, answer: Answer) {
        self.state.apply(answer);
    }

    /// Score the current answers.
    ///
    /// Signed-in users get the result saved to their profile, followed by a
    /// best-effort attempt at the onboarding challenge. Any previous result
    /// is dropped first, so a failure leaves the state without one.
    pub async fn calculate(&mut self) -> Result<(), CalculationError> {
        self.state.begin_calculation();
        let authenticated = self.state.is_authenticated();

        let response = if authenticated {
            self.footprint.save(self.state.answers()).await
        } else {
            self.footprint.calculate(self.state.answers()).await
        };
        let outcome = response.map_err(CalculationError::from).and_then(validate);

        match outcome {
            Ok(result) => {
                info!(
                    total_kg = result.total_co2_kg_year,
                    saved = authenticated,
                    "footprint calculated"
                );
                self.state.finish_calculation(Ok(result));
                if authenticated {
                    self.run_onboarding().await;
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, saved = authenticated, "footprint calculation failed");
                self.state.finish_calculation(Err(err.clone()));
                Err(err)
            }
        }
    }

    async fn run_onboarding(&mut self) {
        if self.onboarding_settled {
            return;
        }
        let Some(challenges) = &self.challenges else {
            debug!("no challenge service, skipping onboarding");
            return;
        };

        let outcome = complete_onboarding(challenges.as_ref(), &self.events).await;
        self.onboarding_settled = outcome.is_settled();
        if let OnboardingOutcome::Completed(earned) = outcome {
            self.state.celebrate(Celebration {
                challenge_id: earned.challenge_id,
                challenge_name: earned.challenge_name,
                xp: earned.xp,
            });
        }
    }

    pub fn restart(&mut self) {
        debug!("wizard restarted");
        self.state.restart();
    }

    /// React to a bus event. Auth changes on the result step recalculate so
    /// the result matches the new identity. Returns whether the view needs a
    /// re-render.
    pub async fn handle_event(&mut self, event: &AppEvent) -> bool {
        let authenticated = match event {
            AppEvent::Login(_) => true,
            AppEvent::Logout => false,
            AppEvent::XpEarned(_) => return false,
        };
        debug!(event = event.name(), "wizard received auth event");
        self.state.set_authenticated(authenticated);

        if self.state.is_terminal_step() {
            let _ = self.calculate().await;
            return true;
        }
        false
    }
}

fn validate(result: FootprintResult) -> Result<FootprintResult, CalculationError> {
    if !result.total_co2_kg_year.is_finite() || result.total_co2_kg_year < 0.0 {
        return Err(CalculationError::InvalidResult(format!(
            "total of {} kg is not a valid footprint",
            result.total_co2_kg_year
        )));
    }
    if !result.breakdown.is_consistent() {
        return Err(CalculationError::InvalidResult(format!(
            "breakdown shares sum to {:.1}%",
            result.breakdown.percent_total()
        )));
    }
    Ok(result)
}
