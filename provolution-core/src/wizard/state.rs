//! In-memory wizard state.
//!
//! Pure data plus pointer movement; nothing here performs I/O. The async
//! driver in [`super::FootprintWizard`] decides when a calculation runs.

use tracing::debug;

use crate::models::{FootprintAnswers, FootprintResult};

use super::error::{CalculationError, FieldError};
use super::field::{Answer, Field};
use super::step::Step;

/// Shown on the result page after the onboarding challenge completed.
#[derive(Debug, Clone, PartialEq)]
pub struct Celebration {
    pub challenge_id: String,
    pub challenge_name: Option<String>,
    pub xp: u32,
}

/// Wizard state for one mounted view. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    /// Always a valid index into [`Step::ALL`].
    step_index: usize,
    answers: FootprintAnswers,
    result: Option<FootprintResult>,
    is_authenticated: bool,
    error: Option<CalculationError>,
    celebration: Option<Celebration>,
}

impl WizardState {
    pub fn new(is_authenticated: bool) -> Self {
        Self {
            step_index: 0,
            answers: FootprintAnswers::default(),
            result: None,
            is_authenticated,
            error: None,
            celebration: None,
        }
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn current_step(&self) -> Step {
        Step::ALL[self.step_index]
    }

    pub fn is_first_step(&self) -> bool {
        self.step_index == 0
    }

    pub fn is_terminal_step(&self) -> bool {
        self.current_step().is_terminal()
    }

    /// The step right before the result, where "next" means "calculate".
    pub fn is_before_terminal(&self) -> bool {
        self.step_index + 2 == Step::ALL.len()
    }

    /// Move the pointer one step forward. Returns the new step, or `None`
    /// when already on the terminal step.
    pub fn step_forward(&mut self) -> Option<Step> {
        if self.is_terminal_step() {
            return None;
        }
        self.step_index += 1;
        Some(self.current_step())
    }

    /// Move the pointer one step back. Returns the new step, or `None` on
    /// the first step.
    pub fn step_back(&mut self) -> Option<Step> {
        if self.is_first_step() {
            return None;
        }
        self.step_index -= 1;
        Some(self.current_step())
    }

    pub fn answers(&self) -> &FootprintAnswers {
        &self.answers
    }

    pub fn apply(&mut self, answer: Answer) {
        self.answers.apply(answer);
    }

    /// Set a field from text input.
    ///
    /// The owning category is resolved from `name`. Unknown names are
    /// ignored and return `Ok(false)`; values a known field cannot take
    /// return an error. In both cases the answers are left untouched.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<bool, FieldError> {
        let Some(field) = Field::from_name(name) else {
            debug!(field = name, "ignoring unknown field");
            return Ok(false);
        };
        let answer = Answer::parse(field, value)?;
        debug!(field = name, category = field.category().name(), value = %answer, "field updated");
        self.answers.apply(answer);
        Ok(true)
    }

    pub fn result(&self) -> Option<&FootprintResult> {
        self.result.as_ref()
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn set_authenticated(&mut self, is_authenticated: bool) {
        self.is_authenticated = is_authenticated;
    }

    pub fn error(&self) -> Option<&CalculationError> {
        self.error.as_ref()
    }

    pub fn celebration(&self) -> Option<&Celebration> {
        self.celebration.as_ref()
    }

    /// Terminal step with neither a result nor an error yet.
    pub fn is_loading(&self) -> bool {
        self.is_terminal_step() && self.result.is_none() && self.error.is_none()
    }

    /// Drop any previous outcome before a new calculation is issued.
    pub(crate) fn begin_calculation(&mut self) {
        self.result = None;
        self.error = None;
        self.celebration = None;
    }

    pub(crate) fn finish_calculation(
        &mut self,
        outcome: Result<FootprintResult, CalculationError>,
    ) {
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(err) => {
                self.result = None;
                self.error = Some(err);
            }
        }
    }

    pub(crate) fn celebrate(&mut self, celebration: Celebration) {
        self.celebration = Some(celebration);
    }

    /// Back to the first step with default answers and no result.
    /// The authentication flag is kept; it belongs to the hosting page.
    pub fn restart(&mut self) {
        self.step_index = 0;
        self.answers = FootprintAnswers::default();
        self.result = None;
        self.error = None;
        self.celebration = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{DietType, HousingType};

    fn state_at(index: usize) -> WizardState {
        let mut state = WizardState::new(false);
        for _ in 0..index {
            state.step_forward();
        }
        state
    }

    #[test]
    fn new_state_starts_on_housing_with_defaults() {
        let state = WizardState::new(true);

        assert_eq!(state.current_step(), Step::Housing);
        assert_eq!(state.answers(), &FootprintAnswers::default());
        assert!(state.result().is_none());
        assert!(state.is_authenticated());
    }

    #[test]
    fn forward_then_back_is_identity_for_every_step() {
        for index in 0..Step::ALL.len() - 1 {
            let mut state = state_at(index);
            state.step_forward();
            state.step_back();
            assert_eq!(state.step_index(), index);
        }
    }

    #[test]
    fn back_from_terminal_reaches_previous_step() {
        let mut state = state_at(4);
        assert_eq!(state.step_back(), Some(Step::Consumption));
    }

    #[test]
    fn back_on_first_step_is_noop() {
        let mut state = WizardState::new(false);
        let before = state.clone();

        assert_eq!(state.step_back(), None);
        assert_eq!(state, before);
    }

    #[test]
    fn forward_on_terminal_step_is_noop() {
        let mut state = state_at(4);
        let before = state.clone();

        assert_eq!(state.step_forward(), None);
        assert_eq!(state, before);
    }

    #[test]
    fn before_terminal_is_consumption() {
        assert!(state_at(3).is_before_terminal());
        assert!(!state_at(2).is_before_terminal());
        assert!(!state_at(4).is_before_terminal());
    }

    #[test]
    fn set_field_routes_to_owning_category() {
        let mut state = WizardState::new(false);

        assert_eq!(state.set_field("housing_type", "house"), Ok(true));
        assert_eq!(state.set_field("diet_type", "vegan"), Ok(true));

        assert_eq!(state.answers().housing.housing_type, HousingType::House);
        assert_eq!(state.answers().nutrition.diet_type, DietType::Vegan);
    }

    #[test]
    fn set_field_with_unknown_name_leaves_answers_unchanged() {
        let mut state = WizardState::new(false);
        state.set_field("bike_km_year", "1200").unwrap();
        let before = serde_json::to_vec(state.answers()).unwrap();

        assert_eq!(state.set_field("bike_kilometres", "9000"), Ok(false));
        assert_eq!(state.set_field("", "x"), Ok(false));

        assert_eq!(serde_json::to_vec(state.answers()).unwrap(), before);
    }

    #[test]
    fn set_field_with_bad_value_leaves_answers_unchanged() {
        let mut state = WizardState::new(false);
        let before = state.answers().clone();

        assert!(state.set_field("heating_type", "coal").is_err());
        assert_eq!(state.answers(), &before);
    }

    #[test]
    fn restart_resets_everything_but_authentication() {
        let mut state = state_at(4);
        state.set_authenticated(true);
        state.set_field("has_car", "yes").unwrap();
        state.finish_calculation(Err(CalculationError::Network("down".to_string())));

        state.restart();

        assert_eq!(state.step_index(), 0);
        assert_eq!(state.answers(), &FootprintAnswers::default());
        assert!(state.result().is_none());
        assert!(state.error().is_none());
        assert!(state.is_authenticated());
    }

    #[test]
    fn loading_only_on_terminal_without_outcome() {
        let mut state = state_at(4);
        assert!(state.is_loading());

        state.finish_calculation(Err(CalculationError::Network("down".to_string())));
        assert!(!state.is_loading());
        assert!(!state_at(2).is_loading());
    }
}
