//! Terminal host for the footprint wizard.
//!
//! The view owns one [`FootprintWizard`] and one bus subscription for as
//! long as it is mounted. Input arrives as text lines; output is rendered
//! text. Bus events are drained between lines, so edits and transitions
//! never interleave.

use std::fmt::Write as _;
use std::sync::Arc;

use provolution_core::wizard::{
    Answer, Control, Field, FootprintWizard, Step, Transition, WizardState,
};
use provolution_core::{
    ChallengeCompleter, EventBus, EventSubscription, FootprintResult, FootprintService,
};
use tracing::{debug, info};

use crate::utils::{ScoreBand, bar, comparison_fill, format_delta, format_kg, format_tonnes};
use crate::views::status_bar::{KeyHint, hints, render_status_bar};

const BAR_WIDTH: usize = 24;

/// Fields only shown while `has_car` is on.
const CAR_DETAILS: [Field; 3] = [Field::CarFuelType, Field::CarKmYear, Field::CarConsumptionL100km];

/// Services the wizard calls out to.
pub struct WizardServices {
    pub footprint: Arc<dyn FootprintService>,
    /// Without it the onboarding challenge is never attempted.
    pub challenges: Option<Arc<dyn ChallengeCompleter>>,
}

/// What the host should do after a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    Show(String),
    Quit,
}

pub struct WizardView {
    wizard: FootprintWizard,
    subscription: EventSubscription,
}

impl WizardView {
    pub fn mount(services: WizardServices, events: EventBus, is_authenticated: bool) -> Self {
        let subscription = events.subscribe();
        let mut wizard = FootprintWizard::new(services.footprint, events, is_authenticated);
        if let Some(challenges) = services.challenges {
            wizard = wizard.with_challenges(challenges);
        }
        info!(authenticated = is_authenticated, "wizard mounted");
        Self {
            wizard,
            subscription,
        }
    }

    /// Tear the view down, handing back the final state.
    pub fn unmount(self) -> WizardState {
        let state = self.wizard.state().clone();
        info!(step = %state.current_step(), "wizard unmounted");
        state
    }

    pub fn wizard(&self) -> &FootprintWizard {
        &self.wizard
    }

    /// Forward pending bus events to the wizard. Returns whether the page
    /// changed and should be shown again.
    pub async fn sync_events(&mut self) -> bool {
        let mut changed = false;
        for event in self.subscription.drain() {
            changed |= self.wizard.handle_event(&event).await;
        }
        changed
    }

    pub async fn handle_command(&mut self, line: &str) -> ViewOutcome {
        let line = line.trim();
        let (command, rest) = split_command(line);

        let output = match command {
            "" | "show" => self.render(),
            "q" | "quit" | "exit" => return ViewOutcome::Quit,
            "?" | "help" => self.render_help(),
            "n" | "next" => match self.wizard.advance().await {
                Transition::Moved { .. } => self.render(),
                Transition::Unchanged => {
                    with_notice(self.render(), "Already on the result. Type r to restart.")
                }
            },
            "b" | "back" => match self.wizard.retreat() {
                Transition::Moved { .. } => self.render(),
                Transition::Unchanged => with_notice(self.render(), "Already on the first step."),
            },
            "r" | "restart" => {
                self.wizard.restart();
                self.render()
            }
            "set" => {
                let (name, value) = split_command(rest);
                self.set(name, value)
            }
            name => self.set(name, rest),
        };
        ViewOutcome::Show(output)
    }

    fn set(&mut self, name: &str, value: &str) -> String {
        match self.wizard.set_field(name, value) {
            Ok(true) => self.render(),
            Ok(false) => {
                debug!(input = name, "unrecognised command");
                format!("Unknown command or field '{name}'. Type ? for help.")
            }
            Err(err) => err.to_string(),
        }
    }

    pub fn render(&self) -> String {
        let state = self.wizard.state();
        let step = state.current_step();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Provolution footprint · step {}/{} · {}",
            step.index() + 1,
            Step::ALL.len(),
            step.label()
        );
        let _ = writeln!(out, "{}", progress_line(step));
        out.push('\n');

        match step.category() {
            Some(category) => {
                for field in category.fields() {
                    if CAR_DETAILS.contains(&field) && !state.answers().mobility.has_car {
                        continue;
                    }
                    let _ = writeln!(out, "{}", field_line(field, &state.answers().get(field)));
                }
            }
            None => out.push_str(&render_result_page(state)),
        }

        out.push('\n');
        out.push_str(&render_status_bar(&nav_hints(state)));
        out
    }

    fn render_help(&self) -> String {
        let mut out = String::from(
            "Commands:\n  n / next       next step (calculates before the result)\n  \
             b / back       previous step\n  r / restart    start over\n  \
             <field> <value> or set <field> <value>\n  q / quit\n",
        );
        if let Some(category) = self.wizard.current_step().category() {
            let _ = writeln!(out, "\nFields on this page:");
            for field in category.fields() {
                let _ = writeln!(out, "  {:<26} {}", field.name(), control_hint(&field.control()));
            }
        }
        out
    }
}

fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    if let Some((name, value)) = line.split_once('=') {
        if !name.trim().contains(char::is_whitespace) {
            return (name.trim(), value.trim());
        }
    }
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}

fn with_notice(page: String, notice: &str) -> String {
    format!("{notice}\n\n{page}")
}

fn progress_line(current: Step) -> String {
    Step::ALL
        .iter()
        .map(|step| {
            if *step == current {
                format!("[{}]", step.label())
            } else {
                step.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ▸ ")
}

fn field_line(field: Field, value: &Answer) -> String {
    format!(
        "  {:<26} {:<12} {}",
        field.name(),
        value.to_string(),
        control_hint(&field.control())
    )
}

fn control_hint(control: &Control) -> String {
    match control {
        Control::Choice(options) => options.join(" | "),
        Control::Toggle => "yes | no".to_string(),
        Control::Slider(range) => format!("{}..{}", range.start(), range.end()),
        Control::OptionalNumber => "number or none".to_string(),
    }
}

fn nav_hints(state: &WizardState) -> Vec<KeyHint> {
    let mut nav = Vec::new();
    if !state.is_first_step() {
        nav.push(hints::BACK);
    }
    if state.is_terminal_step() {
        nav.push(hints::RESTART);
        if state.is_authenticated() {
            nav.push(hints::LOGOUT);
        } else {
            nav.push(hints::LOGIN);
        }
    } else {
        nav.push(if state.is_before_terminal() {
            hints::CALCULATE
        } else {
            hints::NEXT
        });
        nav.push(hints::SET);
    }
    nav.push(hints::HELP);
    nav.push(hints::QUIT);
    nav
}

fn render_result_page(state: &WizardState) -> String {
    if state.is_loading() {
        return "Calculating your footprint…\n".to_string();
    }
    if let Some(err) = state.error() {
        return format!(
            "Calculation failed: {err}\nGo back with b and press n to try again.\n"
        );
    }
    let Some(result) = state.result() else {
        return String::new();
    };

    let mut out = render_result(result);
    if let Some(celebration) = state.celebration() {
        let name = celebration
            .challenge_name
            .as_deref()
            .unwrap_or(&celebration.challenge_id);
        let _ = writeln!(out, "\n🎉 Challenge \"{name}\" completed: +{} XP", celebration.xp);
    }
    out.push('\n');
    if state.is_authenticated() {
        out.push_str("✅ Your footprint was saved to your profile.\n");
    } else {
        out.push_str("🌱 Sign in to save your result and start challenges.\n");
    }
    out
}

/// Result summary: total, score, breakdown, comparison and recommendations.
pub fn render_result(result: &FootprintResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Your footprint: {} CO₂e per year",
        format_tonnes(result.total_co2_kg_year)
    );
    if let Some(score) = result.sec_score {
        let _ = writeln!(out, "SEC score: {score:.1}/10 ({})", ScoreBand::of(score).label());
    }

    let b = &result.breakdown;
    let _ = writeln!(out, "\nBreakdown");
    let categories = [b.housing_kg, b.mobility_kg, b.nutrition_kg, b.consumption_kg];
    for ((name, percent), kg) in b.shares().into_iter().zip(categories) {
        let _ = writeln!(
            out,
            "  {:<12} {} {:>5.1}%  {}",
            name,
            bar(percent, BAR_WIDTH),
            percent,
            format_kg(kg)
        );
    }

    let c = &result.comparison;
    let _ = writeln!(out, "\nComparison");
    let rows = [
        ("You", result.total_co2_kg_year, None),
        ("Germany", c.germany_average_kg, Some(c.vs_germany_percent)),
        ("World", c.world_average_kg, Some(c.vs_world_percent)),
        ("Paris target", c.paris_target_kg, Some(c.vs_paris_percent)),
    ];
    for (label, kg, delta) in rows {
        let _ = write!(
            out,
            "  {:<12} {} {:>7}",
            label,
            bar(comparison_fill(kg), BAR_WIDTH),
            format_tonnes(kg)
        );
        if let Some(delta) = delta {
            let _ = write!(out, "  (you {})", format_delta(delta));
        }
        out.push('\n');
    }

    if !result.recommendations.is_empty() {
        let _ = writeln!(out, "\nRecommendations");
        for (i, rec) in result.recommendations.iter().enumerate() {
            let _ = write!(
                out,
                "  {}. [{}] {}, saves {}/year ({})",
                i + 1,
                rec.category,
                rec.action,
                format_kg(rec.potential_savings_kg),
                rec.difficulty.label()
            );
            if let Some(challenge) = &rec.challenge_id {
                let _ = write!(out, " → challenge {challenge}");
            }
            out.push('\n');
        }
    }
    out
}
