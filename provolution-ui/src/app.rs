//! Command dispatch for the `provolution` binary.
//!
//! [`App`] wires one [`ApiClient`] and one [`EventBus`] together and hands
//! them to the views. One-shot commands return their rendered text from
//! [`App::execute`]; the wizard runs as a line loop in [`App::run_wizard`].

use std::fmt::Write as _;
use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Subcommand, ValueEnum};
use provolution_core::{ChallengeFilter, EventBus, LeaderboardScope, RegisterRequest};
use provolution_http::{ApiClient, Session};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::logging;
use crate::views::{
    AuthView, ChallengesView, LeaderboardView, ViewOutcome, WizardServices, WizardView,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Period {
    Weekly,
    Monthly,
    Regional,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Walk through the footprint questionnaire (default).
    Wizard,

    /// Sign in and keep the token for later runs.
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in.
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        postal_code: Option<String>,
        #[arg(long)]
        referral_code: Option<String>,
    },

    /// Forget the stored token.
    Logout,

    /// Show the signed-in profile.
    Whoami,

    /// List challenges.
    Challenges {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        /// Only the challenges you are taking part in.
        #[arg(long)]
        active: bool,
    },

    /// Join a challenge.
    Join { id: String },

    /// Mark a challenge as completed.
    Complete { id: String },

    /// Show a leaderboard.
    Leaderboard {
        #[arg(value_enum, default_value = "weekly")]
        period: Period,
        /// Region for the regional board; defaults to `default_region`.
        #[arg(long)]
        region: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Show the emission factors the server calculates with.
    Factors,

    /// Check that the API is reachable.
    Health,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wizard => "wizard",
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Challenges { .. } => "challenges",
            Self::Join { .. } => "join",
            Self::Complete { .. } => "complete",
            Self::Leaderboard { .. } => "leaderboard",
            Self::Factors => "factors",
            Self::Health => "health",
        }
    }
}

pub struct App {
    config: AppConfig,
    client: Arc<ApiClient>,
    events: EventBus,
}

impl App {
    /// Restore the session from the token file and build the client.
    pub fn build(config: AppConfig) -> Result<Self> {
        let session = match config.token_path() {
            Some(path) => Session::with_file(path)?,
            None => Session::in_memory(),
        };
        let events = EventBus::new();
        let client = ApiClient::new(config.api_config(), Arc::new(session), events.clone())
            .context("failed to build API client")?;
        info!(
            api = %config.api_url,
            authenticated = client.is_authenticated(),
            "client ready"
        );
        Ok(Self {
            config,
            client: Arc::new(client),
            events,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Wizard => {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                self.run_wizard(stdin, std::io::stdout()).await
            }
            command => {
                let text = self.execute(command).await?;
                let mut stdout = std::io::stdout();
                write!(stdout, "{text}")?;
                if !text.ends_with('\n') {
                    writeln!(stdout)?;
                }
                stdout.flush()?;
                Ok(())
            }
        }
    }

    /// Run a one-shot command and return its output.
    pub async fn execute(&self, command: Command) -> Result<String> {
        debug!(command = command.name(), "executing");
        let auth = AuthView::new(&self.client, &self.events);
        let challenges = ChallengesView::new(&self.client, &self.events);

        let text = match command {
            Command::Wizard => bail!("the wizard is interactive; use `provolution wizard`"),
            Command::Login { email, password } => auth.login(&email, &password).await?,
            Command::Register {
                username,
                email,
                password,
                display_name,
                region,
                postal_code,
                referral_code,
            } => {
                let request = RegisterRequest {
                    username,
                    email,
                    password,
                    display_name,
                    region,
                    postal_code,
                    referral_code,
                };
                auth.register(&request).await?
            }
            Command::Logout => auth.logout(),
            Command::Whoami => auth.whoami().await?,
            Command::Challenges {
                category,
                difficulty,
                status,
                limit,
                offset,
                active,
            } => {
                if active {
                    challenges.active().await?
                } else {
                    let filter = ChallengeFilter {
                        category,
                        difficulty,
                        status,
                        limit,
                        offset,
                    };
                    challenges.list(&filter).await?
                }
            }
            Command::Join { id } => challenges.join(&id).await?,
            Command::Complete { id } => challenges.complete(&id).await?,
            Command::Leaderboard {
                period,
                region,
                limit,
            } => {
                let scope = match period {
                    Period::Weekly => LeaderboardScope::Weekly,
                    Period::Monthly => LeaderboardScope::Monthly,
                    Period::Regional => LeaderboardScope::Regional(
                        region.unwrap_or_else(|| self.config.default_region.clone()),
                    ),
                };
                LeaderboardView::new(&self.client).show(&scope, limit).await?
            }
            Command::Factors => {
                let factors = self.client.emission_factors().await?;
                let mut out = format!(
                    "Emission factors v{} ({} entries)\n",
                    factors.version,
                    factors.factors.len()
                );
                for source in &factors.sources {
                    let _ = writeln!(out, "  {} <{}>", source.name, source.url);
                }
                if let Some(note) = &factors.note {
                    let _ = writeln!(out, "{note}");
                }
                out
            }
            Command::Health => {
                let url = &self.client.config().base_url;
                if !self.client.health().await {
                    bail!("{} API is not reachable at {url}", self.config.app_name);
                }
                format!("{} API is reachable at {url}\n", self.config.app_name)
            }
        };
        Ok(text)
    }

    /// Run the wizard over line input until `q` or end of input.
    ///
    /// `login`, `logout`, `whoami` and `log <level>` are handled here; every
    /// other line goes to the wizard view. Auth changes reach the wizard
    /// through the bus.
    pub async fn run_wizard<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        // Log lines would interleave with the pages.
        let quiet_console = self.config.log_file.is_some();
        if quiet_console {
            if let Err(err) = logging::set_console_enabled(false) {
                debug!(error = %err, "console logging left as is");
            }
        }

        let services = WizardServices {
            footprint: self.client.clone(),
            challenges: Some(self.client.clone()),
        };
        let authenticated = self.client.is_authenticated();
        let mut view = WizardView::mount(services, self.events.clone(), authenticated);
        writeln!(output, "{}", view.render())?;
        output.flush()?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let outcome = match self.intercept(line.trim()).await {
                Some(text) => ViewOutcome::Show(text),
                None => view.handle_command(&line).await,
            };
            match outcome {
                ViewOutcome::Quit => break,
                ViewOutcome::Show(text) => writeln!(output, "{text}")?,
            }
            if view.sync_events().await {
                writeln!(output, "{}", view.render())?;
            }
            output.flush()?;
        }

        view.unmount();
        if quiet_console {
            let _ = logging::set_console_enabled(true);
        }
        Ok(())
    }

    /// Session and logging commands available inside the wizard.
    async fn intercept(&self, line: &str) -> Option<String> {
        let mut words = line.split_whitespace();
        let auth = AuthView::new(&self.client, &self.events);

        let text = match (words.next()?, words.next(), words.next()) {
            ("login", Some(email), Some(password)) => match auth.login(email, password).await {
                Ok(text) => text,
                Err(err) => {
                    warn!(error = %err, "login failed");
                    format!("Login failed: {err}")
                }
            },
            ("login", _, _) => "Usage: login <email> <password>".to_string(),
            ("logout", None, _) => auth.logout(),
            ("whoami", None, _) => auth
                .whoami()
                .await
                .unwrap_or_else(|err| format!("Could not load profile: {err}")),
            ("log", Some(level), None) => match logging::set_log_level(level) {
                Ok(()) => format!("Log level set to {level}."),
                Err(err) => err.to_string(),
            },
            _ => return None,
        };
        Some(text)
    }
}
