//! Process-wide publish/subscribe bus shared by the views.
//!
//! Views never reach into each other; they publish [`AppEvent`]s and drain
//! their own [`EventSubscription`] between user commands.

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

use crate::models::User;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct XpEarned {
    pub xp: u32,
    pub challenge_id: String,
    pub challenge_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// `auth:login`, carries the signed-in user.
    Login(User),
    /// `auth:logout`
    Logout,
    /// `xp:earned`
    XpEarned(XpEarned),
}

impl AppEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "auth:login",
            Self::Logout => "auth:logout",
            Self::XpEarned(_) => "xp:earned",
        }
    }
}

/// Cheap to clone; every clone publishes into the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers and return how many there were.
    /// Publishing with nobody listening is not an error.
    pub fn publish(&self, event: AppEvent) -> usize {
        let name = event.name();
        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(event = name, receivers, "event published");
                receivers
            }
            Err(_) => {
                debug!(event = name, "event published without subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> EventSubscription {
        EventSubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EventSubscription {
    receiver: broadcast::Receiver<AppEvent>,
}

impl EventSubscription {
    /// Everything published since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "event subscriber lagged, oldest events dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        events
    }

    /// Wait for the next event; `None` once every publisher is gone.
    pub async fn recv(&mut self) -> Option<AppEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event subscriber lagged, oldest events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
