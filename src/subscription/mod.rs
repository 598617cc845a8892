//! Newsletter subscription form state.
//!
//! The controller only tracks state. It never performs I/O; the render
//! layer reads [`SubscriptionState`] and feeds back input and submit events.

pub mod email;

pub use email::is_valid_email;

use tracing::debug;

pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Invalid,
    /// Terminal for this form instance.
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubscriptionState {
    pub email_input: String,
    pub phase: Phase,
    /// Validation text while `Invalid`, confirmation text once `Confirmed`,
    /// empty otherwise.
    pub message: String,
}

#[derive(Debug, Default)]
pub struct SubscriptionController {
    state: SubscriptionState,
}

impl SubscriptionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubscriptionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// False once confirmed; the form should stop offering its input.
    pub fn accepts_input(&self) -> bool {
        self.state.phase != Phase::Confirmed
    }

    pub fn validation_message(&self) -> Option<&str> {
        match self.state.phase {
            Phase::Invalid if !self.state.message.is_empty() => {
                Some(self.state.message.as_str())
            }
            _ => None,
        }
    }

    pub fn confirmation_message(&self) -> Option<&str> {
        match self.state.phase {
            Phase::Confirmed => Some(self.state.message.as_str()),
            _ => None,
        }
    }

    /// Store the edited text. A pending validation message is cleared right
    /// away rather than re-validating.
    pub fn on_input_change(&mut self, text: impl Into<String>) {
        if !self.accepts_input() {
            debug!("Ignoring input change on confirmed subscription");
            return;
        }

        self.state.email_input = text.into();
        if self.state.phase == Phase::Invalid {
            self.state.phase = Phase::Idle;
            self.state.message.clear();
        }
    }

    /// Validate the stored input and move to `Invalid` or `Confirmed`.
    pub fn on_submit(&mut self) -> Phase {
        if !self.accepts_input() {
            debug!("Ignoring submit on confirmed subscription");
            return self.state.phase;
        }

        if is_valid_email(&self.state.email_input) {
            self.state.phase = Phase::Confirmed;
            self.state.message = format!(
                "Thank you for subscribing with email: {}",
                self.state.email_input
            );
        } else {
            self.state.phase = Phase::Invalid;
            self.state.message = INVALID_EMAIL_MESSAGE.to_string();
        }

        self.state.phase
    }
}
