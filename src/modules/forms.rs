// Contact form with a simulated send.
// There is no backend: a valid submission reports "sending" right away and
// "sent" after a fixed delay. The delay is a ScheduledTask owned by the form,
// so resubmitting or closing the owning view cancels the pending callback.

use log::info;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::FormError;
use crate::modules::scheduler::ScheduledTask;

pub const SIMULATED_SEND_DELAY: Duration = Duration::from_secs(2);

pub const SENDING_MESSAGE: &str = "Sending message...";
pub const SENT_MESSAGE: &str = "Message sent successfully! ✓";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), FormError> {
        let missing: Vec<&'static str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum FormStatus {
    Invalid(String),
    Sending(String),
    Sent(String),
}

pub struct ContactForm {
    owner_view: Option<String>,
    delay: Duration,
    pending: Option<ScheduledTask>,
}

impl ContactForm {
    pub fn new(owner_view: Option<String>) -> Self {
        Self {
            owner_view,
            delay: SIMULATED_SEND_DELAY,
            pending: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn owner_view(&self) -> Option<&str> {
        self.owner_view.as_deref()
    }

    /// Validates and starts a simulated send. `report` receives every status
    /// change. Must be called from within a tokio runtime.
    pub fn submit<F>(&mut self, message: &ContactMessage, report: F) -> Result<(), FormError>
    where
        F: Fn(FormStatus) + Send + Sync + 'static,
    {
        if let Err(e) = message.validate() {
            report(FormStatus::Invalid(e.to_string()));
            return Err(e);
        }

        report(FormStatus::Sending(SENDING_MESSAGE.to_string()));
        // Replacing the previous task drops it, which cancels it.
        self.pending = Some(ScheduledTask::after("contact-submit", self.delay, move || {
            report(FormStatus::Sent(SENT_MESSAGE.to_string()));
        }));
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancels a pending send. Returns true if one was in flight.
    pub fn abandon(&mut self) -> bool {
        let was_pending = self.is_pending();
        if let Some(task) = self.pending.take() {
            task.cancel();
        }
        if was_pending {
            info!("[Contact] Abandoned pending submission");
        }
        was_pending
    }

    /// Abandons the pending send if `view_id` is the view that owns the form.
    pub fn abandon_if_owned_by(&mut self, view_id: &str) -> bool {
        if self.owner_view.as_deref() == Some(view_id) {
            self.abandon()
        } else {
            false
        }
    }
}
