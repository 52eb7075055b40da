//! Messenger targets.
//!
//! A messenger is where pipeline results are reported. Selected by type name
//! like a service; field-populated by the generic field mapper.

use serde::{Deserialize, Serialize};

use crate::fields::{ConfigField, Configurable};
use crate::registry::Registry;

/// Notification sink for pipeline outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Messenger {
    /// Discards everything. Default when no messenger block is configured.
    Fake(FakeMessenger),
    /// Posts to a Slack incoming webhook.
    Slack(SlackMessenger),
}

impl Messenger {
    /// The messenger's type name, as used in configuration documents.
    pub fn kind(&self) -> &'static str {
        match self {
            Messenger::Fake(_) => "fake",
            Messenger::Slack(_) => "slack",
        }
    }
}

impl Configurable for Messenger {
    fn config_fields(&mut self) -> Vec<ConfigField<'_>> {
        match self {
            Messenger::Fake(_) => Vec::new(),
            Messenger::Slack(messenger) => messenger.config_fields(),
        }
    }
}

/// No-op messenger.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FakeMessenger;

/// Slack incoming-webhook messenger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlackMessenger {
    /// Channel posted to.
    pub channel: String,
    /// User name messages are posted as.
    pub username: String,
    /// Icon shown next to messages.
    pub icon_url: String,
    /// Incoming webhook URL.
    pub incoming_url: String,
}

impl Configurable for SlackMessenger {
    fn config_fields(&mut self) -> Vec<ConfigField<'_>> {
        vec![
            ConfigField::plain("channel", &mut self.channel),
            ConfigField::plain("username", &mut self.username),
            ConfigField::plain("icon_url", &mut self.icon_url),
            ConfigField::substituted("incoming_url", &mut self.incoming_url),
        ]
    }
}

/// The default messenger registry: `fake` and `slack`.
pub fn registry() -> Registry<Messenger> {
    let mut registry = Registry::new("messenger");
    registry.register("fake", || Messenger::Fake(FakeMessenger));
    registry.register("slack", || Messenger::Slack(SlackMessenger::default()));
    registry
}
