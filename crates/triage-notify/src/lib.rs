//! Delivery of the analyzed-issue digest to chat and email sinks.
//!
//! Each sink is an `IssueNotifier`; rendering lives apart from transport so
//! payloads can be inspected without a network.

pub mod email_api_client;
pub mod email_render;
pub mod notifier;
pub mod slack_blocks;
pub mod slack_webhook;

pub use email_api_client::{
    EmailNotifier, EmailNotifierConfig, DEFAULT_EMAIL_API_BASE, DEFAULT_FROM_EMAIL,
};
pub use notifier::{IssueDigest, IssueNotifier, NotifyOutcome};
pub use slack_webhook::SlackWebhookNotifier;

#[cfg(test)]
pub(crate) mod test_support;
