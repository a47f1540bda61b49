use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An assistant event that can trigger a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookEvent {
    /// The assistant finished responding.
    Stop,
    /// The assistant needs attention (permission prompt, question).
    Notification,
    /// Context limit reached, auto-compaction triggered.
    Limit,
}

impl HookEvent {
    /// Display order.
    pub const ALL: [HookEvent; 3] = [HookEvent::Stop, HookEvent::Notification, HookEvent::Limit];

    pub fn name(self) -> &'static str {
        match self {
            HookEvent::Stop => "stop",
            HookEvent::Notification => "notification",
            HookEvent::Limit => "limit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            HookEvent::Stop => "Task complete - the assistant finishes responding",
            HookEvent::Notification => "Needs attention - permission prompts, questions",
            HookEvent::Limit => "Context limit - auto-compaction triggered",
        }
    }

    /// Hook type key in the assistant's settings file.
    pub fn hook_type(self) -> &'static str {
        match self {
            HookEvent::Stop => "Stop",
            HookEvent::Notification => "Notification",
            HookEvent::Limit => "PreCompact",
        }
    }

    /// Matcher value for the hook entry.
    pub fn matcher(self) -> &'static str {
        match self {
            HookEvent::Limit => "auto",
            _ => "",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized event name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event: {0} (expected stop, notification or limit)")]
pub struct UnknownEvent(pub String);

impl FromStr for HookEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HookEvent::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}
