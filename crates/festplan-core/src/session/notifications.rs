//! Outbound notifications: what the view shows as toasts.

use std::fmt;

use serde::Serialize;

use super::timers::TimerHandle;

/// Most notifications kept at once; older ones are evicted.
pub const MAX_ACTIVE: usize = 4;

/// Display duration when none is given.
pub const DEFAULT_DURATION_MS: u64 = 2400;

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    #[default]
    Default,
    Success,
    Danger,
}

/// What a notification's action button undoes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UndoAction {
    /// Put a single removed set back into the plan
    #[serde(rename_all = "camelCase")]
    RestoreSet { set_id: String, band_name: String },

    /// Replace the plan with the snapshot taken before clearing it
    RestorePlan { snapshot: Vec<String> },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NotificationAction {
    pub label: String,
    pub undo: UndoAction,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
    pub variant: NotificationVariant,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<NotificationAction>,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.variant {
            NotificationVariant::Default => "•",
            NotificationVariant::Success => "✓",
            NotificationVariant::Danger => "✗",
        };
        match &self.title {
            Some(title) => write!(f, "{icon} **{title}**: {}", self.message)?,
            None => write!(f, "{icon} {}", self.message)?,
        }
        if let Some(action) = &self.action {
            write!(f, " [{}]", action.label)?;
        }
        Ok(())
    }
}

/// A notification before it is assigned an ID.
#[derive(Debug, Clone)]
pub struct NewNotification {
    title: Option<String>,
    message: String,
    variant: NotificationVariant,
    duration_ms: u64,
    action: Option<NotificationAction>,
}

impl NewNotification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            variant: NotificationVariant::Default,
            duration_ms: DEFAULT_DURATION_MS,
            action: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_variant(mut self, variant: NotificationVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_undo(mut self, undo: UndoAction) -> Self {
        self.action = Some(NotificationAction {
            label: "Undo".to_string(),
            undo,
        });
        self
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn build(self, id: NotificationId) -> Notification {
        Notification {
            id,
            title: self.title,
            message: self.message,
            variant: self.variant,
            duration_ms: self.duration_ms,
            action: self.action,
        }
    }
}

/// Active notifications, newest first, each paired with its auto-dismiss
/// timer.
#[derive(Default)]
pub struct NotificationCenter {
    next_id: NotificationId,
    active: Vec<(Notification, TimerHandle)>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the ID for the next notification.
    pub fn next_id(&mut self) -> NotificationId {
        self.next_id += 1;
        self.next_id
    }

    /// Adds a notification in front. Returns the timers of notifications
    /// evicted to stay within [`MAX_ACTIVE`]; the caller must cancel them.
    pub fn push(
        &mut self,
        id: NotificationId,
        draft: NewNotification,
        timer: TimerHandle,
    ) -> Vec<TimerHandle> {
        self.active.insert(0, (draft.build(id), timer));
        let keep = MAX_ACTIVE.min(self.active.len());
        self.active
            .drain(keep..)
            .map(|(_, timer)| timer)
            .collect()
    }

    /// Removes a notification, returning it with its timer.
    pub fn remove(&mut self, id: NotificationId) -> Option<(Notification, TimerHandle)> {
        let index = self.active.iter().position(|(n, _)| n.id == id)?;
        Some(self.active.remove(index))
    }

    /// Removes everything, returning the timers to cancel.
    pub fn clear(&mut self) -> Vec<TimerHandle> {
        self.active.drain(..).map(|(_, timer)| timer).collect()
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.iter().find(|n| n.id == id)
    }

    /// Active notifications, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter().map(|(n, _)| n)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::timers::Timers;

    #[test]
    fn test_push_keeps_newest_first_and_evicts() {
        let mut timers = Timers::<()>::new();
        let mut center = NotificationCenter::new();
        let mut handles = Vec::new();
        for i in 0..5 {
            let handle = timers.schedule(jiff::Timestamp::UNIX_EPOCH, ());
            handles.push(handle);
            let id = center.next_id();
            let evicted = center.push(id, NewNotification::new(format!("n{i}")), handle);
            if i < 4 {
                assert!(evicted.is_empty());
            } else {
                assert_eq!(evicted, vec![handles[0]]);
            }
        }

        let messages: Vec<_> = center.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["n4", "n3", "n2", "n1"]);
    }

    #[test]
    fn test_defaults_and_builder() {
        let mut center = NotificationCenter::new();
        let mut timers = Timers::<()>::new();
        let handle = timers.schedule(jiff::Timestamp::UNIX_EPOCH, ());
        let id = center.next_id();
        center.push(
            id,
            NewNotification::new("Removed")
                .with_title("Plan cleared")
                .with_undo(UndoAction::RestorePlan {
                    snapshot: vec!["a".to_string()],
                }),
            handle,
        );

        let n = center.get(id).unwrap();
        assert_eq!(n.duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(n.variant, NotificationVariant::Default);
        assert_eq!(n.action.as_ref().unwrap().label, "Undo");
        assert_eq!(n.to_string(), "• **Plan cleared**: Removed [Undo]");

        let (removed, timer) = center.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(timer, handle);
        assert!(center.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let mut center = NotificationCenter::new();
        let mut timers = Timers::<()>::new();
        let id = center.next_id();
        center.push(
            id,
            NewNotification::new("Night Verses")
                .with_variant(NotificationVariant::Success)
                .with_duration_ms(5000)
                .with_undo(UndoAction::RestoreSet {
                    set_id: "s1".to_string(),
                    band_name: "Night Verses".to_string(),
                }),
            timers.schedule(jiff::Timestamp::UNIX_EPOCH, ()),
        );

        let value = serde_json::to_value(center.get(id).unwrap()).unwrap();
        assert_eq!(value["variant"], "success");
        assert_eq!(value["durationMs"], 5000);
        assert!(value.get("title").is_none());
        assert_eq!(value["action"]["undo"]["kind"], "restoreSet");
        assert_eq!(value["action"]["undo"]["setId"], "s1");
    }
}
