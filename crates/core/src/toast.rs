//! Toast notification state
//!
//! Rendering is left to the frontend; this module only tracks which toasts
//! exist and how long each one should stay on screen.

use serde::{Deserialize, Serialize};

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    /// How long the toast stays visible, `None` for until dismissed
    pub fn duration_ms(&self, style: &ToastStyle) -> Option<u32> {
        match self.kind {
            ToastKind::Loading => None,
            ToastKind::Success => Some(style.success_duration_ms),
            ToastKind::Error => Some(style.error_duration_ms),
        }
    }
}

/// Messages for the three phases of a tracked operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessages {
    pub loading: String,
    pub success: String,
    pub error: String,
}

impl ToastMessages {
    pub fn session_settings() -> Self {
        Self {
            loading: "Session settings are being updated...".to_string(),
            success: "Session settings have been updated successfully.".to_string(),
            error: "An error occurred while trying to update the project's session settings."
                .to_string(),
        }
    }

    pub fn for_kind(&self, kind: ToastKind) -> &str {
        match kind {
            ToastKind::Loading => &self.loading,
            ToastKind::Success => &self.success,
            ToastKind::Error => &self.error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    #[default]
    TopCenter,
    TopRight,
    BottomCenter,
    BottomRight,
}

/// Styling shared by every toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastStyle {
    pub min_width: String,
    pub position: ToastPosition,
    pub success_duration_ms: u32,
    pub error_duration_ms: u32,
}

impl Default for ToastStyle {
    fn default() -> Self {
        Self {
            min_width: "18.75rem".to_string(),
            position: ToastPosition::default(),
            success_duration_ms: 2000,
            error_duration_ms: 4000,
        }
    }
}

/// Ordered set of visible toasts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToastQueue {
    next_id: ToastId,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> ToastId {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    pub fn loading(&mut self, message: impl Into<String>) -> ToastId {
        self.push(ToastKind::Loading, message)
    }

    /// Replace a toast in place, or show it again if it was dismissed meanwhile
    pub fn resolve(&mut self, id: ToastId, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) {
            toast.kind = kind;
            toast.message = message;
        } else {
            self.toasts.push(Toast { id, kind, message });
        }
    }

    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
