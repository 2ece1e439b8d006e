use serde::Serialize;

use crate::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NoticeId(u64);

/// A dismissible error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: ErrorKind,
    pub message: String,
}

/// Holds at most one visible notice
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
    issued: u64,
}

impl NoticeBoard {
    /// Replaces the visible notice
    pub fn show(&mut self, kind: ErrorKind, message: impl Into<String>) -> NoticeId {
        self.issued += 1;
        let id = NoticeId(self.issued);
        self.current = Some(Notice {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Auto-hide for notice `id`. No-op if it was already dismissed or
    /// replaced.
    pub fn expire(&mut self, id: NoticeId) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
