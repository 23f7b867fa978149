use crate::models::{StatusKind, StatusMessage};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;

/// The single status line under the signup form.
///
/// Each `show` arms its own one-shot hide timer. Timers are never cancelled,
/// so an older timer can hide a newer message early.
#[derive(Clone)]
pub struct StatusBoard {
    current: Arc<Mutex<Option<StatusMessage>>>,
    hide_after: Duration,
}

impl StatusBoard {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            hide_after,
        }
    }

    pub async fn show(&self, text: impl Into<String>, kind: StatusKind) {
        *self.current.lock().await = Some(StatusMessage {
            text: text.into(),
            kind,
            visible: true,
        });

        let current = Arc::clone(&self.current);
        let delay = self.hide_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(message) = current.lock().await.as_mut() {
                message.visible = false;
            }
        });
    }

    pub async fn current(&self) -> Option<StatusMessage> {
        self.current.lock().await.clone()
    }

    pub async fn visible(&self) -> Option<StatusMessage> {
        self.current().await.filter(|message| message.visible)
    }
}
