use crate::api::BackendClient;
use crate::config::Settings;
use crate::models::SignupForm;
use crate::roster::RosterState;
use crate::status::StatusBoard;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything the widget renders, behind one lock. Shared by every request:
/// the widget serves a single viewer.
#[derive(Debug, Default)]
pub struct WidgetView {
    pub roster: RosterState,
    pub draft: SignupForm,
}

#[derive(Clone)]
pub struct AppState {
    pub api: BackendClient,
    pub settings: Settings,
    pub view: Arc<Mutex<WidgetView>>,
    pub status: StatusBoard,
}

impl AppState {
    pub fn new(api: BackendClient, settings: Settings) -> Self {
        Self {
            api,
            settings,
            view: Arc::new(Mutex::new(WidgetView::default())),
            status: StatusBoard::new(settings.status_hide_after),
        }
    }
}
