//! Widget operations: fetch the roster, sign up, unregister, and bring the
//! local view back in line with the backend afterwards.
//!
//! The view lock is only held while mutating local state, never across a
//! backend call. Concurrent actions therefore race freely and whichever
//! response lands last decides what is shown.

use crate::config::ReconcilePolicy;
use crate::errors::ApiError;
use crate::models::{RemovalForm, SignupForm, StatusKind};
use crate::state::AppState;
use chrono::Local;
use tracing::{debug, error, info};

pub const GENERIC_ERROR: &str = "An error occurred";
pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const SIGNUP_INCOMPLETE: &str = "Please enter an email and choose an activity.";
const SIGNUP_DONE: &str = "Signed up successfully";

/// Fetch the full roster and rebuild. Failures replace the list with the
/// failure notice and are only logged.
pub async fn refresh(state: &AppState) {
    match state.api.fetch_roster().await {
        Ok(roster) => {
            let count = roster.len();
            state.view.lock().await.roster.replace(roster, Local::now());
            debug!("roster refreshed with {count} activities");
        }
        Err(err) => {
            error!("error fetching activities: {err}");
            state.view.lock().await.roster.mark_failed();
        }
    }
}

pub async fn signup(state: &AppState, form: SignupForm) {
    // The activity is a roster key and goes out exactly as selected.
    let email = form.email.trim().to_string();
    let activity = form.activity;

    if email.is_empty() || activity.trim().is_empty() {
        state.view.lock().await.draft = SignupForm { email, activity };
        state.status.show(SIGNUP_INCOMPLETE, StatusKind::Error).await;
        return;
    }

    match state.api.signup(&activity, &email).await {
        Ok(reply) => {
            info!("signed up {email} for {activity}");
            let message = reply
                .message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| SIGNUP_DONE.to_string());
            state.status.show(message, StatusKind::Success).await;

            match state.settings.signup_policy {
                ReconcilePolicy::OptimisticPatch => {
                    let mut view = state.view.lock().await;
                    view.draft = SignupForm::default();
                    if !view.roster.add_participant(&activity, &email) {
                        debug!("no card for {activity}, skipping signup patch");
                    }
                }
                ReconcilePolicy::FullReload => {
                    state.view.lock().await.draft = SignupForm::default();
                    refresh(state).await;
                }
            }
        }
        Err(err) => {
            let message = match &err {
                ApiError::Rejected { .. } => err.user_detail().unwrap_or(GENERIC_ERROR).to_string(),
                _ => {
                    error!("error signing up {email} for {activity}: {err}");
                    SIGNUP_FAILED.to_string()
                }
            };
            state.view.lock().await.draft = SignupForm { email, activity };
            state.status.show(message, StatusKind::Error).await;
        }
    }
}

pub async fn unregister(state: &AppState, form: RemovalForm) {
    let RemovalForm { activity, email } = form;
    if activity.is_empty() || email.is_empty() {
        debug!("ignoring removal without activity or email");
        return;
    }

    match state.api.unregister(&activity, &email).await {
        Ok(_) => {
            info!("unregistered {email} from {activity}");
            match state.settings.removal_policy {
                ReconcilePolicy::OptimisticPatch => {
                    if !state.view.lock().await.roster.remove_participant(&activity, &email) {
                        debug!("{email} not listed under {activity}, skipping removal patch");
                    }
                }
                ReconcilePolicy::FullReload => refresh(state).await,
            }
        }
        Err(err) => match err.user_detail() {
            Some(detail) => error!("unregister failed: {detail}"),
            None => error!("error unregistering participant: {err}"),
        },
    }
}
