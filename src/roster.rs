use crate::models::{ActivityCard, Listing, Roster};
use chrono::{DateTime, Local};

/// Structured client-side copy of the roster. Rendered markup is derived from
/// this, never read back.
#[derive(Debug, Clone)]
pub struct RosterState {
    listing: Listing,
    roster: Roster,
    options: Vec<String>,
    fetched_at: Option<DateTime<Local>>,
}

impl Default for RosterState {
    fn default() -> Self {
        Self {
            listing: Listing::Loading,
            roster: Roster::new(),
            options: Vec::new(),
            fetched_at: None,
        }
    }
}

impl RosterState {
    pub fn listing(&self) -> Listing {
        self.listing
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        self.fetched_at
    }

    /// Rebuild from a fresh fetch. Calling it twice with the same roster
    /// yields the same state.
    pub fn replace(&mut self, roster: Roster, at: DateTime<Local>) {
        self.options = roster.keys().cloned().collect();
        self.roster = roster;
        self.listing = Listing::Loaded;
        self.fetched_at = Some(at);
    }

    /// The list area shows the failure notice; the selector keeps its options.
    pub fn mark_failed(&mut self) {
        self.roster.clear();
        self.listing = Listing::Failed;
    }

    pub fn add_participant(&mut self, activity: &str, email: &str) -> bool {
        if self.listing != Listing::Loaded {
            return false;
        }
        match self.roster.get_mut(activity) {
            Some(record) => {
                record.participants.push(email.to_string());
                true
            }
            None => false,
        }
    }

    pub fn remove_participant(&mut self, activity: &str, email: &str) -> bool {
        if self.listing != Listing::Loaded {
            return false;
        }
        let Some(record) = self.roster.get_mut(activity) else {
            return false;
        };
        match record.participants.iter().position(|p| p == email) {
            Some(index) => {
                record.participants.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn cards(&self) -> Vec<ActivityCard> {
        self.roster
            .iter()
            .map(|(name, record)| ActivityCard {
                name: name.clone(),
                description: record.description.clone(),
                schedule: record.schedule.clone(),
                max_participants: record.max_participants,
                spots_left: record.spots_left(),
                participants: record.participants.clone(),
            })
            .collect()
    }
}
