//! Profile screen state.

use cartwheel_core::UserId;
use tracing::instrument;

use crate::models::UserProfile;
use crate::repo::UserRepository;

use super::FetchState;

/// State holder for the profile screen.
pub struct ProfileState {
    users: UserRepository,
    state: FetchState,
    profile: UserProfile,
    saved_notice: bool,
}

impl ProfileState {
    /// Create a profile state holder.
    #[must_use]
    pub fn new(users: UserRepository) -> Self {
        Self {
            users,
            state: FetchState::Idle,
            profile: UserProfile::default(),
            saved_notice: false,
        }
    }

    /// Current fetch status.
    #[must_use]
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// The fetched profile, default until loaded.
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// One-shot flag raised after a successful save.
    #[must_use]
    pub fn saved_notice(&self) -> bool {
        self.saved_notice
    }

    /// Consume the saved notice.
    pub fn acknowledge_saved(&mut self) {
        self.saved_notice = false;
    }

    /// Load the user's profile.
    ///
    /// A missing document yields the default profile rather than an error.
    #[instrument(skip(self))]
    pub async fn fetch(&mut self, user_id: &UserId) {
        self.state = FetchState::Loading;

        if user_id.is_blank() {
            self.state = FetchState::Error("User ID not available".to_string());
            return;
        }

        match self.users.profile(user_id).await {
            Ok(profile) => {
                self.profile = profile;
                self.state = FetchState::Success;
            }
            Err(e) => self.state = FetchState::Error(e.to_string()),
        }
    }

    /// Write the profile document (last write wins) and raise the one-shot
    /// saved notice.
    #[instrument(skip(self, profile), fields(user_id = %profile.id))]
    pub async fn update(&mut self, profile: &UserProfile) {
        self.state = FetchState::Loading;
        match self.users.upsert_profile(profile).await {
            Ok(()) => {
                self.saved_notice = true;
                self.state = FetchState::Success;
            }
            Err(e) => self.state = FetchState::Error(e.to_string()),
        }
    }
}
