//! User profile state.
//!
//! Held in memory only; avatar and cover photo arrive as base64 data
//! URIs from the settings screen.

use log::info;
use std::sync::{Arc, Mutex};

use shared::UserProfile;

/// Profile service holding the signed-in user's profile
#[derive(Clone)]
pub struct ProfileService {
    profile: Arc<Mutex<UserProfile>>,
}

impl ProfileService {
    /// Create a new ProfileService instance with the default profile
    pub fn new() -> Self {
        Self {
            profile: Arc::new(Mutex::new(UserProfile::default())),
        }
    }

    /// Snapshot of the current profile
    pub fn get_profile(&self) -> UserProfile {
        self.lock_profile().clone()
    }

    /// Replace the whole profile with the submitted form state
    pub fn update_profile(&self, profile: UserProfile) -> UserProfile {
        let mut current = self.lock_profile();
        *current = profile;
        info!("👤 PROFILE: Updated profile for {}", current.name);
        current.clone()
    }

    fn lock_profile(&self) -> std::sync::MutexGuard<'_, UserProfile> {
        match self.profile.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for ProfileService {
    fn default() -> Self {
        Self::new()
    }
}
