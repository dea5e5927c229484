use serde::{Deserialize, Serialize};

use shared_config::ContactSettings;

/// Public contact information for the clinic landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub facebook: String,
    pub twitter: String,
    pub youtube: String,
}

impl From<&ContactSettings> for ContactDetails {
    fn from(settings: &ContactSettings) -> Self {
        Self {
            address: settings.address.clone(),
            phone: settings.phone.clone(),
            email: settings.email.clone(),
            facebook: settings.facebook.clone(),
            twitter: settings.twitter.clone(),
            youtube: settings.youtube.clone(),
        }
    }
}
