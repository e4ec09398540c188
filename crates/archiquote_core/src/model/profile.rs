//! Organization profile singleton.

use serde::{Deserialize, Serialize};

const DEFAULT_COMPANY_NAME: &str = "YEATZ ARCH+STUDIO";
const DEFAULT_COMPANY_ADDRESS: &str =
    "1738, Jalan Gajah 11, Kampung Kubu Gajah, 40160 Sungai Buloh, Selangor";
const DEFAULT_SENDER_TITLE: &str = "Project Manager";

/// Company details printed on every document.
///
/// Exactly one profile exists per store. Updates replace it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub company_name: String,
    pub company_address: String,
    pub default_sender_name: String,
    pub default_sender_title: String,
    /// Logo location or encoded image; empty means the built-in logo.
    pub logo_url: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            company_address: DEFAULT_COMPANY_ADDRESS.to_string(),
            default_sender_name: String::new(),
            default_sender_title: DEFAULT_SENDER_TITLE.to_string(),
            logo_url: String::new(),
        }
    }
}
