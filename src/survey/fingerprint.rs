//! Device fingerprint used as the per-submission identity token
//!
//! The token is a loose grouping hint, not an identity guarantee: two devices with
//! identical screen, locale and platform share a fingerprint.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Token used when the client sent no fingerprint
pub const ANONYMOUS_FINGERPRINT: &str = "anonymous";

const FINGERPRINT_HEX_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFingerprint {
    pub screen_width: u32,
    pub screen_height: u32,
    pub pixel_ratio: f64,
    pub timezone: String,
    pub language: String,
    pub platform: String,
}

impl DeviceFingerprint {
    /// Canonical `component:value` string that gets hashed
    pub fn components(&self) -> String {
        [
            format!("screen:{}x{}", self.screen_width, self.screen_height),
            format!("pixelRatio:{}", self.pixel_ratio),
            format!("tz:{}", self.timezone),
            format!("lang:{}", self.language),
            format!("platform:{}", self.platform),
        ]
        .join("|")
    }

    /// First 16 hex chars of the SHA-256 of [`DeviceFingerprint::components`]
    pub fn hash(&self) -> String {
        let digest = Sha256::digest(self.components().as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(FINGERPRINT_HEX_LEN);
        encoded
    }
}
