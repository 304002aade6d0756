//! Browser Install Targets
//!
//! The install chooser offers one store link per supported browser. Both
//! builds carry the same feature set.

use serde::{Deserialize, Serialize};

/// Supported browsers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Chrome,
    Firefox,
}

impl Browser {
    pub fn display_name(&self) -> &str {
        match self {
            Browser::Chrome => "Google Chrome",
            Browser::Firefox => "Mozilla Firefox",
        }
    }
}

/// One entry in the install chooser
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstallTarget {
    pub browser: Browser,
    /// Store description line shown under the browser name
    pub description: String,
    pub url: String,
}

impl InstallTarget {
    /// The shipping install targets, in display order.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self {
                browser: Browser::Chrome,
                description: "Install from Chrome Web Store".into(),
                url: "https://chromewebstore.google.com/detail/extension?utm_source=portal".into(),
            },
            Self {
                browser: Browser::Firefox,
                description: "Install from Firefox Add-ons".into(),
                url: "https://addons.mozilla.org/en-US/firefox/addon/extension/".into(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_cover_both_browsers() {
        let targets = InstallTarget::defaults();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].browser, Browser::Chrome);
        assert_eq!(targets[1].browser, Browser::Firefox);
    }
}
