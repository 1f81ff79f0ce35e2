// * Identity Selector
// * Picks the (browser, version, OS) triple every derived header is built from

use crate::config::constants::{
    CHROMIUM_VERSIONS, FIREFOX_VERSIONS, PLATFORM_LINUX, PLATFORM_MAC, PLATFORM_WINDOWS,
    SAFARI_MAJOR, SAFARI_VERSION,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// * Catalog entries. Each maps to exactly one OS token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Browser {
    Chrome,
    ChromeMac,
    ChromeLinux,
    Edge,
    Firefox,
    FirefoxMac,
    FirefoxLinux,
    Safari,
    Opera,
}

// * User-Agent template families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserFamily {
    Chromium,
    Edge,
    Firefox,
    Safari,
    Opera,
}

impl Browser {
    pub const ALL: [Browser; 9] = [
        Browser::Chrome,
        Browser::Opera,
        Browser::Edge,
        Browser::Firefox,
        Browser::ChromeMac,
        Browser::FirefoxMac,
        Browser::ChromeLinux,
        Browser::FirefoxLinux,
        Browser::Safari,
    ];

    pub fn family(self) -> BrowserFamily {
        match self {
            Browser::Chrome | Browser::ChromeMac | Browser::ChromeLinux => BrowserFamily::Chromium,
            Browser::Edge => BrowserFamily::Edge,
            Browser::Firefox | Browser::FirefoxMac | Browser::FirefoxLinux => BrowserFamily::Firefox,
            Browser::Safari => BrowserFamily::Safari,
            Browser::Opera => BrowserFamily::Opera,
        }
    }

    /// Raw OS token embedded between the User-Agent parentheses.
    pub fn platform_string(self) -> &'static str {
        match self {
            Browser::Chrome | Browser::Edge | Browser::Firefox | Browser::Opera => PLATFORM_WINDOWS,
            Browser::ChromeMac | Browser::FirefoxMac | Browser::Safari => PLATFORM_MAC,
            Browser::ChromeLinux | Browser::FirefoxLinux => PLATFORM_LINUX,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::ChromeMac => "chrome-mac",
            Browser::ChromeLinux => "chrome-linux",
            Browser::Edge => "edge",
            Browser::Firefox => "firefox",
            Browser::FirefoxMac => "firefox-mac",
            Browser::FirefoxLinux => "firefox-linux",
            Browser::Safari => "safari",
            Browser::Opera => "opera",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BrowserFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BrowserFamily::Chromium => "chromium",
            BrowserFamily::Edge => "edge",
            BrowserFamily::Firefox => "firefox",
            BrowserFamily::Safari => "safari",
            BrowserFamily::Opera => "opera",
        };
        f.write_str(name)
    }
}

// * Immutable identity triple. Derived fields must never guess the browser again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrowserIdentity {
    pub browser: Browser,
    pub version: u32,
    pub platform_string: &'static str,
}

impl BrowserIdentity {
    /// Builds the identity for a fixed catalog entry, drawing its version.
    pub fn for_browser<R: Rng + ?Sized>(browser: Browser, rng: &mut R) -> Self {
        let version = match browser.family() {
            BrowserFamily::Chromium | BrowserFamily::Edge | BrowserFamily::Opera => {
                rng.gen_range(CHROMIUM_VERSIONS)
            }
            BrowserFamily::Firefox => rng.gen_range(FIREFOX_VERSIONS),
            BrowserFamily::Safari => SAFARI_MAJOR,
        };

        Self {
            browser,
            version,
            platform_string: browser.platform_string(),
        }
    }

    pub fn family(&self) -> BrowserFamily {
        self.browser.family()
    }

    /// Version as it appears in header values ("130", or "18.0" for Safari).
    pub fn version_label(&self) -> String {
        match self.family() {
            BrowserFamily::Safari => SAFARI_VERSION.to_string(),
            _ => self.version.to_string(),
        }
    }
}

// * Uniform draw over the 9 catalog entries.
pub fn select_identity<R: Rng + ?Sized>(rng: &mut R) -> BrowserIdentity {
    // * ALL is non-empty, so choose always yields an entry
    let browser = *Browser::ALL.choose(rng).unwrap_or(&Browser::Chrome);
    let identity = BrowserIdentity::for_browser(browser, rng);
    tracing::debug!(
        browser = %identity.browser,
        version = identity.version,
        "Selected browser identity"
    );
    identity
}
