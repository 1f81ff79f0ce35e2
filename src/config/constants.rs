// * Configuration Constants
// * Central location for static header defaults and randomization ranges

use std::ops::RangeInclusive;

// * Static header defaults (overridable through the builder)
pub const DEFAULT_ACCEPT: &str = "*/*";
pub const DEFAULT_ACCEPT_ENCODING: &str = "gzip, deflate, br, zstd";
pub const DEFAULT_SEC_FETCH_DEST: &str = "empty";
pub const DEFAULT_SEC_FETCH_MODE: &str = "cors";
pub const DEFAULT_SEC_FETCH_SITE: &str = "same-origin";
pub const DEFAULT_UPGRADE_INSECURE_REQUESTS: &str = "1";

// * Kept verbatim; the well-formed client hint would be "?0".
pub const SEC_CH_UA_MOBILE: &str = "0?";

// * Version ranges per browser family
pub const CHROMIUM_VERSIONS: RangeInclusive<u32> = 129..=131;
pub const FIREFOX_VERSIONS: RangeInclusive<u32> = 130..=132;
pub const SAFARI_VERSION: &str = "18.0";
pub const SAFARI_MAJOR: u32 = 18;

// * Opera's own build number is pinned, independent of the Chromium version
pub const OPERA_BUILD: &str = "114.0.5282.93";

// * OS tokens embedded in the User-Agent
pub const PLATFORM_WINDOWS: &str = "Windows NT 10.0; Win64; x64";
pub const PLATFORM_MAC: &str = "Macintosh; Intel Mac OS X 14_7_1";
pub const PLATFORM_LINUX: &str = "Linux x86_64";

// * Upgrade-Insecure-Requests gate: present when a uniform draw over
// * [0, UIR_SAMPLE_MAX] exceeds UIR_THRESHOLD (probability 1/81)
pub const UIR_SAMPLE_MAX: f64 = 0.81;
pub const UIR_THRESHOLD: f64 = 0.8;

// * Accept-Language generation
pub const MAX_EXTRA_LANGUAGES: usize = 3;
pub const BASE_LANGUAGES: [&str; 5] = ["en-US", "en-GB", "fr-FR", "de-DE", "es-ES"];
pub const LANGUAGES: [&str; 25] = [
    "en-US", "en-GB", "es-ES", "fr-FR", "de-DE", "zh-CN", "ja-JP", "ru-RU", "pt-BR", "it-IT",
    "ko-KR", "ar-SA", "nl-NL", "tr-TR", "pl-PL", "id-ID", "th-TH", "sv-SE", "fi-FI", "da-DK",
    "no-NO", "el-GR", "he-IL", "vi-VN", "hi-IN",
];
