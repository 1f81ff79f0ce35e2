// * Derived-Field Synthesizer
// * Every value here is a pure function of the BrowserIdentity, except
// * Accept-Language and the Upgrade-Insecure-Requests gate which draw from the rng.

use crate::config::constants::{
    BASE_LANGUAGES, LANGUAGES, MAX_EXTRA_LANGUAGES, OPERA_BUILD, UIR_SAMPLE_MAX, UIR_THRESHOLD,
};
use crate::network::identity::{BrowserFamily, BrowserIdentity};
use rand::seq::SliceRandom;
use rand::Rng;

// * Builds the User-Agent from one of five templates.
pub fn user_agent(identity: &BrowserIdentity) -> String {
    let os = identity.platform_string;
    let v = identity.version_label();

    match identity.family() {
        BrowserFamily::Chromium => chromium_user_agent(os, &v),
        BrowserFamily::Edge => format!("{} Edg/{}.0.0.0", chromium_user_agent(os, &v), v),
        BrowserFamily::Firefox => format!(
            "Mozilla/5.0 ({}; rv:{}.0) Gecko/20100101 Firefox/{}.0",
            os, v, v
        ),
        BrowserFamily::Safari => format!(
            "Mozilla/5.0 ({}) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/{} Safari/605.1.15",
            os, v
        ),
        BrowserFamily::Opera => format!("{} OPR/{}", chromium_user_agent(os, &v), OPERA_BUILD),
    }
}

fn chromium_user_agent(os: &str, version: &str) -> String {
    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{}.0.0.0 Safari/537.36",
        os, version
    )
}

/// Derives Sec-Ch-Ua by inspecting the already-built User-Agent.
///
/// Tokens are checked in priority order: `Edg`, `Chrome`, `Firefox`, `Safari`,
/// then a case-insensitive `opr`. Firefox and Safari do not send client hints,
/// so `None` is returned for them.
pub fn sec_ch_ua(user_agent: &str, version: &str) -> Option<String> {
    if user_agent.contains("Edg") {
        Some(format!(
            r#""Chromium";v="{v}", "Microsoft Edge";v="{v}", "Not;A=Brand";v="99""#,
            v = version
        ))
    } else if user_agent.contains("Chrome") {
        Some(format!(
            r#""Chromium";v="{v}", "Google Chrome";v="{v}", "Not;A=Brand";v="99""#,
            v = version
        ))
    } else if user_agent.contains("Firefox") || user_agent.contains("Safari") {
        None
    } else if user_agent.to_lowercase().contains("opr") {
        Some(format!(
            r#""Chromium";v="{v}", "Opera GX";v="{v}", "Not;A=Brand";v="24""#,
            v = version
        ))
    } else {
        Some(format!(
            r#""Chromium";v="{v}", "Not;A=Brand";v="99""#,
            v = version
        ))
    }
}

// * Maps the OS token to a quoted Sec-Ch-Ua-Platform value.
pub fn sec_ch_ua_platform(platform_string: &str) -> String {
    let platform = if platform_string.contains("Macintosh") {
        "macOS"
    } else if platform_string.contains("Windows") {
        "Windows"
    } else if platform_string.contains("Linux") {
        "Linux"
    } else {
        "Unknown"
    };
    format!("\"{}\"", platform)
}

/// Generates an Accept-Language value such as `en-US,en;q=0.9,ja-JP;q=0.8`.
///
/// The base locale also advertises its bare language subtag at the same
/// quality. Extra languages are sampled without replacement from the full
/// catalog, independently of the base, so the base may appear twice.
pub fn accept_language<R: Rng + ?Sized>(rng: &mut R) -> String {
    let base = *BASE_LANGUAGES.choose(rng).unwrap_or(&BASE_LANGUAGES[0]);
    let extra_count = rng.gen_range(0..=MAX_EXTRA_LANGUAGES);

    let chosen = std::iter::once(base).chain(LANGUAGES.choose_multiple(rng, extra_count).copied());

    let fragments: Vec<String> = chosen
        .enumerate()
        .map(|(i, lang)| {
            let q = quality(i);
            match (i, lang.split_once('-')) {
                (0, Some((primary, _))) => format!("{},{};q={:.1}", lang, primary, q),
                _ => format!("{};q={:.1}", lang, q),
            }
        })
        .collect();

    fragments.join(",")
}

// * 0.9, 0.8, 0.7, ... rounded to one decimal
fn quality(position: usize) -> f64 {
    ((9 - position as i64) as f64 / 10.0).max(0.1)
}

// * True with probability 1/81: uniform over [0, 0.81] must exceed 0.8.
pub fn upgrade_insecure_requests_gate<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_range(0.0..=UIR_SAMPLE_MAX) > UIR_THRESHOLD
}

// * Firefox is the only family that sends "TE: trailers".
pub fn sends_te_trailers(user_agent: &str) -> bool {
    user_agent.to_lowercase().contains("firefox")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::identity::Browser;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn identity(browser: Browser, version: u32) -> BrowserIdentity {
        BrowserIdentity {
            browser,
            version,
            platform_string: browser.platform_string(),
        }
    }

    #[test]
    fn test_chrome_user_agent() {
        let ua = user_agent(&identity(Browser::Chrome, 130));
        assert_eq!(
            ua,
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36"
        );
    }

    #[test]
    fn test_edge_and_opera_suffixes() {
        let edge = user_agent(&identity(Browser::Edge, 129));
        assert!(edge.ends_with(" Edg/129.0.0.0"));
        let opera = user_agent(&identity(Browser::Opera, 131));
        assert!(opera.contains("Chrome/131.0.0.0"));
        assert!(opera.ends_with(" OPR/114.0.5282.93"));
    }

    #[test]
    fn test_firefox_and_safari_user_agents() {
        let firefox = user_agent(&identity(Browser::FirefoxLinux, 132));
        assert_eq!(
            firefox,
            "Mozilla/5.0 (Linux x86_64; rv:132.0) Gecko/20100101 Firefox/132.0"
        );
        let safari = user_agent(&identity(Browser::Safari, 18));
        assert!(safari.contains("Version/18.0 Safari/605.1.15"));
        assert!(safari.contains("Macintosh"));
    }

    #[test]
    fn test_sec_ch_ua_priority() {
        let edge = user_agent(&identity(Browser::Edge, 130));
        assert!(sec_ch_ua(&edge, "130").unwrap().contains("Microsoft Edge"));

        // * Opera carries "Chrome", so it classifies as Google Chrome
        let opera = user_agent(&identity(Browser::Opera, 130));
        assert!(sec_ch_ua(&opera, "130").unwrap().contains("Google Chrome"));

        assert!(sec_ch_ua("Mozilla/5.0 Firefox/130.0", "130").is_none());
        assert!(sec_ch_ua("Mozilla/5.0 Safari/605.1.15", "18.0").is_none());
        assert_eq!(
            sec_ch_ua("Mozilla/5.0 OPR/114", "130").unwrap(),
            r#""Chromium";v="130", "Opera GX";v="130", "Not;A=Brand";v="24""#
        );
        assert_eq!(
            sec_ch_ua("curl/8.0", "130").unwrap(),
            r#""Chromium";v="130", "Not;A=Brand";v="99""#
        );
    }

    #[test]
    fn test_platform_mapping() {
        assert_eq!(sec_ch_ua_platform("Macintosh; Intel Mac OS X 14_7_1"), "\"macOS\"");
        assert_eq!(sec_ch_ua_platform("Windows NT 10.0; Win64; x64"), "\"Windows\"");
        assert_eq!(sec_ch_ua_platform("Linux x86_64"), "\"Linux\"");
        assert_eq!(sec_ch_ua_platform("PlayStation 5"), "\"Unknown\"");
    }

    #[test]
    fn test_accept_language_base_fragment() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let value = accept_language(&mut rng);
            let mut parts = value.split(',');
            let full = parts.next().unwrap();
            let bare = parts.next().unwrap();
            let (primary, _) = full.split_once('-').unwrap();
            assert_eq!(bare, format!("{};q=0.9", primary));
        }
    }

    #[test]
    fn test_quality_values() {
        assert_eq!(format!("{:.1}", quality(0)), "0.9");
        assert_eq!(format!("{:.1}", quality(3)), "0.6");
    }

    #[test]
    fn test_te_trailers_detection() {
        assert!(sends_te_trailers("Mozilla/5.0 Gecko/20100101 Firefox/131.0"));
        assert!(!sends_te_trailers("Mozilla/5.0 Chrome/131.0.0.0"));
    }
}
