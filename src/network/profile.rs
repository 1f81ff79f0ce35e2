// * Header-Set Assembler
// * Owns one browser identity and every header value derived from it.

use crate::config::constants::{
    DEFAULT_ACCEPT, DEFAULT_ACCEPT_ENCODING, DEFAULT_SEC_FETCH_DEST, DEFAULT_SEC_FETCH_MODE,
    DEFAULT_SEC_FETCH_SITE, DEFAULT_UPGRADE_INSECURE_REQUESTS, SEC_CH_UA_MOBILE,
};
use crate::network::derive;
use crate::network::errors::HeaderError;
use crate::network::identity::{select_identity, BrowserIdentity};
use indexmap::IndexMap;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

/// Ordered header name/value mapping.
pub type HeaderSet = IndexMap<String, String>;

/// A coherent set of browser-like request headers.
///
/// All derived values agree with the selected [`BrowserIdentity`] unless a
/// caller overrides them through the builder or [`HeaderProfile::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderProfile {
    identity: BrowserIdentity,
    user_agent: String,
    accept: String,
    accept_encoding: String,
    accept_language: String,
    sec_ch_ua: Option<String>,
    sec_ch_ua_mobile: String,
    sec_ch_ua_platform: String,
    sec_fetch_dest: String,
    sec_fetch_mode: String,
    sec_fetch_site: String,
    upgrade_insecure_requests: Option<String>,
    custom_headers: HeaderSet,
}

impl HeaderProfile {
    // * Fully randomized profile drawn from the thread-local rng.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> HeaderProfileBuilder {
        HeaderProfileBuilder::default()
    }

    /// Assembles the final header mapping from current field values.
    ///
    /// Core fields come first, then `TE` (Firefox only), `Sec-Ch-Ua` and
    /// `Upgrade-Insecure-Requests` when present. Custom headers are applied
    /// last and replace any same-named entry in place.
    pub fn headers(&self) -> HeaderSet {
        let mut headers = HeaderSet::new();
        headers.insert("Accept".into(), self.accept.clone());
        headers.insert("Accept-Encoding".into(), self.accept_encoding.clone());
        headers.insert("Accept-Language".into(), self.accept_language.clone());
        headers.insert("Sec-Ch-Ua-Mobile".into(), self.sec_ch_ua_mobile.clone());
        headers.insert("Sec-Ch-Ua-Platform".into(), self.sec_ch_ua_platform.clone());
        headers.insert("Sec-Fetch-Dest".into(), self.sec_fetch_dest.clone());
        headers.insert("Sec-Fetch-Mode".into(), self.sec_fetch_mode.clone());
        headers.insert("Sec-Fetch-Site".into(), self.sec_fetch_site.clone());
        headers.insert("User-Agent".into(), self.user_agent.clone());

        if derive::sends_te_trailers(&self.user_agent) {
            headers.insert("TE".into(), "trailers".into());
        }

        if let Some(sec_ch_ua) = &self.sec_ch_ua {
            headers.insert("Sec-Ch-Ua".into(), sec_ch_ua.clone());
        }

        if let Some(upgrade) = &self.upgrade_insecure_requests {
            headers.insert("Upgrade-Insecure-Requests".into(), upgrade.clone());
        }

        for (name, value) in &self.custom_headers {
            headers.insert(name.clone(), value.clone());
        }

        headers
    }

    /// Merges a JSON object of header overrides into the profile.
    ///
    /// Keys naming a known field (case-insensitive, `-` or `_`) overwrite that
    /// field without re-deriving anything else. All other keys go into the
    /// custom headers with their original casing. Nothing is modified when the
    /// input fails to parse.
    pub fn update(&mut self, serialized: &str) -> Result<(), HeaderError> {
        let overrides: HeaderSet = serde_json::from_str(serialized)?;

        let mut known = 0usize;
        for (key, value) in overrides {
            match KnownField::from_key(&key) {
                Some(field) => {
                    field.apply(self, value);
                    known += 1;
                }
                None => {
                    self.custom_headers.insert(key, value);
                }
            }
        }

        debug!(
            known_fields = known,
            custom_headers = self.custom_headers.len(),
            "Merged header overrides"
        );
        Ok(())
    }

    // * Discards everything, including custom headers, and draws a new identity.
    pub fn randomize(&mut self) {
        *self = Self::new();
    }

    pub fn randomize_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::builder().build_with_rng(rng);
    }

    /// Pretty-printed JSON of [`HeaderProfile::headers`], keys in assembly order.
    pub fn to_text(&self) -> String {
        serde_json::to_string_pretty(&self.headers()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Builds a fresh random profile, then applies `serialized` as overrides.
    ///
    /// Only keys present in the text are restored; everything else keeps the
    /// freshly randomized value.
    pub fn from_text(serialized: &str) -> Result<Self, HeaderError> {
        let mut profile = Self::new();
        profile.update(serialized)?;
        Ok(profile)
    }

    pub fn from_text_with_rng<R: Rng + ?Sized>(
        serialized: &str,
        rng: &mut R,
    ) -> Result<Self, HeaderError> {
        let mut profile = Self::builder().build_with_rng(rng);
        profile.update(serialized)?;
        Ok(profile)
    }

    // * Converts the assembled headers for a reqwest client.
    pub fn to_header_map(&self) -> Result<HeaderMap, HeaderError> {
        let mut map = HeaderMap::new();
        for (name, value) in self.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HeaderError::InvalidHeaderName(name.clone()))?;
            let header_value = HeaderValue::from_str(&value)
                .map_err(|_| HeaderError::InvalidHeaderValue { name: name.clone() })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    pub fn identity(&self) -> &BrowserIdentity {
        &self.identity
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn accept(&self) -> &str {
        &self.accept
    }

    pub fn accept_encoding(&self) -> &str {
        &self.accept_encoding
    }

    pub fn accept_language(&self) -> &str {
        &self.accept_language
    }

    pub fn sec_ch_ua(&self) -> Option<&str> {
        self.sec_ch_ua.as_deref()
    }

    pub fn sec_ch_ua_mobile(&self) -> &str {
        &self.sec_ch_ua_mobile
    }

    pub fn sec_ch_ua_platform(&self) -> &str {
        &self.sec_ch_ua_platform
    }

    pub fn sec_fetch_dest(&self) -> &str {
        &self.sec_fetch_dest
    }

    pub fn sec_fetch_mode(&self) -> &str {
        &self.sec_fetch_mode
    }

    pub fn sec_fetch_site(&self) -> &str {
        &self.sec_fetch_site
    }

    pub fn upgrade_insecure_requests(&self) -> Option<&str> {
        self.upgrade_insecure_requests.as_deref()
    }

    pub fn custom_headers(&self) -> &HeaderSet {
        &self.custom_headers
    }

    pub fn custom_headers_mut(&mut self) -> &mut HeaderSet {
        &mut self.custom_headers
    }
}

impl Default for HeaderProfile {
    fn default() -> Self {
        Self::new()
    }
}

// * Fields addressable by `update`. Anything else is a custom header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KnownField {
    Accept,
    AcceptEncoding,
    AcceptLanguage,
    SecChUa,
    SecChUaMobile,
    SecChUaPlatform,
    SecFetchDest,
    SecFetchMode,
    SecFetchSite,
    UpgradeInsecureRequests,
    UserAgent,
}

impl KnownField {
    fn from_key(key: &str) -> Option<Self> {
        let normalized = key.to_lowercase().replace('-', "_");
        let field = match normalized.as_str() {
            "accept" => Self::Accept,
            "accept_encoding" => Self::AcceptEncoding,
            "accept_language" => Self::AcceptLanguage,
            "sec_ch_ua" => Self::SecChUa,
            "sec_ch_ua_mobile" => Self::SecChUaMobile,
            "sec_ch_ua_platform" => Self::SecChUaPlatform,
            "sec_fetch_dest" => Self::SecFetchDest,
            "sec_fetch_mode" => Self::SecFetchMode,
            "sec_fetch_site" => Self::SecFetchSite,
            "upgrade_insecure_requests" => Self::UpgradeInsecureRequests,
            "user_agent" => Self::UserAgent,
            _ => return None,
        };
        Some(field)
    }

    fn apply(self, profile: &mut HeaderProfile, value: String) {
        match self {
            Self::Accept => profile.accept = value,
            Self::AcceptEncoding => profile.accept_encoding = value,
            Self::AcceptLanguage => profile.accept_language = value,
            Self::SecChUa => profile.sec_ch_ua = Some(value),
            Self::SecChUaMobile => profile.sec_ch_ua_mobile = value,
            Self::SecChUaPlatform => profile.sec_ch_ua_platform = value,
            Self::SecFetchDest => profile.sec_fetch_dest = value,
            Self::SecFetchMode => profile.sec_fetch_mode = value,
            Self::SecFetchSite => profile.sec_fetch_site = value,
            Self::UpgradeInsecureRequests => profile.upgrade_insecure_requests = Some(value),
            Self::UserAgent => profile.user_agent = value,
        }
    }
}

/// Optional construction arguments for [`HeaderProfile`].
///
/// Unset fields fall back to static defaults or are derived from the identity.
#[derive(Debug, Clone, Default)]
pub struct HeaderProfileBuilder {
    identity: Option<BrowserIdentity>,
    accept: Option<String>,
    accept_encoding: Option<String>,
    accept_language: Option<String>,
    sec_ch_ua: Option<String>,
    sec_ch_ua_platform: Option<String>,
    sec_fetch_dest: Option<String>,
    sec_fetch_mode: Option<String>,
    sec_fetch_site: Option<String>,
    upgrade_insecure_requests: Option<String>,
    user_agent: Option<String>,
    custom_headers: HeaderSet,
}

impl HeaderProfileBuilder {
    // * Forces the identity instead of drawing one from the catalog.
    pub fn identity(mut self, identity: BrowserIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn accept_encoding(mut self, accept_encoding: impl Into<String>) -> Self {
        self.accept_encoding = Some(accept_encoding.into());
        self
    }

    pub fn accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.accept_language = Some(accept_language.into());
        self
    }

    pub fn sec_ch_ua(mut self, sec_ch_ua: impl Into<String>) -> Self {
        self.sec_ch_ua = Some(sec_ch_ua.into());
        self
    }

    pub fn sec_ch_ua_platform(mut self, platform: impl Into<String>) -> Self {
        self.sec_ch_ua_platform = Some(platform.into());
        self
    }

    pub fn sec_fetch_dest(mut self, dest: impl Into<String>) -> Self {
        self.sec_fetch_dest = Some(dest.into());
        self
    }

    pub fn sec_fetch_mode(mut self, mode: impl Into<String>) -> Self {
        self.sec_fetch_mode = Some(mode.into());
        self
    }

    pub fn sec_fetch_site(mut self, site: impl Into<String>) -> Self {
        self.sec_fetch_site = Some(site.into());
        self
    }

    // * Replaces the default "1"; the header is still subject to the 1/81 gate.
    pub fn upgrade_insecure_requests(mut self, value: impl Into<String>) -> Self {
        self.upgrade_insecure_requests = Some(value.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn custom_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(name.into(), value.into());
        self
    }

    pub fn custom_headers(mut self, headers: HeaderSet) -> Self {
        self.custom_headers = headers;
        self
    }

    pub fn build(self) -> HeaderProfile {
        self.build_with_rng(&mut rand::thread_rng())
    }

    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> HeaderProfile {
        let identity = match self.identity {
            Some(identity) => identity,
            None => select_identity(rng),
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| derive::user_agent(&identity));
        let accept_language = self
            .accept_language
            .unwrap_or_else(|| derive::accept_language(rng));
        let sec_ch_ua = self
            .sec_ch_ua
            .or_else(|| derive::sec_ch_ua(&user_agent, &identity.version_label()));
        let sec_ch_ua_platform = self
            .sec_ch_ua_platform
            .unwrap_or_else(|| derive::sec_ch_ua_platform(identity.platform_string));

        let upgrade_insecure_requests = if derive::upgrade_insecure_requests_gate(rng) {
            Some(
                self.upgrade_insecure_requests
                    .unwrap_or_else(|| DEFAULT_UPGRADE_INSECURE_REQUESTS.to_string()),
            )
        } else {
            None
        };

        HeaderProfile {
            identity,
            user_agent,
            accept: self.accept.unwrap_or_else(|| DEFAULT_ACCEPT.to_string()),
            accept_encoding: self
                .accept_encoding
                .unwrap_or_else(|| DEFAULT_ACCEPT_ENCODING.to_string()),
            accept_language,
            sec_ch_ua,
            sec_ch_ua_mobile: SEC_CH_UA_MOBILE.to_string(),
            sec_ch_ua_platform,
            sec_fetch_dest: self
                .sec_fetch_dest
                .unwrap_or_else(|| DEFAULT_SEC_FETCH_DEST.to_string()),
            sec_fetch_mode: self
                .sec_fetch_mode
                .unwrap_or_else(|| DEFAULT_SEC_FETCH_MODE.to_string()),
            sec_fetch_site: self
                .sec_fetch_site
                .unwrap_or_else(|| DEFAULT_SEC_FETCH_SITE.to_string()),
            upgrade_insecure_requests,
            custom_headers: self.custom_headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::identity::Browser;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_core_header_order() {
        let profile = HeaderProfile::builder().build_with_rng(&mut seeded(1));
        let headers = profile.headers();
        let names: Vec<&str> = headers.keys().map(String::as_str).take(9).collect();
        assert_eq!(
            names,
            [
                "Accept",
                "Accept-Encoding",
                "Accept-Language",
                "Sec-Ch-Ua-Mobile",
                "Sec-Ch-Ua-Platform",
                "Sec-Fetch-Dest",
                "Sec-Fetch-Mode",
                "Sec-Fetch-Site",
                "User-Agent",
            ]
        );
    }

    #[test]
    fn test_static_defaults() {
        let profile = HeaderProfile::builder().build_with_rng(&mut seeded(2));
        assert_eq!(profile.accept(), "*/*");
        assert_eq!(profile.accept_encoding(), "gzip, deflate, br, zstd");
        assert_eq!(profile.sec_ch_ua_mobile(), "0?");
        assert_eq!(profile.sec_fetch_dest(), "empty");
        assert_eq!(profile.sec_fetch_mode(), "cors");
        assert_eq!(profile.sec_fetch_site(), "same-origin");
    }

    #[test]
    fn test_update_known_and_custom_keys() {
        let mut profile = HeaderProfile::builder().build_with_rng(&mut seeded(3));
        profile
            .update(r#"{"User-Agent": "Custom/1.0", "sec_fetch_site": "none", "X-Trace": "abc"}"#)
            .unwrap();

        assert_eq!(profile.user_agent(), "Custom/1.0");
        assert_eq!(profile.sec_fetch_site(), "none");
        assert_eq!(profile.custom_headers().get("X-Trace").unwrap(), "abc");
        assert!(!profile.custom_headers().contains_key("User-Agent"));
    }

    #[test]
    fn test_update_rejects_non_string_values() {
        let mut profile = HeaderProfile::builder().build_with_rng(&mut seeded(4));
        let before = profile.clone();
        let err = profile.update(r#"{"Accept": "text/html", "X-Count": 3}"#).unwrap_err();
        assert!(matches!(err, HeaderError::MalformedInput(_)));
        assert_eq!(profile, before);
    }

    #[test]
    fn test_overridden_user_agent_drives_sec_ch_ua() {
        let identity = BrowserIdentity::for_browser(Browser::Chrome, &mut seeded(5));
        let profile = HeaderProfile::builder()
            .identity(identity)
            .user_agent("Mozilla/5.0 (X11; Linux x86_64; rv:131.0) Gecko/20100101 Firefox/131.0")
            .build_with_rng(&mut seeded(5));

        assert!(profile.sec_ch_ua().is_none());
        assert_eq!(profile.headers().get("TE").unwrap(), "trailers");
    }

    #[test]
    fn test_to_header_map_rejects_invalid_name() {
        let profile = HeaderProfile::builder()
            .custom_header("Bad Header", "x")
            .build_with_rng(&mut seeded(6));
        assert!(matches!(
            profile.to_header_map(),
            Err(HeaderError::InvalidHeaderName(_))
        ));
    }

    #[test]
    fn test_randomize_discards_custom_headers() {
        let mut profile = HeaderProfile::builder()
            .custom_header("X-Trace", "abc")
            .build_with_rng(&mut seeded(7));
        profile.randomize_with_rng(&mut seeded(8));
        assert!(profile.custom_headers().is_empty());
    }
}
