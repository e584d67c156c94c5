//! Validation and normalization of user-supplied show URLs.
//!
//! A show URL must live on `dailywire.com` (optionally `www.`), and its path must
//! be `/show/<slug>` with a non-empty slug. Inputs without a scheme are treated
//! as `https://`.

use serde::{Deserialize, Serialize};
use url::Url;

pub const ERR_DOMAIN: &str = "URL must be on dailywire.com";
pub const ERR_PATH: &str = "URL must include /show/ in the path";
pub const ERR_SLUG: &str =
    "URL must include a show name after /show/ (e.g., the-ben-shapiro-show)";

const ALLOWED_HOSTS: [&str; 2] = ["dailywire.com", "www.dailywire.com"];
const SHOW_PATH_PREFIX: &str = "/show/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowUrlValidationResult {
    pub domain_ok: bool,
    pub path_ok: bool,
    pub slug_ok: bool,
    /// One message per failing rule, ordered domain, path, slug.
    pub errors: Vec<String>,
    /// Canonical form of the input, present whenever it parsed as a URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
}

impl ShowUrlValidationResult {
    pub fn is_valid(&self) -> bool {
        self.domain_ok && self.path_ok && self.slug_ok
    }

    fn unparseable() -> Self {
        Self {
            domain_ok: false,
            path_ok: false,
            slug_ok: false,
            errors: vec![ERR_DOMAIN.into(), ERR_PATH.into(), ERR_SLUG.into()],
            normalized: None,
        }
    }
}

/// Validate a show URL. Pure and deterministic.
pub fn validate(input: &str) -> ShowUrlValidationResult {
    let candidate = ensure_scheme(input);
    if candidate.is_empty() {
        return ShowUrlValidationResult::unparseable();
    }

    let url = match Url::parse(&candidate) {
        Ok(url) => url,
        Err(_) => return ShowUrlValidationResult::unparseable(),
    };

    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let domain_ok = ALLOWED_HOSTS.contains(&host.as_str());

    let path = url.path();
    let path_ok = path.starts_with(SHOW_PATH_PREFIX);
    let slug_ok = path_ok && slug_of(path).is_some_and(|s| !s.is_empty());

    let mut errors = Vec::new();
    if !domain_ok {
        errors.push(ERR_DOMAIN.to_string());
    }
    if !path_ok {
        errors.push(ERR_PATH.to_string());
    }
    if !slug_ok {
        errors.push(ERR_SLUG.to_string());
    }

    ShowUrlValidationResult {
        domain_ok,
        path_ok,
        slug_ok,
        errors,
        normalized: Some(url.to_string()),
    }
}

/// The show slug of a URL path such as `/show/the-ben-shapiro-show/episodes`.
pub fn slug_of(path: &str) -> Option<&str> {
    path.strip_prefix(SHOW_PATH_PREFIX)
        .map(|rest| rest.split('/').next().unwrap_or_default())
}

/// Canonical show page URL for a slug.
pub fn show_url_for_slug(slug: &str) -> String {
    format!("https://www.dailywire.com/show/{slug}")
}

/// Trim the input and prepend `https://` unless it already starts with a scheme.
pub fn ensure_scheme(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() || has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Matches `^[a-zA-Z][a-zA-Z0-9+.-]*:`.
fn has_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    for c in chars {
        if c == ':' {
            return true;
        }
        if !(c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-')) {
            return false;
        }
    }
    false
}
