//! Locale resolution for the page shell.

use serde::{Deserialize, Serialize};

use crate::config::LocaleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn for_locale(locale: &str) -> Self {
        if locale == "ar" {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Attributes placed on the root element of every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutAttributes {
    pub lang: String,
    pub dir: TextDirection,
}

impl LayoutAttributes {
    pub fn for_locale(locale: &str) -> Self {
        Self {
            lang: locale.to_string(),
            dir: TextDirection::for_locale(locale),
        }
    }
}

// Path prefixes served without a locale segment
const UNLOCALIZED_PREFIXES: &[&str] = &["api", "health"];

#[derive(Debug, Clone)]
pub struct LocaleResolver {
    supported: Vec<String>,
    default_locale: String,
}

impl LocaleResolver {
    pub fn new(config: &LocaleConfig) -> Self {
        Self {
            supported: config.supported.clone(),
            default_locale: config.default_locale.clone(),
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.supported.iter().any(|l| l == locale)
    }

    /// Where a page request without a supported locale prefix should go.
    ///
    /// Returns `None` when the path is already localized or is not a page.
    pub fn redirect_target(&self, path: &str, query: Option<&str>) -> Option<String> {
        let trimmed = path.trim_start_matches('/');
        if trimmed.is_empty() {
            return None;
        }

        // An unsupported but locale-shaped prefix (`/fr/layout`) is already
        // localized; prefixing it again would never resolve
        let first = trimmed.split('/').next().unwrap_or_default();
        if self.is_supported(first) || looks_like_locale(first) || UNLOCALIZED_PREFIXES.contains(&first) {
            return None;
        }

        let mut target = format!("/{}/{}", self.default_locale, trimmed);
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            target.push('?');
            target.push_str(q);
        }
        Some(target)
    }
}

/// `en`, `fil`, `pt-BR`, `zh-Hant`: a 2-3 letter language, optional region or script
fn looks_like_locale(segment: &str) -> bool {
    let mut parts = segment.splitn(2, '-');
    let language = parts.next().unwrap_or_default();
    let language_ok = (2..=3).contains(&language.len()) && language.bytes().all(|b| b.is_ascii_lowercase());

    match parts.next() {
        None => language_ok,
        Some(subtag) => {
            language_ok && (2..=4).contains(&subtag.len()) && subtag.bytes().all(|b| b.is_ascii_alphanumeric())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> LocaleResolver {
        LocaleResolver::new(&LocaleConfig::default())
    }

    #[test]
    fn arabic_is_right_to_left() {
        assert_eq!(LayoutAttributes::for_locale("ar").dir, TextDirection::Rtl);
    }

    #[test]
    fn everything_else_is_left_to_right() {
        for locale in ["en", "fr", "he", "xx", "", "AR-eg"] {
            assert_eq!(TextDirection::for_locale(locale), TextDirection::Ltr, "locale {:?}", locale);
        }
    }

    #[test]
    fn layout_keeps_lang_verbatim() {
        let attrs = LayoutAttributes::for_locale("en");
        assert_eq!(attrs.lang, "en");
        assert_eq!(serde_json::to_value(&attrs).unwrap(), serde_json::json!({"lang": "en", "dir": "ltr"}));
    }

    #[test]
    fn unprefixed_pages_redirect_to_default_locale() {
        let r = resolver();
        assert_eq!(r.redirect_target("/lessons/42", None).as_deref(), Some("/en/lessons/42"));
        assert_eq!(
            r.redirect_target("/lessons", Some("action=read&page=2")).as_deref(),
            Some("/en/lessons?action=read&page=2")
        );
    }

    #[test]
    fn localized_api_and_root_paths_pass_through() {
        let r = resolver();
        assert_eq!(r.redirect_target("/ar/lessons/42", None), None);
        assert_eq!(r.redirect_target("/api/admin/payments/revenue-chart", None), None);
        assert_eq!(r.redirect_target("/health", None), None);
        assert_eq!(r.redirect_target("/", None), None);
    }

    #[test]
    fn unsupported_locale_prefix_is_not_redirected() {
        let r = resolver();
        assert!(!r.is_supported("fr"));
        assert_eq!(r.redirect_target("/fr/layout", None), None);
        assert_eq!(r.redirect_target("/pt-BR/lessons/3", None), None);
    }

    #[test]
    fn locale_shape() {
        for segment in ["en", "fil", "pt-BR", "zh-Hant", "es-419"] {
            assert!(looks_like_locale(segment), "{segment}");
        }
        for segment in ["lessons", "layout", "unit-tests", "EN", "e", "en-", "subscription"] {
            assert!(!looks_like_locale(segment), "{segment}");
        }
    }
}
