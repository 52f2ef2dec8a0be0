//! Supported locales and hreflang alternates
//!
//! Every page is announced in each supported locale plus `x-default`, which
//! points at the unprefixed URL.

use serde::Serialize;

/// Locale served when none is requested
pub const DEFAULT_LOCALE: &str = "en-US";

/// hreflang value for the language-neutral fallback
pub const X_DEFAULT: &str = "x-default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Locale {
    /// BCP-47 code, e.g. `pt-BR`
    pub code: &'static str,
    /// English name of the language and region
    pub name: &'static str,
    pub direction: TextDirection,
}

const fn ltr(code: &'static str, name: &'static str) -> Locale {
    Locale { code, name, direction: TextDirection::Ltr }
}

const fn rtl(code: &'static str, name: &'static str) -> Locale {
    Locale { code, name, direction: TextDirection::Rtl }
}

pub static SUPPORTED_LOCALES: &[Locale] = &[
    ltr("en-US", "English (United States)"),
    ltr("en-GB", "English (United Kingdom)"),
    ltr("en-CA", "English (Canada)"),
    ltr("en-AU", "English (Australia)"),
    ltr("en-IN", "English (India)"),
    ltr("en-IE", "English (Ireland)"),
    ltr("en-NZ", "English (New Zealand)"),
    ltr("en-ZA", "English (South Africa)"),
    ltr("en-SG", "English (Singapore)"),
    ltr("es-ES", "Spanish (Spain)"),
    ltr("es-MX", "Spanish (Mexico)"),
    ltr("es-AR", "Spanish (Argentina)"),
    ltr("es-CO", "Spanish (Colombia)"),
    ltr("es-US", "Spanish (United States)"),
    ltr("fr-FR", "French (France)"),
    ltr("fr-CA", "French (Canada)"),
    ltr("fr-BE", "French (Belgium)"),
    ltr("fr-CH", "French (Switzerland)"),
    ltr("de-DE", "German (Germany)"),
    ltr("de-AT", "German (Austria)"),
    ltr("de-CH", "German (Switzerland)"),
    ltr("it-IT", "Italian (Italy)"),
    ltr("pt-BR", "Portuguese (Brazil)"),
    ltr("pt-PT", "Portuguese (Portugal)"),
    ltr("nl-NL", "Dutch (Netherlands)"),
    ltr("nl-BE", "Dutch (Belgium)"),
    ltr("sv-SE", "Swedish (Sweden)"),
    ltr("nb-NO", "Norwegian Bokmål (Norway)"),
    ltr("da-DK", "Danish (Denmark)"),
    ltr("fi-FI", "Finnish (Finland)"),
    ltr("pl-PL", "Polish (Poland)"),
    ltr("cs-CZ", "Czech (Czechia)"),
    ltr("hu-HU", "Hungarian (Hungary)"),
    ltr("ro-RO", "Romanian (Romania)"),
    ltr("el-GR", "Greek (Greece)"),
    ltr("tr-TR", "Turkish (Turkey)"),
    ltr("ru-RU", "Russian (Russia)"),
    ltr("uk-UA", "Ukrainian (Ukraine)"),
    rtl("ar-SA", "Arabic (Saudi Arabia)"),
    rtl("ar-AE", "Arabic (United Arab Emirates)"),
    rtl("he-IL", "Hebrew (Israel)"),
    ltr("hi-IN", "Hindi (India)"),
    ltr("bn-BD", "Bengali (Bangladesh)"),
    ltr("th-TH", "Thai (Thailand)"),
    ltr("vi-VN", "Vietnamese (Vietnam)"),
    ltr("id-ID", "Indonesian (Indonesia)"),
    ltr("ms-MY", "Malay (Malaysia)"),
    ltr("fil-PH", "Filipino (Philippines)"),
    ltr("zh-CN", "Chinese (Simplified, China)"),
    ltr("zh-TW", "Chinese (Traditional, Taiwan)"),
    ltr("zh-HK", "Chinese (Traditional, Hong Kong)"),
    ltr("ja-JP", "Japanese (Japan)"),
    ltr("ko-KR", "Korean (South Korea)"),
];

/// Look up a supported locale, ignoring case (`pt-br` finds `pt-BR`)
pub fn find_locale(code: &str) -> Option<&'static Locale> {
    SUPPORTED_LOCALES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(code.trim()))
}

pub fn is_supported(code: &str) -> bool {
    find_locale(code).is_some()
}

/// Open Graph spells locales with an underscore (`en_US`)
pub fn og_locale(code: &str) -> String {
    code.replace('-', "_")
}

/// One `<link rel="alternate" hreflang=...>` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HreflangLink {
    pub hreflang: String,
    pub href: String,
}

/// `{base}/{code-lowercase}{path}`, the URL of `path` served in `code`
pub fn localized_url(base_url: &str, code: &str, path: &str) -> String {
    format!(
        "{}/{}{}",
        base_url.trim_end_matches('/'),
        code.to_ascii_lowercase(),
        normalize_path(path)
    )
}

/// Split a leading locale segment off a request path
///
/// `/de-de/tools` yields `de-DE` and `/tools`; a bare `/de-de` yields `/`.
/// Returns `None` when the first segment is not a supported locale.
pub fn split_locale_prefix(path: &str) -> Option<(&'static Locale, String)> {
    let trimmed = path.strip_prefix('/')?;
    let (segment, rest) = match trimmed.find('/') {
        Some(i) => (&trimmed[..i], &trimmed[i..]),
        None => (trimmed, "/"),
    };
    let locale = find_locale(segment)?;
    Some((locale, rest.to_string()))
}

/// Alternates for `path`: one per supported locale, then `x-default`
///
/// Locale URLs come from [`localized_url`]; `x-default` is `{base}{path}`.
pub fn hreflang_alternates(base_url: &str, path: &str) -> Vec<HreflangLink> {
    let base = base_url.trim_end_matches('/');

    let mut links: Vec<HreflangLink> = SUPPORTED_LOCALES
        .iter()
        .map(|locale| HreflangLink {
            hreflang: locale.code.to_string(),
            href: localized_url(base, locale.code, path),
        })
        .collect();

    links.push(HreflangLink {
        hreflang: X_DEFAULT.to_string(),
        href: format!("{}{}", base, normalize_path(path)),
    });

    links
}

/// Ensure a leading slash; the root path becomes empty so URLs don't end in `/`
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() || trimmed == "/" {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_at_least_45_unique_locales() {
        assert!(SUPPORTED_LOCALES.len() >= 45);
        let codes: HashSet<_> = SUPPORTED_LOCALES.iter().map(|l| l.code).collect();
        assert_eq!(codes.len(), SUPPORTED_LOCALES.len());
        assert!(codes.contains(DEFAULT_LOCALE));
    }

    #[test]
    fn test_find_locale_case_insensitive() {
        assert_eq!(find_locale("pt-br").map(|l| l.code), Some("pt-BR"));
        assert_eq!(find_locale("ar-SA").map(|l| l.direction), Some(TextDirection::Rtl));
        assert!(!is_supported("xx-YY"));
    }

    #[test]
    fn test_hreflang_alternates_include_every_locale_and_x_default() {
        let links = hreflang_alternates("https://aifuelhub.com/", "/blog/post");
        assert_eq!(links.len(), SUPPORTED_LOCALES.len() + 1);

        let x_default = links.iter().find(|l| l.hreflang == X_DEFAULT).unwrap();
        assert_eq!(x_default.href, "https://aifuelhub.com/blog/post");

        let de = links.iter().find(|l| l.hreflang == "de-DE").unwrap();
        assert_eq!(de.href, "https://aifuelhub.com/de-de/blog/post");
    }

    #[test]
    fn test_hreflang_root_path() {
        let links = hreflang_alternates("https://aifuelhub.com", "/");
        let x_default = links.last().unwrap();
        assert_eq!(x_default.href, "https://aifuelhub.com");
        assert_eq!(links[0].href, "https://aifuelhub.com/en-us");
    }

    #[test]
    fn test_split_locale_prefix() {
        let (locale, rest) = split_locale_prefix("/de-de/tools/ahrefs").unwrap();
        assert_eq!(locale.code, "de-DE");
        assert_eq!(rest, "/tools/ahrefs");

        let (locale, rest) = split_locale_prefix("/pt-br").unwrap();
        assert_eq!(locale.code, "pt-BR");
        assert_eq!(rest, "/");

        assert!(split_locale_prefix("/tools").is_none());
        assert!(split_locale_prefix("/xx-yy/tools").is_none());
        assert!(split_locale_prefix("").is_none());
    }

    #[test]
    fn test_localized_url_matches_alternate() {
        let links = hreflang_alternates("https://aifuelhub.com", "/blog");
        let fr = links.iter().find(|l| l.hreflang == "fr-FR").unwrap();
        assert_eq!(fr.href, localized_url("https://aifuelhub.com/", "fr-FR", "/blog"));
    }

    #[test]
    fn test_og_locale() {
        assert_eq!(og_locale("en-US"), "en_US");
    }
}
