//! Property documentation rendering
//!
//! Turns an MDN reference page (markdown with front matter and KumaScript
//! macros) into the short summary shown on hover.

use std::sync::OnceLock;

use regex::Regex;

use crate::css::constants::DOCS_CSS_PATH;

fn front_matter_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?s)\A\s*---.*?---").expect("Invalid front matter regex"))
}

fn cssxref_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"\{\{\s*cssxref\(\s*"?([^")]+?)"?\s*(?:,[^)]*)?\)\s*\}\}"#)
            .expect("Invalid cssxref regex")
    })
}

fn macro_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{\{.*?\}\}").expect("Invalid macro regex"))
}

fn relative_link_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\[(.*?)\]\((/.*?)\)").expect("Invalid link regex"))
}

/// Summary of a property page: the text before its first section heading
///
/// Cross-reference macros become links, other macros are dropped and
/// site-relative links are made absolute against `site_url`.
pub fn summarize(markdown: &str, site_url: &str) -> String {
    let body = front_matter_regex().replace(markdown, "");
    let body = cssxref_regex().replace_all(&body, format!("[$1]({}/$1)", DOCS_CSS_PATH));
    let body = macro_regex().replace_all(&body, "");

    let summary = match body.find("##") {
        Some(heading) => &body[..heading],
        None => &body[..],
    };

    let site_url = site_url.trim_end_matches('/');
    relative_link_regex()
        .replace_all(summary.trim(), format!("[$1]({}$2)", site_url))
        .into_owned()
}

/// Hover markdown for a property: its summary followed by a reference link
pub fn render_property_doc(
    property: &str,
    markdown: &str,
    site_url: Option<&str>,
    property_url: Option<&str>,
) -> Option<String> {
    let summary = summarize(markdown, site_url.unwrap_or(""));
    if summary.is_empty() {
        return None;
    }

    Some(match property_url {
        Some(url) => format!("{}\n\n[Learn more on MDN]({})", summary, url),
        None => format!("**{}**\n\n{}", property, summary),
    })
}
