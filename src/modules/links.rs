// Link and anchor resolution - pure string logic.
// Nav links, planet buttons and explorer items all point at a view through
// some flavour of href or element id; this maps them back to a view id.

use url::Url;

use crate::state::View;

/// Element id suffixes the page variants use for their containers.
const ANCHOR_SUFFIXES: [&str; 4] = ["-section", "-screen", "-panel", "-content"];

/// Resolves an href or element id to a configured view id.
///
/// Accepted forms:
/// - `#about`, `index.html#about`, `https://host/page#about`
/// - a bare element id: `about`, `about-section`, `about-screen`
/// - VS Code content ids, where the dot of the file name became a dash:
///   `readme-md-content` -> `readme.md`
pub fn resolve_anchor(href: &str, views: &[View]) -> Option<String> {
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.contains('#') {
        fragment_of(trimmed)?
    } else {
        trimmed.to_string()
    };
    if candidate.is_empty() {
        return None;
    }

    // 1. Exact id or configured anchor
    if let Some(view) = views
        .iter()
        .find(|v| v.id == candidate || v.anchor.trim_start_matches('#') == candidate)
    {
        return Some(view.id.clone());
    }

    // 2. Conventional container ids
    for suffix in ANCHOR_SUFFIXES {
        if let Some(stem) = candidate.strip_suffix(suffix) {
            if let Some(view) = views
                .iter()
                .find(|v| v.id == stem || v.id.replace('.', "-") == stem)
            {
                return Some(view.id.clone());
            }
        }
    }

    None
}

fn fragment_of(href: &str) -> Option<String> {
    if let Some(rest) = href.strip_prefix('#') {
        return decode(rest);
    }

    // Relative hrefs are resolved against a throwaway base; only the
    // fragment is kept.
    let base = Url::parse("http://localhost/").ok()?;
    let url = match Url::parse(href) {
        Ok(u) => u,
        Err(_) => base.join(href).ok()?,
    };
    decode(url.fragment()?)
}

fn decode(fragment: &str) -> Option<String> {
    urlencoding::decode(fragment).ok().map(|s| s.into_owned())
}
