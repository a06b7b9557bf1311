// src/core/sanitize.rs

/// Collapse every whitespace run to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `mailto:jane@x.com` → `jane@x.com`, `tel:555` → `555`. Anything else unchanged.
pub fn strip_scheme(href: &str) -> &str {
    let href = href.trim();
    for scheme in ["mailto:", "tel:"] {
        if href.get(..scheme.len()).is_some_and(|head| head.eq_ignore_ascii_case(scheme)) {
            return &href[scheme.len()..];
        }
    }
    href
}

/// True when `href` uses a scheme whose payload is the value itself.
pub fn is_contact_href(href: &str) -> bool {
    strip_scheme(href).len() != href.trim().len()
}
