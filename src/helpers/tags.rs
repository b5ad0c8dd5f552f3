//! Embeddable tag expansion
//!
//! Documents embed the sitemap with a bracketed tag such as
//! `[ordered_sitemap page_order="title_asc" post_order=date_desc]`.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::sitemap::TagAttributes;

lazy_static! {
    static ref ATTR_RE: Regex =
        Regex::new(r#"([A-Za-z_][\w-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'\]]+))"#)
            .expect("attribute pattern is valid");
}

/// Parse `name="value"` pairs; quotes are optional
pub fn parse_attributes(input: &str) -> HashMap<String, String> {
    ATTR_RE
        .captures_iter(input)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str())
                .unwrap_or_default();
            (caps[1].to_string(), value.to_string())
        })
        .collect()
}

/// Replace every `[tag_name ...]` in `text` with the output of `render`.
///
/// Rendering stops at the first error, which is returned unchanged.
pub fn expand_tags<F, E>(text: &str, tag_name: &str, mut render: F) -> Result<String, E>
where
    F: FnMut(&TagAttributes) -> Result<String, E>,
{
    let pattern = format!(r"\[{}(\s[^\]]*)?\]", regex::escape(tag_name));
    let Ok(tag_re) = Regex::new(&pattern) else {
        tracing::warn!("Cannot build a matcher for tag {:?}", tag_name);
        return Ok(text.to_string());
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in tag_re.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let attrs = TagAttributes::from_map(&parse_attributes(raw));

        out.push_str(&text[last..whole.start()]);
        out.push_str(&render(&attrs)?);
        last = whole.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}
