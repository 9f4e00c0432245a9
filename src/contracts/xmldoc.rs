// XML documentation interop: extraction of <exception cref="..."> tags and
// the property accessor heuristics.

use quick_xml::Reader as XmlReader;
use quick_xml::events::Event;
use regex::Regex;
use std::sync::LazyLock;

/// One documented exception: the raw cref and the description text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocException {
    pub cref: String,
    pub description: String,
}

/// Which accessor a property-level `<exception>` tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorTarget {
    Getter,
    Setter,
}

/// Extract `<exception cref="...">` tags from a documentation fragment.
/// Documentation is best-effort: malformed XML yields the tags parsed so far.
pub fn extract_exception_tags(doc: &str) -> Vec<DocException> {
    // Doc comments are XML fragments; wrap them to get a single root.
    let wrapped = format!("<doc>{}</doc>", doc);
    let mut reader = XmlReader::from_str(&wrapped);
    reader.trim_text(true);

    let mut tags: Vec<DocException> = Vec::new();
    let mut current: Option<DocException> = None;
    let mut depth_in_exception = 0usize;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"exception" && current.is_none() {
                    let cref = e
                        .attributes()
                        .flatten()
                        .find(|a| a.key.as_ref().eq_ignore_ascii_case(b"cref"))
                        .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()));
                    if let Some(cref) = cref {
                        current = Some(DocException {
                            cref,
                            description: String::new(),
                        });
                        depth_in_exception = 0;
                    }
                } else if current.is_some() {
                    depth_in_exception += 1;
                }
            }
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"exception" && current.is_none() {
                    let cref = e
                        .attributes()
                        .flatten()
                        .find(|a| a.key.as_ref().eq_ignore_ascii_case(b"cref"))
                        .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()));
                    if let Some(cref) = cref {
                        tags.push(DocException {
                            cref,
                            description: String::new(),
                        });
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(tag) = current.as_mut()
                    && let Ok(text) = t.unescape()
                {
                    if !tag.description.is_empty() {
                        tag.description.push(' ');
                    }
                    tag.description.push_str(text.trim());
                }
            }
            Ok(Event::End(e)) => {
                if current.is_some() {
                    if depth_in_exception == 0 && e.name().as_ref() == b"exception" {
                        if let Some(tag) = current.take() {
                            tags.push(tag);
                        }
                    } else {
                        depth_in_exception = depth_in_exception.saturating_sub(1);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break, // best effort
            _ => {}
        }
        buf.clear();
    }
    tags
}

/// Strip a documentation-comment `T:` cref prefix.
pub fn strip_cref_prefix(cref: &str) -> &str {
    cref.strip_prefix("T:").unwrap_or(cref)
}

static GETTER_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(get|gets|getting|retrieved)\b").expect("getter regex"));
static SETTER_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(set|sets|setting)\b").expect("setter regex"));

/// Assign a property-level `<exception>` description to an accessor.
///
/// Whole-word, case-insensitive scan: getter tokens win, then setter tokens;
/// with no token match a single-accessor property assigns unambiguously and a
/// full property defaults to the getter.
pub fn classify_accessor(description: &str, has_get: bool, has_set: bool) -> AccessorTarget {
    if GETTER_WORDS.is_match(description) {
        return AccessorTarget::Getter;
    }
    if SETTER_WORDS.is_match(description) {
        return AccessorTarget::Setter;
    }
    if has_set && !has_get {
        return AccessorTarget::Setter;
    }
    AccessorTarget::Getter
}
