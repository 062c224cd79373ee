//! Structural extraction of SVG markup.
//!
//! Locates the first `<svg>` element and splits it into its attributes and
//! its serialized inner markup:
//!
//! ```text
//! <svg viewBox="0 0 24 24" width="24"><path d="M0 0h24"/></svg>
//!  └──────────── attrs ─────────────┘└────── content ──────┘
//! ```
//!
//! Inner markup is sliced from the source text, so it is preserved byte for
//! byte (whitespace, comments and entity references included).

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Attribute map of the root element (name -> raw string value).
pub type Attrs = BTreeMap<String, String>;

/// Content and attributes of the root `<svg>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupData {
    /// Inner markup of the root element.
    pub content: String,
    /// Root element attributes.
    pub attrs: Attrs,
}

impl MarkupData {
    /// Get an attribute value.
    #[inline]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Check whether the root element declares a `viewBox`.
    #[inline]
    pub fn has_view_box(&self) -> bool {
        self.attrs.contains_key("viewBox")
    }
}

/// Markup that cannot be split into content and attributes.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("no <svg> element found")]
    MissingRoot,

    #[error("<svg> element is never closed")]
    Unclosed,
}

/// Parse raw SVG text into [`MarkupData`].
///
/// Parsing is lenient: mismatched or stray end tags, unquoted attribute
/// values and repeated attributes are accepted.
pub fn extract(raw: &str) -> Result<MarkupData, MarkupError> {
    let mut reader = Reader::from_str(raw);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    loop {
        match reader.read_event().map_err(|_| MarkupError::MissingRoot)? {
            Event::Start(start) if is_svg(&start) => {
                let attrs = collect_attrs(&start);
                let content_start = position(&reader);
                let content_end = find_closing(&mut reader)?;
                return Ok(MarkupData {
                    content: raw[content_start..content_end].to_string(),
                    attrs,
                });
            }
            Event::Empty(start) if is_svg(&start) => {
                return Ok(MarkupData {
                    content: String::new(),
                    attrs: collect_attrs(&start),
                });
            }
            Event::Eof => return Err(MarkupError::MissingRoot),
            _ => {}
        }
    }
}

/// Read events until the end tag that closes the already opened `<svg>`.
///
/// An end tag closes the innermost open element with the same name and every
/// element opened after it. End tags matching no open element are ignored.
/// Returns the byte offset where the closing tag starts.
fn find_closing(reader: &mut Reader<&[u8]>) -> Result<usize, MarkupError> {
    let mut open: Vec<Vec<u8>> = vec![b"svg".to_vec()];
    loop {
        let before = position(reader);
        match reader.read_event().map_err(|_| MarkupError::Unclosed)? {
            Event::Start(start) => open.push(start.local_name().as_ref().to_vec()),
            Event::End(end) => {
                let name = end.local_name();
                if let Some(index) = open.iter().rposition(|n| n.as_slice() == name.as_ref()) {
                    open.truncate(index);
                    if open.is_empty() {
                        return Ok(before);
                    }
                }
            }
            Event::Eof => return Err(MarkupError::Unclosed),
            _ => {}
        }
    }
}

#[inline]
fn position(reader: &Reader<&[u8]>) -> usize {
    reader.buffer_position() as usize
}

#[inline]
fn is_svg(start: &BytesStart<'_>) -> bool {
    start.local_name().as_ref() == b"svg"
}

/// Collect attributes with entity references resolved.
///
/// Unquoted values and valueless keys are accepted, a repeated name keeps its
/// last value, and values whose entities cannot be resolved are kept as
/// written.
fn collect_attrs(start: &BytesStart<'_>) -> Attrs {
    let mut attrs = Attrs::new();
    for attr in start.html_attributes().with_checks(false).flatten() {
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = match quick_xml::escape::unescape(&raw) {
            Ok(unescaped) => unescaped.into_owned(),
            Err(_) => raw.to_string(),
        };
        attrs.insert(name, value);
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content_and_attrs() {
        let data = extract(
            r#"<svg width="20" height="20" viewBox="0 0 20 20"><path d="M0 0h20"/></svg>"#,
        )
        .unwrap();

        assert_eq!(data.content, r#"<path d="M0 0h20"/>"#);
        assert_eq!(data.attr("width"), Some("20"));
        assert_eq!(data.attr("height"), Some("20"));
        assert_eq!(data.attr("viewBox"), Some("0 0 20 20"));
        assert_eq!(data.attrs.len(), 3);
    }

    #[test]
    fn test_prolog_is_skipped() {
        let raw = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!-- Generator: Sketch -->\n",
            "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><g><circle r=\"4\"/></g></svg>\n",
        );
        let data = extract(raw).unwrap();
        assert_eq!(data.content, r#"<g><circle r="4"/></g>"#);
        assert_eq!(data.attr("xmlns"), Some("http://www.w3.org/2000/svg"));
    }

    #[test]
    fn test_nested_svg_stays_in_content() {
        let raw = r#"<svg viewBox="0 0 10 10"><svg x="1"><rect/></svg><path/></svg>"#;
        let data = extract(raw).unwrap();
        assert_eq!(data.content, r#"<svg x="1"><rect/></svg><path/>"#);
        assert_eq!(data.attr("x"), None);
    }

    #[test]
    fn test_whitespace_and_comments_preserved() {
        let raw = "<svg>\n  <!-- icon -->\n  <path/>\n</svg>";
        let data = extract(raw).unwrap();
        assert_eq!(data.content, "\n  <!-- icon -->\n  <path/>\n");
    }

    #[test]
    fn test_self_closing_root() {
        let data = extract(r#"<svg viewBox="0 0 1 1"/>"#).unwrap();
        assert_eq!(data.content, "");
        assert!(data.has_view_box());
    }

    #[test]
    fn test_namespaced_attrs_kept_verbatim() {
        let raw = r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink" data-name="Layer 1"><use xlink:href="#a"/></svg>"##;
        let data = extract(raw).unwrap();
        assert_eq!(data.attr("xmlns:xlink"), Some("http://www.w3.org/1999/xlink"));
        assert_eq!(data.attr("data-name"), Some("Layer 1"));
    }

    #[test]
    fn test_attr_entities_resolved() {
        let data = extract(r#"<svg aria-label="Cats &amp; Dogs"></svg>"#).unwrap();
        assert_eq!(data.attr("aria-label"), Some("Cats & Dogs"));
    }

    #[test]
    fn test_missing_root() {
        assert!(matches!(extract("<div><p/></div>"), Err(MarkupError::MissingRoot)));
        assert!(matches!(extract(""), Err(MarkupError::MissingRoot)));
        assert!(matches!(extract("not markup at all"), Err(MarkupError::MissingRoot)));
    }

    #[test]
    fn test_unclosed_root_is_error() {
        assert!(matches!(extract("<svg><path/>"), Err(MarkupError::Unclosed)));
        assert!(matches!(extract("<svg><g><path></g>"), Err(MarkupError::Unclosed)));
    }

    #[test]
    fn test_mismatched_inner_tags_accepted() {
        let data = extract(r#"<svg viewBox="0 0 4 4"><g><path></g></svg>"#).unwrap();
        assert_eq!(data.content, "<g><path></g>");
        assert!(data.has_view_box());

        let data = extract("<svg><g></svg>").unwrap();
        assert_eq!(data.content, "<g>");
    }

    #[test]
    fn test_stray_end_tag_ignored() {
        let data = extract("<svg><path/></rect></svg>").unwrap();
        assert_eq!(data.content, "<path/></rect>");
    }

    #[test]
    fn test_duplicate_attribute_last_wins() {
        let data = extract(r#"<svg width="1" width="2" height="3"><path/></svg>"#).unwrap();
        assert_eq!(data.attr("width"), Some("2"));
        assert_eq!(data.attr("height"), Some("3"));
    }

    #[test]
    fn test_unquoted_attribute_values() {
        let data = extract(r#"<svg viewBox="0 0 24 24" width=24 hidden><path/></svg>"#).unwrap();
        assert_eq!(data.attr("width"), Some("24"));
        assert_eq!(data.attr("viewBox"), Some("0 0 24 24"));
        assert_eq!(data.attr("hidden"), Some(""));
        assert_eq!(data.content, "<path/>");
    }
}
