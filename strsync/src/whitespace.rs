//! Whitespace normalization for strings that contain inline markup.
//!
//! The Android resource compiler deletes line breaks together with the
//! indentation that follows them, so a string written as
//!
//! ```xml
//! <string name="size">
//!     Account shrunk from
//!     <xliff:g id="old">%1$s</xliff:g>
//!     to
//!     <xliff:g id="new">%2$s</xliff:g>
//! </string>
//! ```
//!
//! renders as "Account shrunk from10MB to1MB". The fixer rewrites the text and
//! tails of such strings so that only single spaces remain between words and
//! markup. Strings without child markup are left alone.

use tracing::{debug, warn};

use crate::document::{Document, Element, ITEM_TAG, Node, ResourceNode};

/// Outcome of one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixReport {
    /// Elements whose text or tails were rewritten.
    pub fixed_elements: usize,
    /// Top-level tags other than `string`, `item` and `plurals`, in document order.
    pub unknown_tags: Vec<String>,
}

/// Normalizes every `string`, top-level `item` and plural `item` in `document`.
pub fn normalize(document: &Document) -> Document {
    normalize_with_report(document).0
}

/// Same as [`normalize`], also reporting what was touched.
pub fn normalize_with_report(document: &Document) -> (Document, FixReport) {
    let mut report = FixReport::default();
    let mut root = Element {
        name: document.root.name.clone(),
        attributes: document.root.attributes.clone(),
        text: document.root.text.clone(),
        children: Vec::with_capacity(document.root.children.len()),
        tail: document.root.tail.clone(),
    };

    for node in &document.root.children {
        let fixed = match ResourceNode::classify(node) {
            ResourceNode::Comment(_) => node.clone(),
            ResourceNode::String(element) => {
                Node::Element(fix_element(element, &mut report))
            }
            ResourceNode::Plurals(element) => {
                let mut plurals = element.clone();
                for child in plurals.children.iter_mut() {
                    match child {
                        Node::Element(item) if item.name == ITEM_TAG => {
                            *item = fix_element(item, &mut report);
                        }
                        _ => {}
                    }
                }
                Node::Element(plurals)
            }
            // `<item type="string" name="...">` entries are strings too.
            ResourceNode::Unknown(element) if element.name == ITEM_TAG => {
                Node::Element(fix_element(element, &mut report))
            }
            ResourceNode::Unknown(element) => {
                warn!(tag = %element.name, "unknown tag in string resources, left unchanged");
                report.unknown_tags.push(element.name.clone());
                node.clone()
            }
        };
        root.children.push(fixed);
    }

    let document = Document {
        prologue: document.prologue.clone(),
        root,
    };
    (document, report)
}

/// Returns `true` when normalizing `document` would change nothing.
pub fn is_normalized(document: &Document) -> bool {
    normalize(document) == *document
}

fn fix_element(element: &Element, report: &mut FixReport) -> Element {
    if !element.has_child_nodes() {
        return element.clone();
    }

    let mut fixed = element.clone();
    fixed.text = fix_text(&element.text);
    let last = fixed.children.len() - 1;
    for (index, child) in fixed.children.iter_mut().enumerate() {
        let tail = fix_tail(child.tail(), index == last);
        child.set_tail(tail);
    }

    if fixed != *element {
        debug!(
            tag = %element.name,
            name = element.name_attribute().unwrap_or_default(),
            "normalized whitespace"
        );
        report.fixed_elements += 1;
    }
    fixed
}

/// Normalizes the character data between a start tag and its first child.
///
/// A leading line break and its indentation are dropped; a trailing line
/// break and its indentation become a single space.
pub fn fix_text(text: &str) -> String {
    let text = match strip_leading_break(text) {
        Some(rest) => rest.to_string(),
        None => text.to_string(),
    };
    replace_trailing_break(&text, " ")
}

/// Normalizes the character data that follows an inline child element.
///
/// A leading line break and its indentation become a single space. A
/// trailing line break and its indentation become a single space, or
/// nothing when the child is the last one before the parent's end tag.
pub fn fix_tail(tail: &str, is_last: bool) -> String {
    let tail = match strip_leading_break(tail) {
        Some(rest) => format!(" {rest}"),
        None => tail.to_string(),
    };
    replace_trailing_break(&tail, if is_last { "" } else { " " })
}

/// `"\n   word..."` → `Some("word...")`; `None` unless the break is followed,
/// after any whitespace, by a non-whitespace character.
fn strip_leading_break(s: &str) -> Option<&str> {
    let rest = s.strip_prefix('\n')?.trim_start();
    (!rest.is_empty()).then_some(rest)
}

/// Replaces a trailing `\n` plus any whitespace around it up to the end with `replacement`.
fn replace_trailing_break(s: &str, replacement: &str) -> String {
    let body = s.trim_end();
    let trailing = &s[body.len()..];
    match trailing.find('\n') {
        Some(offset) => {
            let cut = body.len() + offset;
            format!("{}{}", &s[..cut], replacement)
        }
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;
    use indoc::indoc;

    #[test]
    fn test_fix_text_rules() {
        assert_eq!(fix_text("\n    Account shrunk from\n    "), "Account shrunk from ");
        assert_eq!(fix_text("Hello"), "Hello");
        assert_eq!(fix_text("\n    "), " ");
        assert_eq!(fix_text(""), "");
        assert_eq!(fix_text("one\ntwo"), "one\ntwo");
    }

    #[test]
    fn test_fix_tail_rules() {
        assert_eq!(fix_tail("\n    to\n    ", false), " to ");
        assert_eq!(fix_tail("\n    to\n", true), " to");
        assert_eq!(fix_tail("\n", true), "");
        assert_eq!(fix_tail("\n    ", false), " ");
        assert_eq!(fix_tail(" messages", true), " messages");
    }

    #[test]
    fn test_trailing_break_keeps_spaces_before_it() {
        assert_eq!(replace_trailing_break("abc  \n  ", " "), "abc   ");
        assert_eq!(replace_trailing_break("abc\n\n   ", ""), "abc");
        assert_eq!(replace_trailing_break("abc  ", ""), "abc  ");
    }

    #[test]
    fn test_normalize_multiline_string() {
        let xml = indoc! {r#"
            <resources xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2">
                <string name="size">
                    Account shrunk from
                    <xliff:g id="old">%1$s</xliff:g>
                    to
                    <xliff:g id="new">%2$s</xliff:g>
                </string>
                <string name="plain">
                    Plain text is left alone
                </string>
            </resources>
        "#};
        let document = Document::from_str(xml).unwrap();
        let (fixed, report) = normalize_with_report(&document);
        assert_eq!(report.fixed_elements, 1);
        assert!(report.unknown_tags.is_empty());

        let size = fixed.root.child_elements().next().unwrap();
        assert_eq!(size.text, "Account shrunk from ");
        let placeholders: Vec<_> = size.child_elements().collect();
        assert_eq!(placeholders[0].tail, " to ");
        assert_eq!(placeholders[1].tail, "");
        assert_eq!(
            size.to_xml_string().unwrap(),
            r#"<string name="size">Account shrunk from <xliff:g id="old">%1$s</xliff:g> to <xliff:g id="new">%2$s</xliff:g></string>"#
        );

        let plain = fixed.root.child_elements().nth(1).unwrap();
        assert_eq!(plain.text, "\n        Plain text is left alone\n    ");
        assert_eq!(size.tail, "\n    ");
    }

    #[test]
    fn test_normalize_plural_items() {
        let xml = indoc! {r#"
            <resources xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2">
                <plurals name="messages">
                    <item quantity="one">
                        <xliff:g id="count">%d</xliff:g>
                        message
                    </item>
                    <item quantity="other"><xliff:g id="count">%d</xliff:g> messages</item>
                </plurals>
            </resources>
        "#};
        let document = Document::from_str(xml).unwrap();
        let (fixed, report) = normalize_with_report(&document);
        assert_eq!(report.fixed_elements, 1);

        let plurals = fixed.root.child_elements().next().unwrap();
        let items: Vec<_> = plurals.child_elements().collect();
        assert_eq!(items[0].text, " ");
        assert_eq!(items[0].child_elements().next().unwrap().tail, " message");
        assert_eq!(items[0].tail, "\n        ");
        let original = document.root.child_elements().next().unwrap();
        assert_eq!(items[1], original.child_elements().nth(1).unwrap());
    }

    #[test]
    fn test_normalize_top_level_item() {
        let xml = indoc! {r#"
            <resources xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2">
                <item type="string" name="x">
                    Shrunk from
                    <xliff:g id="a">%1$s</xliff:g>
                    to
                </item>
            </resources>
        "#};
        let document = Document::from_str(xml).unwrap();
        let (fixed, report) = normalize_with_report(&document);
        assert!(report.unknown_tags.is_empty());
        assert_eq!(report.fixed_elements, 1);

        let item = fixed.root.child_elements().next().unwrap();
        assert_eq!(item.text, "Shrunk from ");
        assert_eq!(item.children[0].tail(), " to");
        assert_eq!(item.tail, "\n");
    }

    #[test]
    fn test_unknown_tags_are_reported_and_kept() {
        let xml = indoc! {r#"
            <resources>
                <!-- keep me -->
                <string-array name="colors">
                    <item>Red</item>
                </string-array>
            </resources>
        "#};
        let document = Document::from_str(xml).unwrap();
        let (fixed, report) = normalize_with_report(&document);
        assert_eq!(report.unknown_tags, vec!["string-array".to_string()]);
        assert_eq!(fixed, document);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let xml = indoc! {r#"
            <resources xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2">
                <string name="a">
                    Hello <xliff:g id="name">%s</xliff:g>,
                    welcome
                </string>
            </resources>
        "#};
        let once = normalize(&Document::from_str(xml).unwrap());
        let twice = normalize(&once);
        assert_eq!(once, twice);
        assert!(is_normalized(&once));
    }
}
