//! Synchronization of a translation `strings.xml` against its master.
//!
//! The output always follows the master: same entries, same order, same
//! comments. Entries the translation already has are taken from the
//! translation; entries it lacks are emitted as `<!-- NEW: ... -->` comments
//! holding the master's markup, so translators can see what is missing.
//! Neither input is modified.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{
    document::{Comment, Document, Element, EntryKind, Node, ResourceNode, XLIFF_PREFIX},
    error::Error,
    options::SyncOptions,
};

/// Counts describing one synchronization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Master entries found in the translation.
    pub translated: usize,
    /// Master entries emitted as NEW comments.
    pub missing: usize,
    /// Comments copied from either document.
    pub comments: usize,
    /// Non-translatable master entries left out of the output.
    pub skipped: usize,
    /// Unrecognized master tags dropped from the output, in document order.
    pub dropped: Vec<String>,
}

/// Synchronizes `translation` against `master` with default options.
pub fn synchronize(master: &Document, translation: &Document) -> Result<Document, Error> {
    synchronize_with(master, translation, &SyncOptions::default()).map(|(document, _)| document)
}

/// Builds a new translation document shaped after `master`.
pub fn synchronize_with(
    master: &Document,
    translation: &Document,
    options: &SyncOptions,
) -> Result<(Document, SyncReport), Error> {
    let layout = Layout::new(&options.indent);
    let index = TranslationIndex::new(translation);
    let mut report = SyncReport::default();
    let mut children = Vec::new();

    for node in &translation.root.children {
        let Node::Comment(comment) = node else {
            break;
        };
        children.push(Node::Comment(layout.comment(comment)));
        report.comments += 1;
    }

    for node in master.resources() {
        match node {
            ResourceNode::Comment(comment) => {
                children.push(Node::Comment(layout.comment(comment)));
                report.comments += 1;
            }
            ResourceNode::String(element) => {
                if let Some(entry) =
                    sync_entry(EntryKind::String, element, &index, &layout, options, &mut report)?
                {
                    children.push(entry);
                }
            }
            ResourceNode::Plurals(element) => {
                if let Some(entry) =
                    sync_entry(EntryKind::Plurals, element, &index, &layout, options, &mut report)?
                {
                    children.push(entry);
                }
            }
            ResourceNode::Unknown(element) => {
                warn!(tag = %element.name, "unknown tag in master, dropped from output");
                report.dropped.push(element.name.clone());
            }
        }
    }

    let text = match children.last_mut() {
        Some(last) => {
            last.set_tail("\n");
            layout.line(1)
        }
        None => "\n".to_string(),
    };

    let root = Element {
        name: master.root.name.clone(),
        attributes: master.root.attributes.clone(),
        text,
        children,
        tail: String::new(),
    };
    let document = Document {
        prologue: translation.prologue.clone(),
        root,
    };
    Ok((document, report))
}

fn sync_entry(
    kind: EntryKind,
    master_entry: &Element,
    index: &TranslationIndex<'_>,
    layout: &Layout<'_>,
    options: &SyncOptions,
    report: &mut SyncReport,
) -> Result<Option<Node>, Error> {
    let name = master_entry.name_attribute().ok_or_else(|| {
        Error::invalid_resource(format!("{} tag missing 'name'", kind.tag()))
    })?;

    if options.skip_untranslatable && !master_entry.is_translatable() {
        debug!(name, "skipping non-translatable entry");
        report.skipped += 1;
        return Ok(None);
    }

    let tail = layout.mirrored_tail(&master_entry.tail);
    let node = match index.get(kind, name) {
        Some(translated) => {
            debug!(name, tag = kind.tag(), "translation found");
            report.translated += 1;
            let mut entry = translated.clone();
            if kind == EntryKind::Plurals {
                layout.reindent_plurals(&mut entry, 1);
            }
            entry.tail = tail;
            Node::Element(entry)
        }
        None => {
            debug!(name, tag = kind.tag(), "translation missing, marking as new");
            report.missing += 1;
            let mut marker = layout.new_marker(kind, master_entry)?;
            marker.tail = tail;
            Node::Comment(marker)
        }
    };
    Ok(Some(node))
}

/// Marker prefix of comments wrapping untranslated master entries.
pub const NEW_MARKER: &str = " NEW:";

/// First-match lookup of translated entries by tag family and name.
struct TranslationIndex<'a> {
    entries: HashMap<(EntryKind, &'a str), &'a Element>,
}

impl<'a> TranslationIndex<'a> {
    fn new(translation: &'a Document) -> Self {
        let mut entries = HashMap::new();
        for (kind, element) in translation.resources().filter_map(|node| node.entry()) {
            if let Some(name) = element.name_attribute() {
                entries.entry((kind, name)).or_insert(element);
            }
        }
        TranslationIndex { entries }
    }

    fn get(&self, kind: EntryKind, name: &str) -> Option<&'a Element> {
        self.entries.get(&(kind, name)).copied()
    }
}

/// Generated whitespace for a given indentation unit.
struct Layout<'a> {
    unit: &'a str,
}

impl<'a> Layout<'a> {
    fn new(unit: &'a str) -> Self {
        Layout { unit }
    }

    /// A line break followed by `level` indentation units.
    fn line(&self, level: usize) -> String {
        format!("\n{}", self.unit.repeat(level))
    }

    /// Keeps the number of line breaks in `tail` (at least one) and indents one level.
    fn mirrored_tail(&self, tail: &str) -> String {
        let breaks = tail.matches('\n').count().max(1);
        format!("{}{}", "\n".repeat(breaks), self.unit)
    }

    fn comment(&self, comment: &Comment) -> Comment {
        Comment {
            text: comment.text.clone(),
            tail: self.mirrored_tail(&comment.tail),
        }
    }

    /// Lays out a `<plurals>` element sitting at `level`: its children one
    /// level deeper, its end tag back at `level`.
    fn reindent_plurals(&self, plurals: &mut Element, level: usize) {
        if plurals.text.trim().is_empty() && plurals.has_child_nodes() {
            plurals.text = self.line(level + 1);
        }
        let last = plurals.children.len().saturating_sub(1);
        for (position, child) in plurals.children.iter_mut().enumerate() {
            let depth = if position == last { level } else { level + 1 };
            child.set_tail(self.line(depth));
        }
    }

    /// Wraps the master's markup for `entry` in a comment marked NEW.
    fn new_marker(&self, kind: EntryKind, entry: &Element) -> Result<Comment, Error> {
        let mut entry = entry.without_attribute(&format!("xmlns:{XLIFF_PREFIX}"));
        entry.tail.clear();
        let text = match kind {
            EntryKind::String => format!("{NEW_MARKER} {} ", entry.to_xml_string()?),
            EntryKind::Plurals => {
                self.reindent_plurals(&mut entry, 2);
                format!(
                    "{NEW_MARKER}{}{}{}",
                    self.line(2),
                    entry.to_xml_string()?,
                    self.line(1)
                )
            }
        };
        Ok(Comment::new(text))
    }
}
