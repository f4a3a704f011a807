//! In-memory tree for Android `strings.xml` documents.
//!
//! The tree follows the text/tail model: an element's `text` is the character
//! data between its start tag and its first child, and its `tail` is the
//! character data that follows its end tag, up to the next sibling or the
//! parent's end tag. All character data and attribute values are stored in
//! their raw, still-escaped form, so a document survives a read/write cycle
//! without its entities or CDATA sections being rewritten.

/// Tag of a named scalar entry.
pub const STRING_TAG: &str = "string";
/// Tag of a named plural entry.
pub const PLURALS_TAG: &str = "plurals";
/// Tag of a plural alternative inside `<plurals>`.
pub const ITEM_TAG: &str = "item";
/// Namespace prefix used for inline placeholder markup.
pub const XLIFF_PREFIX: &str = "xliff";
/// Namespace URI bound to [`XLIFF_PREFIX`].
pub const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:1.2";

/// A parsed string-resource document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Comments that appear before the root element, e.g. license headers.
    pub prologue: Vec<Comment>,
    /// The `<resources>` root element.
    pub root: Element,
}

/// A single attribute, key and raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// An XML element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Qualified name, including any namespace prefix (`xliff:g`).
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub text: String,
    pub children: Vec<Node>,
    pub tail: String,
}

/// An XML comment. `text` excludes the `<!--` and `-->` delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comment {
    pub text: String,
    pub tail: String,
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Comment(Comment),
}

/// The two families of translatable entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    String,
    Plurals,
}

impl EntryKind {
    pub fn tag(self) -> &'static str {
        match self {
            EntryKind::String => STRING_TAG,
            EntryKind::Plurals => PLURALS_TAG,
        }
    }
}

/// Classification of a top-level node of `<resources>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceNode<'a> {
    Comment(&'a Comment),
    String(&'a Element),
    Plurals(&'a Element),
    Unknown(&'a Element),
}

impl<'a> ResourceNode<'a> {
    pub fn classify(node: &'a Node) -> Self {
        match node {
            Node::Comment(comment) => ResourceNode::Comment(comment),
            Node::Element(element) => match element.name.as_str() {
                STRING_TAG => ResourceNode::String(element),
                PLURALS_TAG => ResourceNode::Plurals(element),
                _ => ResourceNode::Unknown(element),
            },
        }
    }

    /// The entry kind and element, if this node is a translatable entry.
    pub fn entry(&self) -> Option<(EntryKind, &'a Element)> {
        match *self {
            ResourceNode::String(element) => Some((EntryKind::String, element)),
            ResourceNode::Plurals(element) => Some((EntryKind::Plurals, element)),
            ResourceNode::Comment(_) | ResourceNode::Unknown(_) => None,
        }
    }
}

impl Document {
    /// Iterates over the classified top-level nodes of the root element.
    pub fn resources(&self) -> impl Iterator<Item = ResourceNode<'_>> {
        self.root.children.iter().map(ResourceNode::classify)
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Raw value of the attribute `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }

    pub fn name_attribute(&self) -> Option<&str> {
        self.attribute("name")
    }

    /// `false` only when the entry is explicitly marked `translatable="false"`.
    pub fn is_translatable(&self) -> bool {
        self.attribute("translatable") != Some("false")
    }

    pub fn has_child_nodes(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Comment(_) => None,
        })
    }

    /// Returns a copy without the attribute `key`, removed from every descendant too.
    pub fn without_attribute(&self, key: &str) -> Element {
        Element {
            name: self.name.clone(),
            attributes: self
                .attributes
                .iter()
                .filter(|attr| attr.key != key)
                .cloned()
                .collect(),
            text: self.text.clone(),
            children: self
                .children
                .iter()
                .map(|node| match node {
                    Node::Element(element) => Node::Element(element.without_attribute(key)),
                    Node::Comment(comment) => Node::Comment(comment.clone()),
                })
                .collect(),
            tail: self.tail.clone(),
        }
    }
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Comment {
            text: text.into(),
            tail: String::new(),
        }
    }
}

impl Node {
    pub fn tail(&self) -> &str {
        match self {
            Node::Element(element) => &element.tail,
            Node::Comment(comment) => &comment.tail,
        }
    }

    pub fn set_tail(&mut self, tail: impl Into<String>) {
        match self {
            Node::Element(element) => element.tail = tail.into(),
            Node::Comment(comment) => comment.tail = tail.into(),
        }
    }
}
