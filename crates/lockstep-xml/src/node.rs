//! Element tree model.

use std::fmt;

/// A namespace-qualified name.
///
/// Two names are the same name when namespace URI and local name match; the
/// prefix only records how the name was spelled so it can be rendered back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI, empty when the name is not in a namespace.
    pub namespace: String,
    /// Local part of the name.
    pub local: String,
    /// Prefix used in the source document, if any.
    pub prefix: Option<String>,
}

impl QName {
    /// A name in the given namespace.
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
            prefix: None,
        }
    }

    /// A name outside any namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self::new(String::new(), local)
    }

    /// Attach the prefix used when rendering this name.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

impl From<&str> for QName {
    fn from(local: &str) -> Self {
        Self::local(local)
    }
}

/// A single attribute of an element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<QName>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element node of a markup tree.
///
/// `text` is the leaf value and is only meaningful when `children` is empty.
/// Attributes keep document order; whether that order matters is a
/// comparison option, not a property of the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: QName,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    /// Create an element with no attributes, children or text.
    pub fn new(name: impl Into<QName>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append an attribute outside any namespace.
    pub fn with_attribute(mut self, name: impl Into<QName>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Append a namespaced attribute.
    pub fn with_namespaced_attribute(
        self,
        namespace: impl Into<String>,
        local: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.with_attribute(QName::new(namespace, local), value)
    }

    /// Append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child elements.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set the leaf text value.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Returns `true` if the element has no child elements.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
