//! Read-only tree interface over parsed XML.

/// The queries the Doxygen readers make of an element.
///
/// Implemented for [`roxmltree::Node`]; any XML library that can answer
/// these five questions can feed the readers.
pub trait DocNode: Sized {
    /// Element tag name.
    fn tag(&self) -> &str;

    /// Attribute value by name.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// First direct child element with the given tag.
    fn first_child(&self, tag: &str) -> Option<Self>;

    /// All direct child elements with the given tag, in document order.
    fn children(&self, tag: &str) -> Vec<Self>;

    /// All descendant elements with the given tag, in document order.
    fn descendants(&self, tag: &str) -> Vec<Self>;

    /// Concatenated text of this element and everything below it.
    fn text(&self) -> String;

    /// Text of the first child with the given tag, trimmed.
    fn child_text(&self, tag: &str) -> Option<String> {
        self.first_child(tag).map(|child| child.text().trim().to_string())
    }
}

impl<'a, 'input: 'a> DocNode for roxmltree::Node<'a, 'input> {
    fn tag(&self) -> &str {
        self.tag_name().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        roxmltree::Node::attribute(self, name)
    }

    fn first_child(&self, tag: &str) -> Option<Self> {
        self.children()
            .find(|child| child.is_element() && child.tag_name().name() == tag)
    }

    fn children(&self, tag: &str) -> Vec<Self> {
        roxmltree::Node::children(self)
            .filter(|child| child.is_element() && child.tag_name().name() == tag)
            .collect()
    }

    fn descendants(&self, tag: &str) -> Vec<Self> {
        roxmltree::Node::descendants(self)
            .skip(1)
            .filter(|node| node.is_element() && node.tag_name().name() == tag)
            .collect()
    }

    fn text(&self) -> String {
        roxmltree::Node::descendants(self)
            .filter(|node| node.is_text())
            .filter_map(|node| node.text())
            .collect()
    }
}
