//! Intermediate XML tree built by the encoder.
//!
//! The encoder only appends to this tree; [`writer`](super::writer) turns it
//! into text. Keeping the two apart lets tests assert on the structure
//! without parsing output.

/// A node inside an element: a child element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with ordered attributes and mixed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds an attribute unless one with the same name already exists.
    ///
    /// Returns `false` when the attribute was ignored; the first value wins.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if self.attribute(&name).is_some() {
            tracing::trace!(element = %self.name, attribute = %name, "duplicate attribute ignored");
            return false;
        }
        self.attributes.push((name, value.into()));
        true
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Appends an empty child element and returns it for further filling.
    pub fn add_child(&mut self, name: impl Into<String>) -> &mut XmlElement {
        self.children.push(XmlNode::Element(XmlElement::new(name)));
        match self.children.last_mut() {
            Some(XmlNode::Element(child)) => child,
            _ => unreachable!("an element was just pushed"),
        }
    }

    /// Appends a child element holding only `text`.
    pub fn add_text_child(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let child = self.add_child(name);
        child.push_text(text);
    }

    /// Appends a text run. Empty text is not stored.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text));
        }
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Child elements named `name`.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |element| element.name == name)
    }

    /// Concatenated text directly inside this element.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_attribute_keeps_first() {
        let mut element = XmlElement::new("resource");
        assert!(element.add_attribute("rel", "child"));
        assert!(!element.add_attribute("rel", "other"));
        assert_eq!(element.attribute("rel"), Some("child"));
        assert_eq!(element.attributes().len(), 1);
    }

    #[test]
    fn test_children_keep_order() {
        let mut element = XmlElement::new("resource");
        element.add_text_child("a", "1");
        element.push_text("mixed");
        element.add_child("b").add_text_child("c", "2");

        let names: Vec<&str> = element.elements().map(XmlElement::name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(element.text(), "mixed");
        assert_eq!(element.children().len(), 3);
    }

    #[test]
    fn test_empty_text_is_not_stored() {
        let mut element = XmlElement::new("flag");
        element.push_text("");
        assert!(element.is_empty());
    }
}
