/// A single element of a parsed document and everything below it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Namespace prefix as written (`ome` in `<ome:Image>`)
    pub prefix: Option<String>,
    /// Local element name
    pub local_name: String,
    /// Attributes in document order, keyed by qualified name
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
    /// Trimmed character content, if any
    pub text: Option<String>,
}

impl XmlElement {
    /// Create an unprefixed element with no attributes or content
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            ..Default::default()
        }
    }

    /// Split a qualified name (`ome:Image`) into prefix and local name
    pub fn from_qualified(name: &str) -> Self {
        match name.split_once(':') {
            Some((prefix, local)) => Self {
                prefix: Some(prefix.to_string()),
                local_name: local.to_string(),
                ..Default::default()
            },
            None => Self::new(name),
        }
    }

    /// Qualified name as it would be written
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style text setter
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Look up an attribute by qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attribute(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    /// Remove an attribute, returning its value
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(index).1)
    }

    /// Rename an attribute, keeping its position. Returns false if absent.
    pub fn rename_attribute(&mut self, from: &str, to: &str) -> bool {
        if self.attribute(to).is_some() {
            // the target already exists; the source value is dropped
            return self.remove_attribute(from).is_some();
        }
        match self.attributes.iter_mut().find(|(key, _)| key == from) {
            Some(slot) => {
                slot.0 = to.to_string();
                true
            }
            None => false,
        }
    }

    /// First child with the given local name
    pub fn child(&self, local_name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.local_name == local_name)
    }

    /// Mutable first child with the given local name
    pub fn child_mut(&mut self, local_name: &str) -> Option<&mut XmlElement> {
        self.children.iter_mut().find(|c| c.local_name == local_name)
    }

    /// All children with the given local name
    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.local_name == local_name)
    }

    /// Pre-order traversal of this element and all descendants
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Find a descendant (or self) by local name and `ID` attribute
    pub fn find_by_id(&self, local_name: &str, id: &str) -> Option<&XmlElement> {
        self.descendants()
            .into_iter()
            .find(|n| n.local_name == local_name && n.attribute("ID") == Some(id))
    }

    /// Apply `f` to this element and every descendant, parents first
    pub fn walk_mut<F: FnMut(&mut XmlElement)>(&mut self, f: &mut F) {
        f(self);
        for child in &mut self.children {
            child.walk_mut(f);
        }
    }

    /// True when the element has no children and no text
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.as_deref().map_or(true, str::is_empty)
    }
}
