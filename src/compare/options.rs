use serde::{Deserialize, Serialize};

/// Knobs for [`super::EqualityComparator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorOptions {
    /// Elements treated as equal whatever their content. They are also left
    /// out when counting children, so one side may omit them entirely.
    pub ignored_elements: Vec<String>,
    /// Attributes never compared
    pub ignored_attributes: Vec<String>,
    /// Skip `xmlns`/`xmlns:*` declarations and `xsi:schemaLocation`
    pub ignore_namespace_declarations: bool,
}

impl Default for ComparatorOptions {
    fn default() -> Self {
        Self {
            ignored_elements: vec!["StructuredAnnotations".to_string()],
            ignored_attributes: vec!["ID".to_string()],
            ignore_namespace_declarations: true,
        }
    }
}

impl ComparatorOptions {
    pub(crate) fn ignores_element(&self, local_name: &str) -> bool {
        self.ignored_elements.iter().any(|e| e == local_name)
    }

    pub(crate) fn ignores_attribute(&self, name: &str) -> bool {
        if self.ignore_namespace_declarations
            && (name == "xmlns" || name.starts_with("xmlns:") || name == "xsi:schemaLocation")
        {
            return true;
        }
        self.ignored_attributes.iter().any(|a| a == name)
    }
}
