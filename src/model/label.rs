//! Label vocabulary declared in the annotation document.

/// A single label declared by the document, with its display color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDefinition {
    /// Display name of the label (doubles as the numeric class id).
    pub name: String,
    /// RGB color assigned to the label by the annotation tool.
    pub color: [u8; 3],
}

impl LabelDefinition {
    /// Create a new label definition with the given name and color.
    pub fn new(name: impl Into<String>, color: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Mapping from label name to color, in declaration order.
///
/// Names are unique. Declaring a name a second time replaces its color but
/// keeps the position of the first declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelVocabulary {
    labels: Vec<LabelDefinition>,
}

impl LabelVocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label, replacing the color of an existing label with the same name.
    pub fn insert(&mut self, name: impl Into<String>, color: [u8; 3]) {
        let name = name.into();
        match self.labels.iter_mut().find(|l| l.name == name) {
            Some(existing) => existing.color = color,
            None => self.labels.push(LabelDefinition::new(name, color)),
        }
    }

    /// Look up the color of a label by name.
    pub fn color(&self, name: &str) -> Option<[u8; 3]> {
        self.get(name).map(|l| l.color)
    }

    /// Look up a label by name.
    pub fn get(&self, name: &str) -> Option<&LabelDefinition> {
        self.labels.iter().find(|l| l.name == name)
    }

    /// Whether a label with this name was declared.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over labels in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &LabelDefinition> {
        self.labels.iter()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the vocabulary declares no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl FromIterator<(String, [u8; 3])> for LabelVocabulary {
    fn from_iter<I: IntoIterator<Item = (String, [u8; 3])>>(iter: I) -> Self {
        let mut vocabulary = Self::new();
        for (name, color) in iter {
            vocabulary.insert(name, color);
        }
        vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut vocabulary = LabelVocabulary::new();
        vocabulary.insert("1", [250, 50, 83]);
        vocabulary.insert("2", [52, 209, 183]);

        assert_eq!(vocabulary.len(), 2);
        assert_eq!(vocabulary.color("1"), Some([250, 50, 83]));
        assert!(vocabulary.contains("2"));
        assert!(!vocabulary.contains("liver"));
    }

    #[test]
    fn test_duplicate_name_replaces_color_in_place() {
        let mut vocabulary = LabelVocabulary::new();
        vocabulary.insert("1", [1, 1, 1]);
        vocabulary.insert("2", [2, 2, 2]);
        vocabulary.insert("1", [9, 9, 9]);

        let names: Vec<_> = vocabulary.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["1", "2"]);
        assert_eq!(vocabulary.color("1"), Some([9, 9, 9]));
    }
}
