use std::collections::HashSet;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("Duplicate label: {0}")]
    Duplicate(String),
}

/// Menu entries in on-screen traversal order.
///
/// The index of a label stands in for its physical position: a lower index is
/// further up the menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedLabelList {
    labels: Vec<String>,
}

impl OrderedLabelList {
    pub fn new<I, S>(labels: I) -> Result<Self, LabelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.to_lowercase()) {
                return Err(LabelError::Duplicate(label.clone()));
            }
        }

        Ok(Self { labels })
    }

    /// Case-insensitive position of `label`
    pub fn position(&self, label: &str) -> Option<usize> {
        let label = label.to_lowercase();
        self.labels.iter().position(|l| l.to_lowercase() == label)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
