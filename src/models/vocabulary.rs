use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::session::ConfigurationError;

/// A single vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    /// Written form, used as the prompt and as the identity key within a pool.
    #[serde(alias = "w")]
    pub surface: String,
    #[serde(alias = "r")]
    pub reading: String,
    #[serde(alias = "m")]
    pub meaning: String,
    #[serde(alias = "p", default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

impl VocabularyItem {
    pub fn new(
        surface: impl Into<String>,
        reading: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            surface: surface.into(),
            reading: reading.into(),
            meaning: meaning.into(),
            part_of_speech: None,
        }
    }

    pub fn with_part_of_speech(mut self, part_of_speech: impl Into<String>) -> Self {
        self.part_of_speech = Some(part_of_speech.into());
        self
    }
}

/// An ordered pool of vocabulary items with unique surface forms.
///
/// Every item can serve as a distractor. Only the items in the question set
/// are asked, which is the whole pool unless it was narrowed with
/// [`VocabularyPool::focus_on_surface_forms`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyPool {
    items: Vec<VocabularyItem>,
    questions: Vec<usize>,
}

impl VocabularyPool {
    /// Build a pool, rejecting duplicate surface forms.
    pub fn new(items: Vec<VocabularyItem>) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.surface.as_str()) {
                return Err(ConfigurationError::DuplicateSurfaceForm(item.surface.clone()));
            }
        }
        let questions = (0..items.len()).collect();
        Ok(Self { items, questions })
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the entry whose surface form matches a question prompt.
    pub fn lookup(&self, prompt: &str) -> Option<&VocabularyItem> {
        self.items.iter().find(|item| item.surface == prompt)
    }

    /// Indices of the items that may be asked, in pool order.
    pub fn question_indices(&self) -> &[usize] {
        &self.questions
    }

    /// Ask only the words listed in `surfaces`, preserving pool order.
    ///
    /// Used for drilling the words a learner marked as unfamiliar. The rest
    /// of the pool still supplies distractors.
    pub fn focus_on_surface_forms<S: AsRef<str>>(&mut self, surfaces: &[S]) {
        let wanted: HashSet<&str> = surfaces.iter().map(AsRef::as_ref).collect();
        self.questions = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| wanted.contains(item.surface.as_str()))
            .map(|(index, _)| index)
            .collect();
    }
}
