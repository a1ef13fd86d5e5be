use crate::data::model::{Feature, Properties};

use super::error::{SymbolError, SymbolResult};

/// Substrings that mark a property key as a year attribute.
const YEAR_MARKERS: [&str; 2] = ["20", "19"];

// ---------------------------------------------------------------------------
// AttributeSequence – ordered, non-empty list of year attributes
// ---------------------------------------------------------------------------

/// Year attribute names in source order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSequence(Vec<String>);

impl AttributeSequence {
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn last_index(&self) -> usize {
        self.0.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl std::ops::Index<usize> for AttributeSequence {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.0[index]
    }
}

impl TryFrom<Vec<String>> for AttributeSequence {
    type Error = SymbolError;

    fn try_from(names: Vec<String>) -> SymbolResult<Self> {
        if names.is_empty() {
            return Err(SymbolError::EmptyResult);
        }
        Ok(AttributeSequence(names))
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

fn is_year_key(key: &str) -> bool {
    YEAR_MARKERS.iter().any(|marker| key.contains(marker))
}

/// Keep the keys of `sample` that look like years, in insertion order.
pub fn extract(sample: &Properties) -> SymbolResult<AttributeSequence> {
    let names: Vec<String> = sample
        .keys()
        .filter(|key| is_year_key(key))
        .cloned()
        .collect();
    AttributeSequence::try_from(names)
}

/// Extract from the first feature of a dataset.
pub fn extract_from_features(features: &[Feature]) -> SymbolResult<AttributeSequence> {
    let first = features.first().ok_or(SymbolError::EmptyResult)?;
    extract(&first.properties)
}
