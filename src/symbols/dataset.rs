use crate::data::model::Feature;

use super::attributes::{extract_from_features, AttributeSequence};
use super::error::SymbolResult;
use super::stats::{statistics_for, SummaryStatistics};

// ---------------------------------------------------------------------------
// SymbolDataset – features plus the year attributes they share
// ---------------------------------------------------------------------------

/// The loaded features and their attribute sequence. Fixed once built.
#[derive(Debug, Clone)]
pub struct SymbolDataset {
    features: Vec<Feature>,
    attributes: AttributeSequence,
}

impl SymbolDataset {
    /// Derive the attribute sequence from the first feature.
    pub fn new(features: Vec<Feature>) -> SymbolResult<Self> {
        let attributes = extract_from_features(&features)?;
        Ok(SymbolDataset {
            features,
            attributes,
        })
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn attributes(&self) -> &AttributeSequence {
        &self.attributes
    }

    /// Number of features.
    pub(crate) fn len(&self) -> usize {
        self.features.len()
    }

    pub fn statistics_for(&self, attribute: &str) -> SymbolResult<SummaryStatistics> {
        statistics_for(attribute, &self.features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Geometry, Properties, PropertyValue};
    use crate::symbols::error::SymbolError;

    fn feature(state: &str, years: &[(&str, i64)]) -> Feature {
        let mut properties = Properties::new();
        properties.insert("STATE".into(), PropertyValue::String(state.into()));
        for (year, count) in years {
            properties.insert(year.to_string(), PropertyValue::Integer(*count));
        }
        Feature::new(properties, Geometry::point(-93.0, 46.0))
    }

    #[test]
    fn attributes_come_from_first_feature() {
        let dataset = SymbolDataset::new(vec![
            feature("MN", &[("2015", 1), ("2016", 2)]),
            feature("WI", &[("2015", 3), ("2016", 4), ("2017", 5)]),
        ])
        .unwrap();

        let names: Vec<&str> = dataset.attributes().iter().collect();
        assert_eq!(names, vec!["2015", "2016"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.statistics_for("2016").unwrap().max, 4.0);
    }

    #[test]
    fn dataset_without_years_is_rejected() {
        let err = SymbolDataset::new(vec![feature("MN", &[])]).unwrap_err();
        assert_eq!(err, SymbolError::EmptyResult);
        assert!(SymbolDataset::new(Vec::new()).is_err());
    }
}
