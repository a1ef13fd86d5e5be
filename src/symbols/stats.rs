use crate::data::model::Feature;

use super::error::{SymbolError, SymbolResult};

/// Highest, lowest and midpoint value of one attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    pub max: f64,
    pub min: f64,
    /// `(max + min) / 2`, the legend's middle circle. Not an arithmetic mean.
    pub mean: f64,
}

/// Scan every feature carrying `attribute` and summarise its values.
///
/// Comparisons are strict, so a `NaN` value never replaces the running
/// min or max.
pub fn statistics_for(attribute: &str, features: &[Feature]) -> SymbolResult<SummaryStatistics> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut seen = 0usize;

    for value in features.iter().filter_map(|f| f.value(attribute)) {
        let v = value.as_f64();
        seen += 1;
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    if seen == 0 {
        return Err(SymbolError::EmptySet {
            attribute: attribute.to_string(),
        });
    }

    Ok(SummaryStatistics {
        max,
        min,
        mean: (max + min) / 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Geometry, Properties, PropertyValue};

    fn feature(entries: &[(&str, PropertyValue)]) -> Feature {
        let properties: Properties = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Feature::new(properties, Geometry::default())
    }

    fn counts(attribute: &str, values: &[i64]) -> Vec<Feature> {
        values
            .iter()
            .map(|&v| feature(&[(attribute, PropertyValue::Integer(v))]))
            .collect()
    }

    #[test]
    fn mean_is_midpoint_of_extremes() {
        let features = counts("2010", &[2, 8, 5]);
        let stats = statistics_for("2010", &features).unwrap();
        assert_eq!(
            stats,
            SummaryStatistics {
                max: 8.0,
                min: 2.0,
                mean: 5.0
            }
        );

        // 1, 1, 10 averages to 4 but the midpoint is 5.5.
        let skewed = counts("2010", &[1, 1, 10]);
        assert_eq!(statistics_for("2010", &skewed).unwrap().mean, 5.5);
    }

    #[test]
    fn features_without_attribute_are_skipped() {
        let features = vec![
            feature(&[("2012", PropertyValue::Integer(4))]),
            feature(&[("2011", PropertyValue::Integer(100))]),
            feature(&[("2012", PropertyValue::Null)]),
        ];
        let stats = statistics_for("2012", &features).unwrap();
        assert_eq!((stats.min, stats.max, stats.mean), (4.0, 4.0, 4.0));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let features = vec![
            feature(&[("2001", PropertyValue::String("12".into()))]),
            feature(&[("2001", PropertyValue::String("3".into()))]),
        ];
        let stats = statistics_for("2001", &features).unwrap();
        assert_eq!((stats.min, stats.max), (3.0, 12.0));
    }

    #[test]
    fn nan_values_do_not_disturb_extremes() {
        let features = vec![
            feature(&[("2001", PropertyValue::Integer(6))]),
            feature(&[("2001", PropertyValue::String("unknown".into()))]),
            feature(&[("2001", PropertyValue::Integer(2))]),
        ];
        let stats = statistics_for("2001", &features).unwrap();
        assert_eq!((stats.min, stats.max, stats.mean), (2.0, 6.0, 4.0));
    }

    #[test]
    fn no_carrier_is_empty_set() {
        let features = counts("2010", &[1, 2]);
        assert_eq!(
            statistics_for("1999", &features),
            Err(SymbolError::EmptySet {
                attribute: "1999".into()
            })
        );
    }
}
