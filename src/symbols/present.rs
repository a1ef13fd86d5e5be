use crate::data::model::{Feature, PropertyValue};

use super::error::SymbolResult;
use super::scale::radius;
use super::stats::{statistics_for, SummaryStatistics};

/// Second legend line, naming the three circles top to bottom.
pub const LEGEND_CAPTION: &str = "[highest, avg, lowest]";

// ---------------------------------------------------------------------------
// Instructions handed to the renderer and legend
// ---------------------------------------------------------------------------

/// New radius and popup for one feature's marker.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstruction {
    /// Index into the dataset's feature list.
    pub feature: usize,
    pub radius: f64,
    pub popup: String,
}

/// One legend circle with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendCircle {
    pub radius: f64,
    pub label: String,
}

impl LegendCircle {
    /// A non-finite value has no drawable circle, so it gets no label either.
    fn new(value: f64) -> Self {
        let label = if value.is_finite() {
            format!("{value} breweries")
        } else {
            String::new()
        };
        LegendCircle {
            radius: radius(value),
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendInstruction {
    pub header: String,
    pub caption: &'static str,
    pub max: LegendCircle,
    pub mean: LegendCircle,
    pub min: LegendCircle,
}

impl LegendInstruction {
    pub fn new(attribute: &str, stats: SummaryStatistics) -> Self {
        LegendInstruction {
            header: format!("US Breweries in {attribute}"),
            caption: LEGEND_CAPTION,
            max: LegendCircle::new(stats.max),
            mean: LegendCircle::new(stats.mean),
            min: LegendCircle::new(stats.min),
        }
    }

    /// Circles in drawing order: largest first.
    pub fn circles(&self) -> [(&'static str, &LegendCircle); 3] {
        [("max", &self.max), ("mean", &self.mean), ("min", &self.min)]
    }
}

/// Everything one render pass produces for a single attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolFrame {
    pub attribute: String,
    pub stats: SummaryStatistics,
    pub markers: Vec<RenderInstruction>,
    pub legend: LegendInstruction,
}

impl SymbolFrame {
    /// Frame for an attribute no feature carries: no marker instructions and
    /// a legend that names the attribute but has nothing to draw.
    pub fn uncarried(attribute: &str) -> Self {
        let stats = SummaryStatistics {
            max: f64::NAN,
            min: f64::NAN,
            mean: f64::NAN,
        };
        SymbolFrame {
            attribute: attribute.to_string(),
            stats,
            markers: Vec::new(),
            legend: LegendInstruction::new(attribute, stats),
        }
    }
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

pub fn popup_text(state: &str, attribute: &str, value: &PropertyValue) -> String {
    format!("Breweries open in {state} during {attribute}: {value}")
}

/// Compute marker and legend instructions for `attribute`.
///
/// Features that do not carry the attribute get no instruction, so their
/// markers keep whatever they showed before.
pub fn present(attribute: &str, features: &[Feature]) -> SymbolResult<SymbolFrame> {
    let stats = statistics_for(attribute, features)?;

    let markers = features
        .iter()
        .enumerate()
        .filter_map(|(i, feature)| {
            let value = feature.value(attribute)?;
            Some(RenderInstruction {
                feature: i,
                radius: radius(value.as_f64()),
                popup: popup_text(&feature.state(), attribute, value),
            })
        })
        .collect();

    Ok(SymbolFrame {
        attribute: attribute.to_string(),
        stats,
        markers,
        legend: LegendInstruction::new(attribute, stats),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Geometry, Properties};
    use crate::symbols::error::SymbolError;

    fn feature(state: &str, years: &[(&str, PropertyValue)]) -> Feature {
        let mut properties = Properties::new();
        properties.insert("STATE".into(), PropertyValue::String(state.into()));
        for (year, value) in years {
            properties.insert(year.to_string(), value.clone());
        }
        Feature::new(properties, Geometry::default())
    }

    #[test]
    fn popup_keeps_value_verbatim() {
        let features = vec![feature(
            "CO",
            &[("2014", PropertyValue::String("0235".into()))],
        )];
        let frame = present("2014", &features).unwrap();
        assert_eq!(
            frame.markers[0].popup,
            "Breweries open in CO during 2014: 0235"
        );
        assert_eq!(frame.markers[0].radius, radius(235.0));
    }

    #[test]
    fn feature_missing_attribute_gets_no_instruction() {
        let features = vec![
            feature("MN", &[("2012", PropertyValue::Integer(9))]),
            feature("WI", &[("2011", PropertyValue::Integer(40))]),
        ];
        let frame = present("2012", &features).unwrap();
        assert_eq!(frame.markers.len(), 1);
        assert_eq!(frame.markers[0].feature, 0);
        assert_eq!(frame.stats.max, 9.0);
        assert_eq!(frame.stats.min, 9.0);
    }

    #[test]
    fn non_numeric_value_yields_nan_radius_without_aborting() {
        let features = vec![
            feature("MN", &[("2012", PropertyValue::String("?".into()))]),
            feature("WI", &[("2012", PropertyValue::Integer(4))]),
        ];
        let frame = present("2012", &features).unwrap();
        assert_eq!(frame.markers.len(), 2);
        assert!(frame.markers[0].radius.is_nan());
        assert_eq!(frame.markers[1].radius, radius(4.0));
    }

    #[test]
    fn legend_labels_and_radii_follow_statistics() {
        let features = vec![
            feature("A", &[("2015", PropertyValue::Integer(10))]),
            feature("B", &[("2015", PropertyValue::Integer(25))]),
        ];
        let frame = present("2015", &features).unwrap();
        let legend = &frame.legend;

        assert_eq!(legend.header, "US Breweries in 2015");
        assert_eq!(legend.caption, "[highest, avg, lowest]");
        assert_eq!(legend.max.label, "25 breweries");
        assert_eq!(legend.mean.label, "17.5 breweries");
        assert_eq!(legend.min.label, "10 breweries");
        assert_eq!(legend.mean.radius, radius(17.5));

        let names: Vec<&str> = legend.circles().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["max", "mean", "min"]);
    }

    #[test]
    fn attribute_nobody_carries_is_empty_set() {
        let features = vec![feature("A", &[("2015", PropertyValue::Integer(1))])];
        assert!(matches!(
            present("2099", &features),
            Err(SymbolError::EmptySet { .. })
        ));
    }

    #[test]
    fn all_nan_values_leave_legend_labels_empty() {
        let features = vec![
            feature("A", &[("2015", PropertyValue::String("n/a".into()))]),
            feature("B", &[("2015", PropertyValue::Bool(true))]),
        ];
        let frame = present("2015", &features).unwrap();
        let legend = &frame.legend;

        assert_eq!(frame.stats.max, f64::NEG_INFINITY);
        assert_eq!(frame.stats.min, f64::INFINITY);
        assert_eq!(legend.header, "US Breweries in 2015");
        for (_, circle) in legend.circles() {
            assert!(!circle.radius.is_finite());
            assert_eq!(circle.label, "");
        }
    }

    #[test]
    fn uncarried_frame_names_attribute_without_markers() {
        let frame = SymbolFrame::uncarried("2016");
        assert_eq!(frame.attribute, "2016");
        assert!(frame.markers.is_empty());
        assert_eq!(frame.legend.header, "US Breweries in 2016");
        for (_, circle) in frame.legend.circles() {
            assert!(circle.radius.is_nan());
            assert_eq!(circle.label, "");
        }
    }
}
