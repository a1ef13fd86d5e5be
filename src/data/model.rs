use std::fmt;

use indexmap::IndexMap;

// ---------------------------------------------------------------------------
// PropertyValue – a single entry in a feature's property mapping
// ---------------------------------------------------------------------------

/// A dynamically-typed property value as found in GeoJSON / CSV / Parquet input.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for PropertyValue {
    /// Values are shown as written in the source: no rounding, no padding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{s}"),
            PropertyValue::Integer(i) => write!(f, "{i}"),
            PropertyValue::Float(v) => write!(f, "{v}"),
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Null => write!(f, "null"),
        }
    }
}

impl PropertyValue {
    /// Numeric coercion used for scaling and statistics.
    ///
    /// Numbers pass through, strings are trimmed and parsed, everything else
    /// (and any string that does not parse) becomes `NaN`.
    pub fn as_f64(&self) -> f64 {
        match self {
            PropertyValue::Float(v) => *v,
            PropertyValue::Integer(i) => *i as f64,
            PropertyValue::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            PropertyValue::Bool(_) | PropertyValue::Null => f64::NAN,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }
}

/// Property mapping of one feature, in source insertion order.
pub type Properties = IndexMap<String, PropertyValue>;

// ---------------------------------------------------------------------------
// Geometry – only what the viewer needs to place and outline a marker
// ---------------------------------------------------------------------------

/// Lon/lat position.
pub type LonLat = [f64; 2];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    /// Where the proportional symbol is drawn.
    pub anchor: Option<LonLat>,
    /// Outer rings of polygon geometry, drawn as outlines.
    pub outlines: Vec<Vec<LonLat>>,
}

impl Geometry {
    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry {
            anchor: Some([lon, lat]),
            outlines: Vec::new(),
        }
    }

    /// Build from polygon outer rings; the anchor is the vertex mean of the
    /// ring with the most vertices (the mainland, for multi-part states).
    pub fn from_rings(rings: Vec<Vec<LonLat>>) -> Self {
        let anchor = rings.iter().max_by_key(|ring| ring.len()).and_then(|ring| {
            if ring.is_empty() {
                return None;
            }
            let n = ring.len() as f64;
            let (sx, sy) = ring
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
            Some([sx / n, sy / n])
        });
        Geometry {
            anchor,
            outlines: rings,
        }
    }
}

// ---------------------------------------------------------------------------
// Feature – one geographic record
// ---------------------------------------------------------------------------

/// Property name holding the state label used in popups.
pub const STATE_KEY: &str = "STATE";

#[derive(Debug, Clone, Default)]
pub struct Feature {
    pub properties: Properties,
    pub geometry: Geometry,
}

impl Feature {
    pub fn new(properties: Properties, geometry: Geometry) -> Self {
        Feature {
            properties,
            geometry,
        }
    }

    /// The value of `attribute`, or `None` when the feature does not carry it.
    /// A `null` value counts as absent.
    pub fn value(&self, attribute: &str) -> Option<&PropertyValue> {
        self.properties.get(attribute).filter(|v| !v.is_null())
    }

    /// State label for popups; empty when the feature has no `STATE`.
    pub fn state(&self) -> String {
        self.properties
            .get(STATE_KEY)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_coercion_follows_value_type() {
        assert_eq!(PropertyValue::Integer(12).as_f64(), 12.0);
        assert_eq!(PropertyValue::Float(2.5).as_f64(), 2.5);
        assert_eq!(PropertyValue::String(" 42 ".into()).as_f64(), 42.0);
        assert!(PropertyValue::String("n/a".into()).as_f64().is_nan());
        assert!(PropertyValue::Bool(true).as_f64().is_nan());
        assert!(PropertyValue::Null.as_f64().is_nan());
    }

    #[test]
    fn display_is_verbatim() {
        assert_eq!(PropertyValue::String("007".into()).to_string(), "007");
        assert_eq!(PropertyValue::Integer(30).to_string(), "30");
        assert_eq!(PropertyValue::Float(17.5).to_string(), "17.5");
    }

    #[test]
    fn null_value_counts_as_missing() {
        let mut props = Properties::new();
        props.insert("2015".into(), PropertyValue::Null);
        props.insert("2016".into(), PropertyValue::Integer(3));
        let feature = Feature::new(props, Geometry::default());

        assert!(feature.value("2015").is_none());
        assert!(feature.value("2014").is_none());
        assert_eq!(feature.value("2016"), Some(&PropertyValue::Integer(3)));
    }

    #[test]
    fn polygon_anchor_is_vertex_mean_of_largest_ring() {
        let geometry = Geometry::from_rings(vec![
            vec![[10.0, 10.0], [11.0, 10.0], [10.0, 11.0]],
            vec![[0.0, 0.0], [4.0, 0.0], [4.0, 2.0], [0.0, 2.0]],
        ]);
        assert_eq!(geometry.anchor, Some([2.0, 1.0]));
        assert_eq!(geometry.outlines.len(), 2);
        assert_eq!(Geometry::from_rings(Vec::new()).anchor, None);
    }
}
