use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use indexmap::IndexMap;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{Feature, Geometry, LonLat, Properties, PropertyValue};

/// Coordinate columns in tabular (CSV / Parquet) datasets.
const LON_COLUMN: &str = "longitude";
const LAT_COLUMN: &str = "latitude";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the features of a dataset file.  Dispatch by extension.
///
/// Supported formats:
/// * `.geojson` / `.json` – GeoJSON FeatureCollection
/// * `.csv`     – one row per feature, `longitude` / `latitude` columns
/// * `.parquet` – same layout as CSV
pub fn load_file(path: &Path) -> Result<Vec<Feature>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let features = match ext.as_str() {
        "geojson" | "json" => load_geojson(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::info!("Loaded {} features from {}", features.len(), path.display());
    Ok(features)
}

// ---------------------------------------------------------------------------
// GeoJSON loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    #[serde(default)]
    properties: Option<IndexMap<String, JsonValue>>,
    #[serde(default)]
    geometry: Option<GeoJsonGeometry>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonGeometry {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    coordinates: JsonValue,
}

/// Expected layout:
///
/// ```json
/// {
///   "type": "FeatureCollection",
///   "features": [
///     {
///       "type": "Feature",
///       "properties": { "STATE": "Minnesota", "2008": 32, "2009": "35" },
///       "geometry": { "type": "Point", "coordinates": [-94.3, 46.3] }
///     }
///   ]
/// }
/// ```
fn load_geojson(path: &Path) -> Result<Vec<Feature>> {
    let text = std::fs::read_to_string(path).context("reading GeoJSON file")?;
    parse_geojson(&text)
}

/// Parse GeoJSON text. Property order is kept as written.
pub fn parse_geojson(text: &str) -> Result<Vec<Feature>> {
    let collection: FeatureCollection =
        serde_json::from_str(text).context("parsing GeoJSON FeatureCollection")?;

    let features = collection
        .features
        .into_iter()
        .map(|f| {
            let properties: Properties = f
                .properties
                .unwrap_or_default()
                .into_iter()
                .map(|(k, v)| (k, json_to_property(v)))
                .collect();
            let geometry = f.geometry.map(convert_geometry).unwrap_or_default();
            Feature::new(properties, geometry)
        })
        .collect();

    Ok(features)
}

fn json_to_property(val: JsonValue) -> PropertyValue {
    match val {
        JsonValue::String(s) => PropertyValue::String(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                PropertyValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                PropertyValue::Float(f)
            } else {
                PropertyValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => PropertyValue::Bool(b),
        JsonValue::Null => PropertyValue::Null,
        other => PropertyValue::String(other.to_string()),
    }
}

fn convert_geometry(geometry: GeoJsonGeometry) -> Geometry {
    let coords = &geometry.coordinates;
    match geometry.ty.as_str() {
        "Point" => match json_lonlat(coords) {
            Some([lon, lat]) => Geometry::point(lon, lat),
            None => Geometry::default(),
        },
        "Polygon" => {
            let outer = coords
                .as_array()
                .and_then(|rings| rings.first())
                .map(json_ring);
            Geometry::from_rings(outer.into_iter().collect())
        }
        "MultiPolygon" => {
            let outers = coords
                .as_array()
                .map(|polygons| {
                    polygons
                        .iter()
                        .filter_map(|p| p.as_array()?.first().map(json_ring))
                        .collect()
                })
                .unwrap_or_default();
            Geometry::from_rings(outers)
        }
        other => {
            log::debug!("Geometry type {other} is not drawn");
            Geometry::default()
        }
    }
}

fn json_lonlat(val: &JsonValue) -> Option<LonLat> {
    let pair = val.as_array()?;
    Some([pair.first()?.as_f64()?, pair.get(1)?.as_f64()?])
}

fn json_ring(val: &JsonValue) -> Vec<LonLat> {
    val.as_array()
        .map(|points| points.iter().filter_map(json_lonlat).collect())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names.
/// `longitude` and `latitude` place the symbol; every other column is a
/// property, kept as text in header order. Empty cells become `null`.
fn load_csv(path: &Path) -> Result<Vec<Feature>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let lon_idx = headers
        .iter()
        .position(|h| h == LON_COLUMN)
        .context("CSV missing 'longitude' column")?;
    let lat_idx = headers
        .iter()
        .position(|h| h == LAT_COLUMN)
        .context("CSV missing 'latitude' column")?;

    let mut features = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let lon = parse_coordinate(record.get(lon_idx).unwrap_or(""), row_no, LON_COLUMN)?;
        let lat = parse_coordinate(record.get(lat_idx).unwrap_or(""), row_no, LAT_COLUMN)?;

        let mut properties = Properties::new();
        for (col_idx, value) in record.iter().enumerate() {
            if col_idx == lon_idx || col_idx == lat_idx {
                continue;
            }
            let cell = if value.is_empty() {
                PropertyValue::Null
            } else {
                PropertyValue::String(value.to_string())
            };
            properties.insert(headers[col_idx].clone(), cell);
        }

        features.push(Feature::new(properties, Geometry::point(lon, lat)));
    }

    Ok(features)
}

fn parse_coordinate(s: &str, row: usize, col: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one row per feature.
///
/// Expected schema:
/// - `longitude`, `latitude`: Float64 / Float32 / Int
/// - Any other columns are properties (strings, ints, floats, bools), in
///   schema order
fn load_parquet(path: &Path) -> Result<Vec<Feature>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut features = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let lon_idx = schema
            .index_of(LON_COLUMN)
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'longitude' column"))?;
        let lat_idx = schema
            .index_of(LAT_COLUMN)
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'latitude' column"))?;

        let property_cols: Vec<(usize, String)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != lon_idx && *i != lat_idx)
            .map(|(i, f)| (i, f.name().clone()))
            .collect();

        for row in 0..batch.num_rows() {
            let lon = extract_f64(batch.column(lon_idx), row)
                .with_context(|| format!("Row {row}: failed to read 'longitude'"))?;
            let lat = extract_f64(batch.column(lat_idx), row)
                .with_context(|| format!("Row {row}: failed to read 'latitude'"))?;

            let mut properties = Properties::new();
            for (col_idx, col_name) in &property_cols {
                let value = extract_property_value(batch.column(*col_idx), row);
                properties.insert(col_name.clone(), value);
            }

            features.push(Feature::new(properties, Geometry::point(lon, lat)));
        }
    }

    Ok(features)
}

// -- Parquet / Arrow helpers --

/// Read a numeric coordinate cell.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null coordinate");
    }
    match extract_property_value(col, row) {
        PropertyValue::Float(v) => Ok(v),
        PropertyValue::Integer(i) => Ok(i as f64),
        _ => bail!("expected a numeric column, got {:?}", col.data_type()),
    }
}

/// Extract a single property value from an Arrow column at a given row.
fn extract_property_value(col: &Arc<dyn Array>, row: usize) -> PropertyValue {
    if col.is_null(row) {
        return PropertyValue::Null;
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| PropertyValue::String(a.value(row).to_string())),
        DataType::LargeUtf8 => Some(PropertyValue::String(
            col.as_string::<i64>().value(row).to_string(),
        )),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| PropertyValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| PropertyValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| PropertyValue::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| PropertyValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| PropertyValue::Bool(a.value(row))),
        _ => Some(PropertyValue::String(format!("{:?}", col.data_type()))),
    };
    value.unwrap_or(PropertyValue::Null)
}
