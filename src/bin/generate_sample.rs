use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use indexmap::IndexMap;
use parquet::arrow::ArrowWriter;
use serde_json::{json, Value as JsonValue};

const FIRST_YEAR: i64 = 1984;
const LAST_YEAR: i64 = 2019;

/// State label, centroid (lon, lat), breweries in the first year, yearly growth.
const STATES: [(&str, f64, f64, f64, f64); 20] = [
    ("California", -119.4, 36.8, 12.0, 0.110),
    ("Colorado", -105.5, 39.0, 4.0, 0.125),
    ("Oregon", -120.5, 44.0, 5.0, 0.115),
    ("Washington", -120.7, 47.4, 4.0, 0.120),
    ("Michigan", -84.5, 44.3, 1.0, 0.150),
    ("New York", -75.5, 42.9, 3.0, 0.115),
    ("Pennsylvania", -77.2, 40.9, 6.0, 0.095),
    ("Texas", -99.3, 31.5, 2.0, 0.120),
    ("Vermont", -72.7, 44.0, 1.0, 0.100),
    ("Maine", -69.2, 45.4, 1.0, 0.115),
    ("Minnesota", -94.3, 46.3, 2.0, 0.110),
    ("Wisconsin", -89.9, 44.6, 5.0, 0.085),
    ("Illinois", -89.2, 40.0, 2.0, 0.120),
    ("Ohio", -82.8, 40.3, 2.0, 0.115),
    ("North Carolina", -79.4, 35.6, 1.0, 0.145),
    ("Florida", -81.7, 28.6, 2.0, 0.120),
    ("Montana", -109.6, 47.0, 1.0, 0.110),
    ("Utah", -111.7, 39.3, 1.0, 0.095),
    ("Missouri", -92.5, 38.4, 2.0, 0.100),
    ("Georgia", -83.4, 32.7, 1.0, 0.115),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Compound growth with ±10% jitter; counts never shrink year to year.
fn brewery_counts(base: f64, growth: f64, rng: &mut SimpleRng) -> Vec<i64> {
    let mut last = 0;
    (FIRST_YEAR..=LAST_YEAR)
        .map(|year| {
            let t = (year - FIRST_YEAR) as f64;
            let jitter = 0.9 + 0.2 * rng.next_f64();
            let count = (base * (1.0 + growth).powf(t) * jitter).round() as i64;
            last = count.max(last);
            last
        })
        .collect()
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let years: Vec<String> = (FIRST_YEAR..=LAST_YEAR).map(|y| y.to_string()).collect();

    let counts: Vec<Vec<i64>> = STATES
        .iter()
        .map(|&(_, _, _, base, growth)| brewery_counts(base, growth, &mut rng))
        .collect();

    // ---- GeoJSON ----
    let features: Vec<JsonValue> = STATES
        .iter()
        .zip(&counts)
        .map(|(&(state, lon, lat, _, _), row)| {
            let mut properties: IndexMap<String, JsonValue> = IndexMap::new();
            properties.insert("STATE".into(), json!(state));
            for (year, count) in years.iter().zip(row) {
                properties.insert(year.clone(), json!(count));
            }
            json!({
                "type": "Feature",
                "properties": properties,
                "geometry": { "type": "Point", "coordinates": [lon, lat] }
            })
        })
        .collect();
    let collection = json!({ "type": "FeatureCollection", "features": features });

    let geojson_path = "sample_breweries.geojson";
    let text = serde_json::to_string_pretty(&collection).expect("Failed to serialize GeoJSON");
    std::fs::write(geojson_path, text).expect("Failed to write GeoJSON");

    // ---- Parquet ----
    let mut fields = vec![
        Field::new("STATE", DataType::Utf8, false),
        Field::new("longitude", DataType::Float64, false),
        Field::new("latitude", DataType::Float64, false),
    ];
    fields.extend(years.iter().map(|y| Field::new(y, DataType::Int64, false)));
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            STATES.iter().map(|s| s.0).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            STATES.iter().map(|s| s.1).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            STATES.iter().map(|s| s.2).collect::<Vec<_>>(),
        )),
    ];
    for col in 0..years.len() {
        let values: Vec<i64> = counts.iter().map(|row| row[col]).collect();
        columns.push(Arc::new(Int64Array::from(values)));
    }

    let batch = RecordBatch::try_new(schema.clone(), columns).expect("Failed to create RecordBatch");

    let parquet_path = "sample_breweries.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} states × {} years to {geojson_path} and {parquet_path}",
        STATES.len(),
        years.len()
    );
}
