/// Data layer: feature types and loading.
///
/// Architecture:
/// ```text
///  .geojson / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<Feature>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  Feature: ordered properties + anchor / outlines
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
