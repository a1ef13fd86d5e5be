/// Proportional-symbol core: year attributes, scaling, statistics, selection.
///
/// Architecture:
/// ```text
///   Vec<Feature>
///        │
///        ▼
///   ┌─────────────┐
///   │ attributes   │  year-like property keys → AttributeSequence
///   └─────────────┘
///        │
///        ▼
///   ┌──────────────┐      ┌────────────┐
///   │ SymbolDataset │◄────│  session    │  on_step_forward / on_index_selected
///   └──────────────┘      └────────────┘
///        │                     │ sequence: current index, wraparound
///        ▼                     ▼
///   ┌──────────┐         ┌──────────┐
///   │  stats    │───────►│ present   │  radius + popup per feature, legend
///   └──────────┘         └──────────┘
///                              │
///                              ▼
///                  MarkerRenderer / LegendSurface / InputControl
/// ```

pub mod attributes;
pub mod dataset;
pub mod error;
pub mod present;
pub mod scale;
pub mod sequence;
pub mod session;
pub mod stats;
pub mod surface;
