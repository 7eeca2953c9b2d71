/// Data layer: core types, loading, and the cascading filter.
///
/// Architecture:
/// ```text
///  .csv / .xlsx (bundled or uploaded)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset, validate filter columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  named columns × rows of CellValue
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  five cascading stages → filtered row indices
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
