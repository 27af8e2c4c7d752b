/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, island index (immutable, shared by Arc)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  species selection → FilteredView (memoized)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
