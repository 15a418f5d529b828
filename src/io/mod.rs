/// Result writers for step records and per-asset outputs.
pub mod export;
/// CSV ingestion for load and resource series.
pub mod import;
