/// ETL Pipeline Module
///
/// This module holds the three pipeline stages:
/// - Extract: fetch the raw match list from the Nexon open API
/// - Transform: stamp each match id with the run's capture timestamp
/// - Load: atomically replace the match table with the fresh snapshot
pub mod extract;
pub mod load;
pub mod transform;
