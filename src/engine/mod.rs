//! The segmentation engine.
//!
//! Pure-compute pipeline from raw samples to segment intervals: spectral
//! tone classification, marker scanning with deduplication, and boundary
//! resolution with configurable refinement.

mod resolver;
mod scanner;
pub mod silence;
mod tone;

pub use resolver::{BoundaryResolver, Interval, RefinePolicy, ResolveParams};
pub use scanner::{ScanParams, scan, window_samples};
pub use tone::{ToneClassifier, ToneParams};
