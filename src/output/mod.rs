//! Segment file output.

mod writer;

pub use writer::{FailedSegment, LabelPolicy, SegmentWriter, WriteReport, sanitize_label};
