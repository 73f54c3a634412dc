//! Boundary resolution from markers to segment intervals.
//!
//! Each marker's temporal midpoint becomes a cut point, splitting the
//! ambiguity of the tone's own duration evenly between the segments before
//! and after it. N markers always resolve to N+1 intervals: N tone-bounded
//! gaps plus the trailing tail.

use serde::{Deserialize, Serialize};

use super::silence::has_significant_energy;
use crate::constants::segment;

/// A half-open range `[start, end)` of sample offsets forming one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// First sample offset of the segment.
    pub start: usize,
    /// One past the last sample offset of the segment.
    pub end: usize,
}

impl Interval {
    /// Number of samples in the interval.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the interval contains no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Boundary refinement policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RefinePolicy {
    /// Cut exactly at tone midpoints; no further adjustment.
    #[default]
    Midpoint,
    /// Enforce a minimum segment duration, then grow each side into
    /// adjacent silence by a fixed guard band.
    Padded,
}

/// Tunable parameters for boundary refinement.
#[derive(Debug, Clone, Copy)]
pub struct ResolveParams {
    /// Minimum segment duration in seconds (padded policy).
    pub min_segment_duration: f64,
    /// Guard band grown into adjacent silence, in seconds (padded policy).
    pub pad_duration: f64,
    /// RMS threshold below which a region counts as silence.
    pub rms_threshold: f64,
}

impl Default for ResolveParams {
    fn default() -> Self {
        Self {
            min_segment_duration: segment::DEFAULT_MIN_DURATION,
            pad_duration: segment::DEFAULT_PAD_DURATION,
            rms_threshold: segment::DEFAULT_RMS_THRESHOLD,
        }
    }
}

/// Resolves a marker sequence into non-overlapping segment intervals.
#[derive(Debug, Clone)]
pub struct BoundaryResolver {
    policy: RefinePolicy,
    params: ResolveParams,
}

impl BoundaryResolver {
    /// Create a resolver with the given refinement policy.
    #[must_use]
    pub fn new(policy: RefinePolicy, params: ResolveParams) -> Self {
        Self { policy, params }
    }

    /// Resolve markers into intervals covering the whole recording.
    ///
    /// `window_samples` is the scan window length the markers were produced
    /// with; the cut point for each marker is `marker + window_samples / 2`.
    /// The final interval always runs from the last cut point to the end of
    /// the recording.
    #[must_use]
    pub fn resolve(
        &self,
        markers: &[usize],
        samples: &[i16],
        sample_rate: u32,
        window_samples: usize,
    ) -> Vec<Interval> {
        let total = samples.len();

        let mut intervals = Vec::with_capacity(markers.len() + 1);
        let mut prev = 0;
        for &marker in markers {
            let mid = (marker + window_samples / 2).min(total);
            intervals.push(Interval { start: prev, end: mid });
            prev = mid;
        }
        intervals.push(Interval {
            start: prev,
            end: total,
        });

        if self.policy == RefinePolicy::Padded {
            let cuts: Vec<usize> = intervals.iter().map(|iv| iv.end).collect();
            for (i, interval) in intervals.iter_mut().enumerate() {
                // End growth may claim at most half of the following
                // segment's original span: a short neighbor can be
                // shortened, but never consumed outright.
                let end_cap = match cuts.get(i + 1) {
                    Some(&next_end) => cuts[i] + (next_end - cuts[i]) / 2,
                    None => total,
                };
                self.refine(interval, samples, sample_rate, end_cap);
            }
        }

        // Closing pass: restore global non-overlap. A start that crept under
        // its neighbor's end is clamped forward, and an end that crept over
        // the following interval's start is clamped back. Refinement only
        // grows intervals, so no gaps can appear; the end clamp is skipped
        // when it would leave the interval without samples.
        for i in 1..intervals.len() {
            let prev_end = intervals[i - 1].end;
            if intervals[i].start < prev_end {
                intervals[i].start = prev_end;
            }
            if i + 1 < intervals.len() {
                let next_start = intervals[i + 1].start;
                if intervals[i].end > next_start && next_start > intervals[i].start {
                    intervals[i].end = next_start;
                }
            }
        }

        intervals
    }

    /// Padded-policy refinement of one interval.
    ///
    /// Minimum-duration growth takes precedence; silence padding is applied
    /// afterward, independently per side, and only where the neighboring
    /// region carries no significant energy. Neither may move the end past
    /// `end_cap`.
    fn refine(&self, interval: &mut Interval, samples: &[i16], sample_rate: u32, end_cap: usize) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let min_len = (self.params.min_segment_duration * f64::from(sample_rate)) as usize;
        if interval.len() < min_len {
            interval.end = (interval.start + min_len).min(end_cap);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pad = (self.params.pad_duration * f64::from(sample_rate)) as usize;
        if pad == 0 {
            return;
        }

        let lead_start = interval.start.saturating_sub(pad);
        if lead_start < interval.start
            && !has_significant_energy(&samples[lead_start..interval.start], self.params.rms_threshold)
        {
            interval.start = lead_start;
        }

        let tail_end = (interval.end + pad).min(end_cap);
        if tail_end > interval.end
            && !has_significant_energy(&samples[interval.end..tail_end], self.params.rms_threshold)
        {
            interval.end = tail_end;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 8_000;
    const WINDOW: usize = 4_000; // 0.5 s

    fn midpoint_resolver() -> BoundaryResolver {
        BoundaryResolver::new(RefinePolicy::Midpoint, ResolveParams::default())
    }

    fn assert_covers_without_gaps(intervals: &[Interval], total: usize) {
        assert_eq!(intervals.first().map(|iv| iv.start), Some(0));
        assert_eq!(intervals.last().map(|iv| iv.end), Some(total));
        for pair in intervals.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_n_markers_produce_n_plus_one_intervals() {
        let samples = vec![0i16; 80_000];
        for markers in [vec![], vec![24_000], vec![16_000, 40_000, 64_000]] {
            let intervals = midpoint_resolver().resolve(&markers, &samples, SAMPLE_RATE, WINDOW);
            assert_eq!(intervals.len(), markers.len() + 1);
            assert_covers_without_gaps(&intervals, samples.len());
        }
    }

    #[test]
    fn test_midpoint_cuts_split_the_tone_evenly() {
        let samples = vec![0i16; 80_000];
        let intervals = midpoint_resolver().resolve(&[24_000], &samples, SAMPLE_RATE, WINDOW);
        assert_eq!(intervals[0], Interval { start: 0, end: 26_000 });
        assert_eq!(intervals[1], Interval { start: 26_000, end: 80_000 });
    }

    #[test]
    fn test_no_markers_yield_single_full_interval() {
        let samples = vec![0i16; 1_000];
        let intervals = midpoint_resolver().resolve(&[], &samples, SAMPLE_RATE, WINDOW);
        assert_eq!(intervals, vec![Interval { start: 0, end: 1_000 }]);
    }

    #[test]
    fn test_padded_policy_keeps_cover_invariant() {
        let samples = vec![0i16; 80_000];
        let resolver = BoundaryResolver::new(RefinePolicy::Padded, ResolveParams::default());
        let intervals = resolver.resolve(&[16_000, 40_000], &samples, SAMPLE_RATE, WINDOW);
        assert_eq!(intervals.len(), 3);
        assert_covers_without_gaps(&intervals, samples.len());
    }

    #[test]
    fn test_padded_policy_enforces_minimum_duration() {
        // A cut at 6_000 leaves a leading segment shorter than the 1 s
        // (8_000 sample) minimum; its end grows to meet it.
        let samples = vec![0i16; 80_000];
        let params = ResolveParams {
            pad_duration: 0.0,
            ..ResolveParams::default()
        };
        let resolver = BoundaryResolver::new(RefinePolicy::Padded, params);
        let intervals = resolver.resolve(&[4_000], &samples, SAMPLE_RATE, WINDOW);
        assert_eq!(intervals, vec![
            Interval { start: 0, end: 8_000 },
            Interval { start: 8_000, end: 80_000 },
        ]);
    }

    #[test]
    fn test_minimum_duration_growth_yields_to_the_next_cut() {
        // Cuts at 10_000 and 14_000 leave a 4_000-sample middle segment.
        // Its growth toward the minimum is clamped back to the following
        // interval's cut, so neighbors are never swallowed.
        let samples = vec![0i16; 80_000];
        let params = ResolveParams {
            pad_duration: 0.0,
            ..ResolveParams::default()
        };
        let resolver = BoundaryResolver::new(RefinePolicy::Padded, params);
        let intervals = resolver.resolve(&[8_000, 12_000], &samples, SAMPLE_RATE, WINDOW);
        assert_eq!(intervals.len(), 3);
        assert_eq!(intervals[1], Interval { start: 10_000, end: 14_000 });
        assert_covers_without_gaps(&intervals, samples.len());
    }

    #[test]
    fn test_markers_one_window_apart_never_produce_an_empty_segment() {
        // Cuts land one window apart while the minimum duration is two
        // windows, so both neighbors want the middle segment's span. End
        // growth stops at the middle's midpoint and the middle keeps its
        // minimum duration; every segment keeps samples.
        let samples = vec![0i16; 80_000];
        let resolver = BoundaryResolver::new(RefinePolicy::Padded, ResolveParams::default());
        let intervals = resolver.resolve(&[2_000, 6_000], &samples, SAMPLE_RATE, WINDOW);
        assert_eq!(intervals, vec![
            Interval { start: 0, end: 6_000 },
            Interval { start: 6_000, end: 14_000 },
            Interval { start: 14_000, end: 80_000 },
        ]);
        assert!(intervals.iter().all(|iv| !iv.is_empty()));
    }

    #[test]
    fn test_padding_never_grows_into_signal() {
        // Loud audio right after the first interval's cut point: its end
        // must stay put instead of padding into the signal.
        let mut samples = vec![0i16; 80_000];
        let resolver = BoundaryResolver::new(
            RefinePolicy::Padded,
            ResolveParams {
                min_segment_duration: 0.0,
                pad_duration: 0.25,
                rms_threshold: 300.0,
            },
        );

        // Loud audio in the region [26_000, 28_000) just past the first cut.
        for s in &mut samples[26_000..28_000] {
            *s = 10_000;
        }

        let intervals = resolver.resolve(&[24_000], &samples, SAMPLE_RATE, WINDOW);
        // First interval ends at the 26_000 cut; the region beyond it is
        // loud, so its end must not move.
        assert_eq!(intervals[0].end, 26_000);
        assert_covers_without_gaps(&intervals, samples.len());
    }

    #[test]
    fn test_empty_recording_yields_single_empty_interval() {
        let intervals = midpoint_resolver().resolve(&[], &[], SAMPLE_RATE, WINDOW);
        assert_eq!(intervals.len(), 1);
        assert!(intervals[0].is_empty());
    }
}
