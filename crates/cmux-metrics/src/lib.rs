//! Metrics infrastructure for the CMUX decoder.
//!
//! This crate describes every metric the decoder records. It re-exports the
//! `metrics` crate and declares each metric as a structured [`Metric`] constant
//! so names and labels stay consistent between the decoder and exporters.
//! The decoder never installs a recorder; without one all recording is a no-op.
//!
//! ```rust
//! use cmux_metrics::{metric_defs, MetricKind, MetricLabels};
//! use metrics::Unit;
//!
//! assert_eq!(metric_defs::FRAME_PAYLOAD_SIZE.kind, MetricKind::Histogram);
//! assert_eq!(metric_defs::PARSER_BYTES.unit, Unit::Bytes);
//!
//! let labels = MetricLabels::new("rx").with_dlc(1).to_labels();
//! metrics::counter!(metric_defs::CHANNEL_DATA_BYTES.name, &labels).increment(1);
//! ```

pub use metrics;

use std::collections::BTreeMap;

use metrics::{describe_counter, describe_histogram, Unit};

/// How a decoder metric is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Incremented once per byte, event or frame.
    Counter,
    /// One sample per completed frame.
    Histogram,
}

/// A decoder metric: its name, how it is recorded and which labels it carries.
#[derive(Debug, Clone)]
pub struct Metric {
    /// Metric name, always under the `cmux.` prefix.
    pub name: &'static str,
    /// Counter or histogram.
    pub kind: MetricKind,
    /// Unit of the recorded value.
    pub unit: Unit,
    /// Human-readable description.
    pub description: &'static str,
    /// Label keys the decoder attaches.
    pub labels: &'static [&'static str],
}

impl Metric {
    /// A counter of `unit`, labelled by direction.
    pub const fn counter(name: &'static str, unit: Unit) -> Self {
        Self::new(name, MetricKind::Counter, unit)
    }

    /// A histogram of `unit`, labelled by direction.
    pub const fn histogram(name: &'static str, unit: Unit) -> Self {
        Self::new(name, MetricKind::Histogram, unit)
    }

    const fn new(name: &'static str, kind: MetricKind, unit: Unit) -> Self {
        Self {
            name,
            kind,
            unit,
            description: "",
            labels: metric_defs::STANDARD_LABELS,
        }
    }

    /// Sets the description.
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Replaces the default direction-only label keys.
    pub const fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    /// Registers the description and unit with the installed recorder.
    pub fn describe(&self) {
        match self.kind {
            MetricKind::Counter => describe_counter!(self.name, self.unit, self.description),
            MetricKind::Histogram => {
                describe_histogram!(self.name, self.unit, self.description)
            }
        }
    }
}

/// All metric definitions for the decoder.
pub mod metric_defs {
    use super::{Metric, Unit};

    // ========================================================================
    // Standard Label Keys
    // ========================================================================

    /// Labels present on every decoder metric.
    pub const STANDARD_LABELS: &[&str] = &["direction"];

    /// Labels on metrics scoped to a logical channel.
    pub const CHANNEL_LABELS: &[&str] = &["direction", "dlc"];

    // ========================================================================
    // Parser Metrics
    // ========================================================================

    /// Bytes consumed by the frame parser.
    ///
    /// Labels: direction
    pub const PARSER_BYTES: Metric = Metric::counter("cmux.parser.bytes", Unit::Bytes)
        .with_description("Bytes consumed by the frame parser");

    /// Bytes that did not fit the frame grammar and reset the parser.
    ///
    /// Labels: direction, phase
    pub const PARSER_RESYNCS: Metric = Metric::counter("cmux.parser.resyncs", Unit::Count)
        .with_description("Bytes that forced a parser resynchronization")
        .with_labels(&["direction", "phase"]);

    // ========================================================================
    // Frame Metrics
    // ========================================================================

    /// Opening flags seen.
    ///
    /// Labels: direction
    pub const FRAMES_OPENED: Metric =
        Metric::counter("cmux.frames.opened", Unit::Count).with_description("Opening flags seen");

    /// Frames closed by a valid closing flag.
    ///
    /// Labels: direction, dlc, frame_type
    pub const FRAMES_COMPLETED: Metric = Metric::counter("cmux.frames.completed", Unit::Count)
        .with_description("Frames closed by a valid closing flag")
        .with_labels(&["direction", "dlc", "frame_type"]);

    /// Payload length of completed frames.
    ///
    /// Labels: direction, dlc
    pub const FRAME_PAYLOAD_SIZE: Metric =
        Metric::histogram("cmux.frames.payload_size_bytes", Unit::Bytes)
            .with_description("Payload length of completed frames")
            .with_labels(CHANNEL_LABELS);

    // ========================================================================
    // Channel Metrics
    // ========================================================================

    /// Payload bytes demultiplexed to a logical channel.
    ///
    /// Labels: direction, dlc
    pub const CHANNEL_DATA_BYTES: Metric = Metric::counter("cmux.channel.data_bytes", Unit::Bytes)
        .with_description("Payload bytes demultiplexed to a logical channel")
        .with_labels(CHANNEL_LABELS);

    /// Returns a slice of all defined metrics.
    pub const ALL: &[&Metric] = &[
        &PARSER_BYTES,
        &PARSER_RESYNCS,
        &FRAMES_OPENED,
        &FRAMES_COMPLETED,
        &FRAME_PAYLOAD_SIZE,
        &CHANNEL_DATA_BYTES,
    ];
}

/// Metric labels identifying a direction and, optionally, a logical channel.
///
/// # Example
///
/// ```rust
/// use cmux_metrics::MetricLabels;
///
/// let labels = MetricLabels::new("rx").with_dlc(2);
///
/// let label_vec = labels.to_labels();
/// assert_eq!(label_vec.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricLabels {
    /// Transfer direction ("rx" or "tx")
    pub direction: &'static str,
    /// Logical channel, when the metric is channel-scoped
    pub dlc: Option<u8>,
}

impl MetricLabels {
    /// Creates labels for a direction.
    pub fn new(direction: &'static str) -> Self {
        Self {
            direction,
            dlc: None,
        }
    }

    /// Scopes the labels to a logical channel.
    pub fn with_dlc(mut self, dlc: u8) -> Self {
        self.dlc = Some(dlc);
        self
    }

    /// Converts the labels to the metrics crate label format.
    pub fn to_labels(&self) -> Vec<(&'static str, String)> {
        let mut labels = vec![("direction", self.direction.to_string())];

        if let Some(dlc) = self.dlc {
            labels.push(("dlc", dlc.to_string()));
        }

        labels
    }

    /// Returns labels with additional key-value pairs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cmux_metrics::MetricLabels;
    ///
    /// let labels = MetricLabels::new("tx");
    /// let extended = labels.with(&[("phase", "CLOSE".to_string())]);
    ///
    /// assert!(extended.iter().any(|(k, v)| *k == "phase" && v == "CLOSE"));
    /// ```
    pub fn with(&self, extra: &[(&'static str, String)]) -> Vec<(&'static str, String)> {
        let mut labels = self.to_labels();
        labels.extend_from_slice(extra);
        labels
    }
}

/// Label sets of one direction, built once and reused for every sample.
#[derive(Debug, Clone)]
pub struct LabelCache {
    direction: Vec<(&'static str, String)>,
    channels: BTreeMap<u8, Vec<(&'static str, String)>>,
}

impl LabelCache {
    /// Creates an empty cache for a direction.
    pub fn new(direction: &'static str) -> Self {
        Self {
            direction: MetricLabels::new(direction).to_labels(),
            channels: BTreeMap::new(),
        }
    }

    /// Direction-only labels.
    pub fn direction(&self) -> &Vec<(&'static str, String)> {
        &self.direction
    }

    /// Direction and DLC labels, built on first use of `dlc`.
    pub fn channel(&mut self, dlc: u8) -> &Vec<(&'static str, String)> {
        let direction = &self.direction;
        self.channels.entry(dlc).or_insert_with(|| {
            let mut labels = direction.clone();
            labels.push(("dlc", dlc.to_string()));
            labels
        })
    }

    /// Number of channels with cached labels.
    pub fn cached_channels(&self) -> usize {
        self.channels.len()
    }
}

/// Describes all metrics used by the decoder.
///
/// Call once at startup, after installing a recorder, so exporters can show
/// descriptions and units.
pub fn describe_metrics() {
    for metric in metric_defs::ALL {
        metric.describe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_labels_new() {
        let labels = MetricLabels::new("rx");
        assert_eq!(labels.direction, "rx");
        assert!(labels.dlc.is_none());
        assert_eq!(labels.to_labels(), vec![("direction", "rx".to_string())]);
    }

    #[test]
    fn test_metric_labels_with_dlc() {
        let labels = MetricLabels::new("tx").with_dlc(3);
        let label_vec = labels.to_labels();

        assert_eq!(label_vec.len(), 2);
        assert!(label_vec.contains(&("direction", "tx".to_string())));
        assert!(label_vec.contains(&("dlc", "3".to_string())));
    }

    #[test]
    fn test_with_extra_labels() {
        let labels = MetricLabels::new("rx").with_dlc(0);
        let extended = labels.with(&[("frame_type", "UIH".to_string())]);

        assert_eq!(extended.len(), 3);
        assert!(extended.contains(&("frame_type", "UIH".to_string())));
    }

    #[test]
    fn test_label_cache_reuses_channel_labels() {
        let mut cache = LabelCache::new("tx");
        assert_eq!(cache.direction(), &vec![("direction", "tx".to_string())]);

        let first = cache.channel(2).clone();
        assert_eq!(first, MetricLabels::new("tx").with_dlc(2).to_labels());
        cache.channel(2);
        cache.channel(0);
        assert_eq!(cache.cached_channels(), 2);
    }

    #[test]
    fn test_metric_definitions() {
        assert_eq!(metric_defs::PARSER_RESYNCS.name, "cmux.parser.resyncs");
        assert_eq!(metric_defs::PARSER_RESYNCS.kind, MetricKind::Counter);
        assert_eq!(metric_defs::FRAME_PAYLOAD_SIZE.kind, MetricKind::Histogram);
        assert_eq!(metric_defs::FRAME_PAYLOAD_SIZE.unit, Unit::Bytes);
        assert_eq!(metric_defs::CHANNEL_DATA_BYTES.labels, &["direction", "dlc"]);
    }

    #[test]
    fn test_all_metrics_unique() {
        assert_eq!(metric_defs::ALL.len(), 6);
        for (i, a) in metric_defs::ALL.iter().enumerate() {
            for b in &metric_defs::ALL[i + 1..] {
                assert_ne!(a.name, b.name);
            }
            assert!(a.name.starts_with("cmux."));
            assert!(!a.description.is_empty());
            assert!(a.labels.contains(&"direction"));
        }
    }

    #[test]
    fn test_direction_label_is_default() {
        assert_eq!(metric_defs::PARSER_BYTES.labels, metric_defs::STANDARD_LABELS);
        assert_eq!(metric_defs::FRAMES_OPENED.labels, &["direction"]);
        assert_eq!(metric_defs::FRAMES_OPENED.kind, MetricKind::Counter);
        assert_eq!(metric_defs::FRAMES_OPENED.unit, Unit::Count);
    }

    #[test]
    fn test_describe_without_recorder() {
        describe_metrics();
    }
}
