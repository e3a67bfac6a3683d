//! Annotation output.
//!
//! Every annotation belongs to a class. Classes 0 and 1 carry diagnostic
//! output for RX and TX; from class 2 on, classes come in RX/TX pairs, one
//! pair per routed DLC:
//!
//! ```text
//! class:  0         1         2        3        4        5       ...  9
//!         debug-rx  debug-tx  dlc0-rx  dlc0-tx  dlc1-rx  dlc1-tx ...  dlc3-tx
//! ```

use cmux_protocol::{channel_index, Direction, CHANNEL_COUNT};

use crate::uart::SamplePos;

/// Description of one annotation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationClass {
    /// Stable identifier.
    pub id: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

impl AnnotationClass {
    const fn new(id: &'static str, description: &'static str) -> Self {
        AnnotationClass { id, description }
    }
}

/// Display row grouping annotation classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationRow {
    /// Stable identifier.
    pub id: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Classes shown in this row.
    pub classes: &'static [usize],
}

impl AnnotationRow {
    const fn new(id: &'static str, description: &'static str, classes: &'static [usize]) -> Self {
        AnnotationRow {
            id,
            description,
            classes,
        }
    }
}

/// All annotation classes, indexed by class number.
pub const ANNOTATION_CLASSES: [AnnotationClass; CHANNEL_COUNT] = [
    AnnotationClass::new("debug-rx", "Rx Debug output"),
    AnnotationClass::new("debug-tx", "Tx Debug output"),
    AnnotationClass::new("dlc0-rx", "DLC 0 Rx"),
    AnnotationClass::new("dlc0-tx", "DLC 0 Tx"),
    AnnotationClass::new("dlc1-rx", "DLC 1 Rx"),
    AnnotationClass::new("dlc1-tx", "DLC 1 Tx"),
    AnnotationClass::new("dlc2-rx", "DLC 2 Rx"),
    AnnotationClass::new("dlc2-tx", "DLC 2 Tx"),
    AnnotationClass::new("dlc3-rx", "DLC 3 Rx"),
    AnnotationClass::new("dlc3-tx", "DLC 3 Tx"),
];

/// Display rows, one per class.
pub const ANNOTATION_ROWS: [AnnotationRow; CHANNEL_COUNT] = [
    AnnotationRow::new("debug-rx", "Rx Debug", &[0]),
    AnnotationRow::new("debug-tx", "Tx Debug", &[1]),
    AnnotationRow::new("dlc0-rx", "DLC 0 Rx", &[2]),
    AnnotationRow::new("dlc0-tx", "DLC 0 Tx", &[3]),
    AnnotationRow::new("dlc1-rx", "DLC 1 Rx", &[4]),
    AnnotationRow::new("dlc1-tx", "DLC 1 Tx", &[5]),
    AnnotationRow::new("dlc2-rx", "DLC 2 Rx", &[6]),
    AnnotationRow::new("dlc2-tx", "DLC 2 Tx", &[7]),
    AnnotationRow::new("dlc3-rx", "DLC 3 Rx", &[8]),
    AnnotationRow::new("dlc3-tx", "DLC 3 Tx", &[9]),
];

/// Class carrying diagnostic output for a direction.
pub fn debug_class(direction: Direction) -> usize {
    direction.index()
}

/// Class carrying payload of `dlc` in `direction`.
///
/// DLCs above 3 map past the end of [`ANNOTATION_CLASSES`].
pub fn data_class(dlc: u8, direction: Direction) -> usize {
    channel_index(dlc, direction)
}

/// Look up the description of a class.
pub fn annotation_class(class: usize) -> Option<&'static AnnotationClass> {
    ANNOTATION_CLASSES.get(class)
}

/// A labelled span of the capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// First sample covered.
    pub start: SamplePos,
    /// Last sample covered.
    pub end: SamplePos,
    /// Annotation class (see [`ANNOTATION_CLASSES`]).
    pub class: usize,
    /// Labels, longest first.
    pub labels: Vec<String>,
}

impl Annotation {
    /// The longest label, or an empty string if there are none.
    pub fn text(&self) -> &str {
        self.labels.first().map(String::as_str).unwrap_or("")
    }
}

/// Receiver of decoder output.
pub trait AnnotationSink {
    /// Accept one annotation.
    fn put(&mut self, annotation: Annotation);
}

impl AnnotationSink for Vec<Annotation> {
    fn put(&mut self, annotation: Annotation) {
        self.push(annotation);
    }
}

impl<S: AnnotationSink + ?Sized> AnnotationSink for &mut S {
    fn put(&mut self, annotation: Annotation) {
        (**self).put(annotation);
    }
}
