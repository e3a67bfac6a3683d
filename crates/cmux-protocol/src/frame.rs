//! Frame reassembly.
//!
//! [`FrameAssembler`] sits behind a [`FrameParser`](crate::FrameParser) and
//! collects the events of one direction back into whole frames:
//!
//! ```text
//! OpenFlag, AddressByte, ControlByte, Length.., DataByte.., Checksum, CloseFlag
//!                                                                  => Frame
//! ```

use bytes::{Bytes, BytesMut};

use crate::event::FrameEvent;
use crate::types::{Direction, FrameType};

/// Initial payload buffer capacity, enough for any short-form frame.
pub const INITIAL_PAYLOAD_CAPACITY: usize = 128;

/// A complete frame recovered from the byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Direction the frame travelled.
    pub direction: Direction,
    /// Logical channel.
    pub dlc: u8,
    /// Frame type from the control byte.
    pub frame_type: FrameType,
    /// Poll/final bit from the control byte.
    pub poll_final: bool,
    /// Length announced in the length field.
    pub length: u16,
    /// Payload bytes.
    pub payload: Bytes,
    /// Checksum byte as received (not verified).
    pub fcs: u8,
}

/// Header fields collected so far for the frame in progress.
#[derive(Debug, Default)]
struct PendingFrame {
    dlc: Option<u8>,
    control: Option<(FrameType, bool)>,
    length: u16,
    fcs: Option<u8>,
}

/// Rebuilds complete frames from the event stream of one direction.
#[derive(Debug)]
pub struct FrameAssembler {
    direction: Direction,
    pending: Option<PendingFrame>,
    payload: BytesMut,
}

impl FrameAssembler {
    /// Create an assembler for one direction.
    pub fn new(direction: Direction) -> Self {
        FrameAssembler {
            direction,
            pending: None,
            payload: BytesMut::with_capacity(INITIAL_PAYLOAD_CAPACITY),
        }
    }

    /// Direction this assembler collects.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a frame is currently being collected.
    pub fn in_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of payload bytes collected for the frame in progress.
    pub fn buffered_len(&self) -> usize {
        self.payload.len()
    }

    /// Discard the frame in progress.
    pub fn clear(&mut self) {
        self.pending = None;
        self.payload.clear();
    }

    /// Consume one event. Returns the frame once its closing flag arrives.
    pub fn push(&mut self, event: &FrameEvent) -> Option<Frame> {
        match *event {
            FrameEvent::OpenFlag => {
                self.clear();
                self.pending = Some(PendingFrame::default());
                None
            }
            FrameEvent::Resync { .. } => {
                self.clear();
                None
            }
            FrameEvent::AddressByte { dlc, .. } => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.dlc = Some(dlc);
                }
                None
            }
            FrameEvent::ControlByte { frame_type, poll_final } => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.control = Some((frame_type, poll_final));
                }
                None
            }
            FrameEvent::Length { value, partial } => {
                if let Some(pending) = self.pending.as_mut() {
                    if !partial {
                        pending.length = value;
                    }
                }
                None
            }
            FrameEvent::DataByte { direction, byte, .. } => {
                if self.pending.is_some() && direction == self.direction {
                    self.payload.extend_from_slice(&[byte]);
                }
                None
            }
            FrameEvent::Checksum(fcs) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.fcs = Some(fcs);
                }
                None
            }
            FrameEvent::CloseFlag => {
                let pending = self.pending.take()?;
                let payload = self.payload.split().freeze();
                match (pending.dlc, pending.control, pending.fcs) {
                    (Some(dlc), Some((frame_type, poll_final)), Some(fcs)) => Some(Frame {
                        direction: self.direction,
                        dlc,
                        frame_type,
                        poll_final,
                        length: pending.length,
                        payload,
                        fcs,
                    }),
                    _ => None,
                }
            }
        }
    }
}
