//! Events produced by the frame parser.

use crate::format::DataFormat;
use crate::types::{Direction, FrameType, Phase};

/// One decoded element of the frame structure.
///
/// Every byte fed to a [`FrameParser`](crate::FrameParser) yields exactly one
/// event. All variants except [`FrameEvent::DataByte`] are diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// Byte did not fit the frame grammar; the parser went back to OPEN.
    Resync {
        /// Offending byte.
        byte: u8,
        /// Phase the parser was in when the byte arrived.
        phase: Phase,
    },
    /// Opening flag of a frame.
    OpenFlag,
    /// Address byte.
    AddressByte {
        /// Logical channel (address byte without the E/A and C/R bits).
        dlc: u8,
        /// Raw address byte.
        raw: u8,
    },
    /// Recognized control byte.
    ControlByte {
        /// Decoded frame type.
        frame_type: FrameType,
        /// Poll/final bit.
        poll_final: bool,
    },
    /// Length field.
    ///
    /// In extended mode a first length byte with a clear E/A bit reports its
    /// low-order bits with `partial` set; the second byte then reports the
    /// combined length.
    Length {
        /// Payload length (or low-order part of it, see `partial`).
        value: u16,
        /// Whether a second length byte follows.
        partial: bool,
    },
    /// Payload byte demultiplexed to a logical channel.
    DataByte {
        /// Logical channel the byte belongs to.
        dlc: u8,
        /// Direction the byte travelled.
        direction: Direction,
        /// Payload byte.
        byte: u8,
    },
    /// Frame checksum, reported as received.
    Checksum(u8),
    /// Closing flag of a frame.
    CloseFlag,
}

impl FrameEvent {
    /// Whether this is a diagnostic event (everything except payload data).
    pub fn is_debug(&self) -> bool {
        !matches!(self, FrameEvent::DataByte { .. })
    }

    /// Output channel a payload byte is routed to: `(dlc + 1) * 2 + direction`.
    ///
    /// Channels 0 and 1 are the RX/TX debug channels, so DLC 0 lands on 2/3.
    /// Returns `None` for diagnostic events.
    pub fn channel_index(&self) -> Option<usize> {
        match *self {
            FrameEvent::DataByte { dlc, direction, .. } => Some(channel_index(dlc, direction)),
            _ => None,
        }
    }

    /// Human-readable labels, longest first.
    pub fn labels(&self, format: DataFormat) -> Vec<String> {
        match *self {
            FrameEvent::Resync { byte, .. } => {
                vec![format!("Resync {:02X}", byte), "!".to_string()]
            }
            FrameEvent::OpenFlag => ["Opening Flag", "Open Flag", "Open", "OF"]
                .map(String::from)
                .to_vec(),
            FrameEvent::AddressByte { dlc, .. } => vec![format!("DLC {}", dlc), dlc.to_string()],
            FrameEvent::ControlByte { frame_type, .. } => vec![frame_type.name().to_string()],
            FrameEvent::Length { value, partial: false } => {
                vec![format!("Length {}", value), format!("L {}", value)]
            }
            FrameEvent::Length { value, partial: true } => {
                vec![format!("Length {}+", value), format!("L {}+", value)]
            }
            FrameEvent::DataByte { byte, .. } => vec![format.format_value(byte)],
            FrameEvent::Checksum(fcs) => vec![
                format!("Frame Checksum {:02X}", fcs),
                format!("Checksum {:02X}", fcs),
                format!("FCS {:02X}", fcs),
            ],
            FrameEvent::CloseFlag => ["Closing Flag", "Close Flag", "Close", "CF"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Output channel for payload bytes of `dlc` travelling in `direction`.
pub fn channel_index(dlc: u8, direction: Direction) -> usize {
    (usize::from(dlc) + 1) * 2 + direction.index()
}
