//! Events delivered by the upstream UART decoder.
//!
//! The UART layer reconstructs bytes from the bit stream of both serial lines
//! and reports each element with its sample range. Only [`UartPayload::Data`]
//! is of interest to the CMUX decoder; everything else is skipped.

use cmux_protocol::{Direction, ProtocolError};

/// Sample position in the capture.
pub type SamplePos = u64;

/// What the UART decoder recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartPayload {
    /// A fully received data byte.
    Data(u8),
    /// Start bit.
    StartBit,
    /// Stop bit.
    StopBit,
    /// Parity bit.
    ParityBit,
    /// Parity check failed.
    ParityError,
    /// Start bit was not low.
    InvalidStartBit,
    /// Stop bit was not high.
    InvalidStopBit,
    /// Line held low for longer than a frame.
    Break,
    /// Whole UART frame (start bit to stop bit).
    Frame,
    /// Line idle.
    Idle,
}

/// One element reported by the UART decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartEvent {
    /// First sample of the element.
    pub start: SamplePos,
    /// Last sample of the element.
    pub end: SamplePos,
    /// Serial line the element was seen on (0 = RX, 1 = TX).
    pub channel: u8,
    /// Decoded element.
    pub payload: UartPayload,
}

impl UartEvent {
    /// A data byte on the given direction.
    pub fn data(start: SamplePos, end: SamplePos, direction: Direction, byte: u8) -> Self {
        UartEvent {
            start,
            end,
            channel: direction.index() as u8,
            payload: UartPayload::Data(byte),
        }
    }

    /// Direction of the serial line this event was seen on.
    pub fn direction(&self) -> Result<Direction, ProtocolError> {
        Direction::try_from(self.channel)
    }

    /// The data byte, if this event carries one.
    pub fn data_byte(&self) -> Option<u8> {
        match self.payload {
            UartPayload::Data(byte) => Some(byte),
            _ => None,
        }
    }
}
