//! CMUX Decoder
//!
//! This crate plugs the [`cmux_protocol`] frame parser between a UART byte
//! decoder and an annotation consumer. It reads the bytes seen on the RX and
//! TX lines of a capture, decodes the GSM 07.10 frames in each direction and
//! writes labelled annotations:
//!
//! - Diagnostic annotations (flags, address, control, length, checksum,
//!   resync) on the per-direction debug class, when `debug` is enabled
//! - Payload bytes on the class of their DLC and direction, always
//!
//! # Example
//!
//! ```rust
//! use cmux_decoder::{Annotation, Decoder, DecoderOptions, UartEvent};
//! use cmux_protocol::Direction;
//!
//! let options = DecoderOptions::from_pairs([("format", "ascii")])?;
//! let mut decoder = Decoder::new(options);
//! let mut annotations: Vec<Annotation> = Vec::new();
//!
//! for (i, &byte) in [0xF9, 0x00, 0xEF, 0x03, b'A', 0xFF, 0xF9].iter().enumerate() {
//!     let event = UartEvent::data(i as u64 * 10, i as u64 * 10 + 9, Direction::Rx, byte);
//!     decoder.decode(&event, &mut annotations);
//! }
//!
//! assert_eq!(annotations.len(), 1);
//! assert_eq!(annotations[0].class, 2);
//! assert_eq!(annotations[0].text(), "A");
//! # Ok::<(), cmux_decoder::DecoderError>(())
//! ```

mod annotation;
mod decoder;
mod error;
mod options;
mod uart;

pub use annotation::*;
pub use decoder::*;
pub use error::*;
pub use options::*;
pub use uart::*;
