//! GSM 07.10 CMUX Frame Protocol
//!
//! This crate decodes the basic-option framing of the GSM 07.10 multiplexer
//! (as spoken by SIMCOM modems in CMUX mode) from a byte-oriented serial
//! capture. Several virtual serial channels (DLCs) share one UART; each frame
//! carries the DLC address, a control field, a length and the payload.
//!
//! # Protocol Overview
//!
//! - Frames are delimited by the flag byte `0xF9`
//! - The address byte carries the DLC in its upper six bits
//! - The control byte selects the frame type (SABM, UA, DM, DISC, UIH, UI)
//! - The length is one byte (LSB set) or two bytes (LSB of the first clear)
//! - The frame checksum is reported but not verified
//!
//! Each transfer direction is decoded by its own [`FrameParser`]; the two
//! never share state.
//!
//! # Example
//!
//! ```rust
//! use cmux_protocol::{Direction, FrameEvent, FrameParser, LengthMode};
//!
//! let mut parser = FrameParser::new(Direction::Rx, LengthMode::Extended);
//! let events = parser.feed(&[0xF9, 0x00, 0xEF, 0x03, 0x41, 0xFF, 0xF9]);
//!
//! assert_eq!(events.first(), Some(&FrameEvent::OpenFlag));
//! assert_eq!(events[4].channel_index(), Some(2));
//! ```

mod constants;
mod error;
mod event;
mod format;
mod frame;
mod parser;
mod types;

pub use constants::*;
pub use error::*;
pub use event::*;
pub use format::*;
pub use frame::*;
pub use parser::*;
pub use types::*;
