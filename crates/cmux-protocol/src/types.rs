//! Common types used in the protocol.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ProtocolError;

/// Transfer direction of a byte on the serial link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Bytes received by the host (modem → host).
    Rx,
    /// Bytes transmitted by the host (host → modem).
    Tx,
}

impl Direction {
    /// Both directions, in index order.
    pub const ALL: [Direction; 2] = [Direction::Rx, Direction::Tx];

    /// Index of the direction (RX = 0, TX = 1).
    pub const fn index(self) -> usize {
        match self {
            Direction::Rx => 0,
            Direction::Tx => 1,
        }
    }

    /// Lowercase name, used in channel ids and metric labels.
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Rx => "rx",
            Direction::Tx => "tx",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Rx => f.write_str("RX"),
            Direction::Tx => f.write_str("TX"),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = ProtocolError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Direction::Rx),
            1 => Ok(Direction::Tx),
            _ => Err(ProtocolError::InvalidDirection(index)),
        }
    }
}

/// Frame type decoded from the control byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Set Asynchronous Balanced Mode (channel open request).
    Sabm,
    /// Unnumbered Acknowledgement.
    Ua,
    /// Disconnected Mode.
    Dm,
    /// Disconnect (channel close request).
    Disc,
    /// Unnumbered Information with Header check (data).
    Uih,
    /// Unnumbered Information.
    Ui,
}

impl FrameType {
    /// Short protocol name of the frame type.
    pub const fn name(self) -> &'static str {
        match self {
            FrameType::Sabm => "SABM",
            FrameType::Ua => "UA",
            FrameType::Dm => "DM",
            FrameType::Disc => "DISC",
            FrameType::Uih => "UIH",
            FrameType::Ui => "UI",
        }
    }
}

impl std::fmt::Display for FrameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for FrameType {
    type Error = ProtocolError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            CTRL_SABM | CTRL_SABM_PF => Ok(FrameType::Sabm),
            CTRL_UA | CTRL_UA_PF => Ok(FrameType::Ua),
            CTRL_DM | CTRL_DM_PF => Ok(FrameType::Dm),
            CTRL_DISC | CTRL_DISC_PF => Ok(FrameType::Disc),
            CTRL_UIH | CTRL_UIH_PF => Ok(FrameType::Uih),
            CTRL_UI | CTRL_UI_PF => Ok(FrameType::Ui),
            _ => Err(ProtocolError::UnknownControl(byte)),
        }
    }
}

/// Whether the poll/final bit is set in a control byte.
pub const fn poll_final(control: u8) -> bool {
    control & CONTROL_PF_BIT != 0
}

/// DLC encoded in an address byte. The E/A and C/R bits are dropped.
pub const fn address_dlc(address: u8) -> u8 {
    address / ADDRESS_DLC_DIVISOR
}

/// Whether the C/R bit is set in an address byte.
pub const fn address_command_response(address: u8) -> bool {
    address & ADDRESS_CR_BIT != 0
}

/// Whether the E/A bit is set in an address byte.
pub const fn address_extension(address: u8) -> bool {
    address & ADDRESS_EA_BIT != 0
}

/// Position of a parser within the frame grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Waiting for the opening flag.
    #[default]
    Open,
    /// Expecting the address byte.
    Addr,
    /// Expecting the control byte.
    Control,
    /// Expecting the first length byte.
    Len,
    /// Expecting the second byte of an extended length.
    Len2,
    /// Consuming payload bytes.
    Data,
    /// Expecting the frame checksum.
    Fcs,
    /// Expecting the closing flag.
    Close,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Open => "OPEN",
            Phase::Addr => "ADDR",
            Phase::Control => "CONTROL",
            Phase::Len => "LEN",
            Phase::Len2 => "LEN2",
            Phase::Data => "DATA",
            Phase::Fcs => "FCS",
            Phase::Close => "CLOSE",
        };
        f.write_str(name)
    }
}

/// How the length field of a frame is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthMode {
    /// The LSB of the first length byte is an E/A bit; when clear a second
    /// byte carries the high-order length bits.
    #[default]
    Extended,
    /// Legacy single-byte form: `length = byte / 2`, regardless of the LSB.
    #[serde(rename = "single")]
    SingleByte,
}

impl LengthMode {
    /// Option value naming this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            LengthMode::Extended => "extended",
            LengthMode::SingleByte => "single",
        }
    }
}

impl std::fmt::Display for LengthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthMode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extended" => Ok(LengthMode::Extended),
            "single" => Ok(LengthMode::SingleByte),
            other => Err(ProtocolError::UnknownLengthMode(other.to_string())),
        }
    }
}
