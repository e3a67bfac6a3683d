//! Textual rendering of payload bytes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Radix used to render payload bytes in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Printable ASCII as characters, everything else as `[XX]`.
    Ascii,
    /// Decimal.
    Dec,
    /// Two-digit upper-case hexadecimal.
    #[default]
    Hex,
    /// Octal, zero-padded to two digits.
    Oct,
    /// Binary, zero-padded to two digits.
    Bin,
}

impl DataFormat {
    /// All formats, in option order.
    pub const ALL: [DataFormat; 5] = [
        DataFormat::Ascii,
        DataFormat::Dec,
        DataFormat::Hex,
        DataFormat::Oct,
        DataFormat::Bin,
    ];

    /// Option value naming this format.
    pub const fn as_str(self) -> &'static str {
        match self {
            DataFormat::Ascii => "ascii",
            DataFormat::Dec => "dec",
            DataFormat::Hex => "hex",
            DataFormat::Oct => "oct",
            DataFormat::Bin => "bin",
        }
    }

    /// Render a single byte.
    pub fn format_value(self, value: u8) -> String {
        match self {
            DataFormat::Ascii if (0x20..=0x7E).contains(&value) => char::from(value).to_string(),
            DataFormat::Ascii => format!("[{:02X}]", value),
            DataFormat::Dec => value.to_string(),
            DataFormat::Hex => format!("{:02X}", value),
            DataFormat::Oct => format!("{:02o}", value),
            DataFormat::Bin => format!("{:02b}", value),
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownFormat(s.to_string()))
    }
}
