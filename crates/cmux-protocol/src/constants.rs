//! Protocol constants
//!
//! Byte values and bit masks of the GSM 07.10 basic-option framing as used by
//! SIMCOM modems in CMUX mode.

// ============================================================================
// Framing
// ============================================================================

/// Flag byte that opens and closes every basic-option frame.
pub const FLAG: u8 = 0xF9;

// ============================================================================
// Address Field
// ============================================================================

/// Extension (E/A) bit of the address byte.
pub const ADDRESS_EA_BIT: u8 = 0x01;
/// Command/response (C/R) bit of the address byte.
pub const ADDRESS_CR_BIT: u8 = 0x02;
/// Divisor that strips the E/A and C/R bits off the address byte.
pub const ADDRESS_DLC_DIVISOR: u8 = 4;

// ============================================================================
// Control Field
// ============================================================================

/// Poll/final bit of the control byte.
pub const CONTROL_PF_BIT: u8 = 0x10;

/// Set Asynchronous Balanced Mode.
pub const CTRL_SABM: u8 = 0x2F;
/// Set Asynchronous Balanced Mode, P/F set.
pub const CTRL_SABM_PF: u8 = 0x3F;
/// Unnumbered Acknowledgement.
pub const CTRL_UA: u8 = 0x63;
/// Unnumbered Acknowledgement, P/F set.
pub const CTRL_UA_PF: u8 = 0x73;
/// Disconnected Mode.
pub const CTRL_DM: u8 = 0x0F;
/// Disconnected Mode, P/F set.
pub const CTRL_DM_PF: u8 = 0x1F;
/// Disconnect.
pub const CTRL_DISC: u8 = 0x43;
/// Disconnect, P/F set.
pub const CTRL_DISC_PF: u8 = 0x53;
/// Unnumbered Information with Header check.
pub const CTRL_UIH: u8 = 0xEF;
/// Unnumbered Information with Header check, P/F set.
pub const CTRL_UIH_PF: u8 = 0xFF;
/// Unnumbered Information.
pub const CTRL_UI: u8 = 0x03;
/// Unnumbered Information, P/F set.
pub const CTRL_UI_PF: u8 = 0x13;

// ============================================================================
// Length Field
// ============================================================================

/// Extension (E/A) bit of a length byte. Set on the final length byte.
pub const LENGTH_EA_BIT: u8 = 0x01;
/// Weight of the second length byte in the extended form.
pub const LENGTH_HIGH_MULTIPLIER: u16 = 128;
/// Largest payload length expressible with a single length byte.
pub const MAX_SHORT_LENGTH: u16 = 127;
/// Largest payload length expressible with two length bytes.
pub const MAX_EXTENDED_LENGTH: u16 = 255 * LENGTH_HIGH_MULTIPLIER + MAX_SHORT_LENGTH;

// ============================================================================
// Channel Routing
// ============================================================================

/// Number of DLCs that have dedicated output channels.
pub const ROUTED_DLC_COUNT: usize = 4;
/// Number of output channels: one debug channel per direction plus one
/// channel per routed DLC and direction.
pub const CHANNEL_COUNT: usize = 2 + ROUTED_DLC_COUNT * 2;
