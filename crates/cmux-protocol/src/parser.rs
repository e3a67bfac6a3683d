//! Per-direction frame state machine.
//!
//! A basic-option frame on the wire looks like this:
//!
//! ```text
//! +------+---------+---------+----------+--------------+-----+------+
//! | 0xF9 | address | control | len[1-2] | data[0..len] | FCS | 0xF9 |
//! +------+---------+---------+----------+--------------+-----+------+
//! ```
//!
//! The parser consumes one byte at a time and never fails: a byte that does
//! not fit the grammar yields [`FrameEvent::Resync`] and the parser goes back
//! to waiting for an opening flag.

use crate::constants::*;
use crate::event::FrameEvent;
use crate::types::{address_dlc, poll_final, Direction, FrameType, LengthMode, Phase};

/// Mutable state of one direction's parser.
///
/// `dlc`, `frame_type` and the length fields only carry meaning while a frame
/// is in progress; they are cleared whenever the phase returns to OPEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameParserState {
    /// Current position in the frame grammar.
    pub phase: Phase,
    /// Logical channel of the frame in progress.
    pub dlc: u8,
    /// Frame type of the frame in progress, once the control byte is known.
    pub frame_type: Option<FrameType>,
    /// Payload bytes still expected, including the next one.
    pub remaining_length: u16,
    /// Low-order bits of an extended length held between LEN and LEN2.
    pub partial_length_low: u16,
}

/// Frame state machine for a single transfer direction.
#[derive(Debug, Clone)]
pub struct FrameParser {
    direction: Direction,
    length_mode: LengthMode,
    state: FrameParserState,
}

impl FrameParser {
    /// Create a parser in the OPEN phase.
    pub fn new(direction: Direction, length_mode: LengthMode) -> Self {
        FrameParser {
            direction,
            length_mode,
            state: FrameParserState::default(),
        }
    }

    /// Direction this parser decodes.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Length field interpretation in use.
    pub fn length_mode(&self) -> LengthMode {
        self.length_mode
    }

    /// Current state.
    pub fn state(&self) -> &FrameParserState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Drop any frame in progress and wait for the next opening flag.
    pub fn reset(&mut self) {
        self.state = FrameParserState::default();
    }

    /// Feed a sequence of bytes, returning one event per byte.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<FrameEvent> {
        bytes.iter().map(|&byte| self.push(byte)).collect()
    }

    /// Feed one byte and advance the state machine.
    pub fn push(&mut self, byte: u8) -> FrameEvent {
        match self.state.phase {
            Phase::Open => {
                if byte == FLAG {
                    self.state.phase = Phase::Addr;
                    FrameEvent::OpenFlag
                } else {
                    self.resync(byte)
                }
            }
            Phase::Addr => {
                let dlc = address_dlc(byte);
                self.state.dlc = dlc;
                self.state.phase = Phase::Control;
                FrameEvent::AddressByte { dlc, raw: byte }
            }
            Phase::Control => match FrameType::try_from(byte) {
                Ok(frame_type) => {
                    self.state.frame_type = Some(frame_type);
                    self.state.phase = Phase::Len;
                    FrameEvent::ControlByte {
                        frame_type,
                        poll_final: poll_final(byte),
                    }
                }
                Err(_) => self.resync(byte),
            },
            Phase::Len => {
                let value = u16::from(byte >> 1);
                let final_byte = match self.length_mode {
                    LengthMode::SingleByte => true,
                    LengthMode::Extended => byte & LENGTH_EA_BIT != 0,
                };
                if final_byte {
                    self.set_length(value)
                } else {
                    self.state.partial_length_low = value;
                    self.state.phase = Phase::Len2;
                    FrameEvent::Length {
                        value,
                        partial: true,
                    }
                }
            }
            Phase::Len2 => {
                let value =
                    u16::from(byte) * LENGTH_HIGH_MULTIPLIER + self.state.partial_length_low;
                self.set_length(value)
            }
            Phase::Data => {
                if self.state.remaining_length > 1 {
                    self.state.remaining_length -= 1;
                } else {
                    self.state.phase = Phase::Fcs;
                }
                FrameEvent::DataByte {
                    dlc: self.state.dlc,
                    direction: self.direction,
                    byte,
                }
            }
            Phase::Fcs => {
                self.state.phase = Phase::Close;
                FrameEvent::Checksum(byte)
            }
            Phase::Close => {
                if byte == FLAG {
                    log::trace!(
                        "{} frame closed: dlc={} type={:?}",
                        self.direction,
                        self.state.dlc,
                        self.state.frame_type
                    );
                    self.reset();
                    FrameEvent::CloseFlag
                } else {
                    self.resync(byte)
                }
            }
        }
    }

    fn set_length(&mut self, length: u16) -> FrameEvent {
        self.state.remaining_length = length;
        self.state.phase = if length == 0 { Phase::Fcs } else { Phase::Data };
        FrameEvent::Length {
            value: length,
            partial: false,
        }
    }

    fn resync(&mut self, byte: u8) -> FrameEvent {
        let phase = self.state.phase;
        log::trace!("{} resync on 0x{:02X} in {}", self.direction, byte, phase);
        self.reset();
        FrameEvent::Resync { byte, phase }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rx() -> FrameParser {
        FrameParser::new(Direction::Rx, LengthMode::Extended)
    }

    fn length(value: u16) -> FrameEvent {
        FrameEvent::Length {
            value,
            partial: false,
        }
    }

    fn partial_length(value: u16) -> FrameEvent {
        FrameEvent::Length {
            value,
            partial: true,
        }
    }

    fn data(dlc: u8, direction: Direction, byte: u8) -> FrameEvent {
        FrameEvent::DataByte {
            dlc,
            direction,
            byte,
        }
    }

    fn resync(byte: u8, phase: Phase) -> FrameEvent {
        FrameEvent::Resync { byte, phase }
    }

    #[test]
    fn test_uih_frame_end_to_end() {
        let mut parser = rx();
        let events = parser.feed(&[0xF9, 0x00, 0xEF, 0x03, 0x41, 0xFF, 0xF9]);

        assert_eq!(
            events,
            vec![
                FrameEvent::OpenFlag,
                FrameEvent::AddressByte { dlc: 0, raw: 0x00 },
                FrameEvent::ControlByte {
                    frame_type: FrameType::Uih,
                    poll_final: false,
                },
                length(1),
                data(0, Direction::Rx, 0x41),
                FrameEvent::Checksum(0xFF),
                FrameEvent::CloseFlag,
            ]
        );
        assert_eq!(events[4].channel_index(), Some(2));
        assert_eq!(parser.phase(), Phase::Open);
        assert_eq!(*parser.state(), FrameParserState::default());
    }

    #[test]
    fn test_phase_progression() {
        let mut parser = rx();
        let expected = [
            (0xF9, Phase::Addr),
            (0x07, Phase::Control),
            (0x3F, Phase::Len),
            (0x05, Phase::Data),
            (b'A', Phase::Data),
            (b'T', Phase::Fcs),
            (0x1C, Phase::Close),
            (0xF9, Phase::Open),
        ];
        for (byte, phase) in expected {
            parser.push(byte);
            assert_eq!(parser.phase(), phase, "after byte 0x{:02X}", byte);
        }
    }

    #[test]
    fn test_zero_length_skips_data() {
        let mut parser = rx();
        let events = parser.feed(&[0xF9, 0x03, 0x3F, 0x01]);
        assert_eq!(events[3], length(0));
        assert_eq!(parser.phase(), Phase::Fcs);

        assert_eq!(parser.push(0x1C), FrameEvent::Checksum(0x1C));
        assert_eq!(parser.push(0xF9), FrameEvent::CloseFlag);
        assert_eq!(parser.phase(), Phase::Open);
    }

    #[test]
    fn test_extended_length_combines_bytes() {
        let mut parser = rx();
        parser.feed(&[0xF9, 0x05, 0xEF]);

        assert_eq!(parser.push(0x00), partial_length(0));
        assert_eq!(parser.phase(), Phase::Len2);

        assert_eq!(parser.push(0x01), length(128));
        assert_eq!(parser.phase(), Phase::Data);
        assert_eq!(parser.state().remaining_length, 128);
    }

    #[test]
    fn test_extended_length_low_and_high_parts() {
        let mut parser = rx();
        parser.feed(&[0xF9, 0x05, 0xEF]);

        // low = 0x14 / 2 = 10, high = 2 -> 2 * 128 + 10
        assert_eq!(parser.push(0x14), partial_length(10));
        assert_eq!(parser.state().partial_length_low, 10);
        assert_eq!(parser.push(0x02), length(266));
    }

    #[test]
    fn test_extended_length_maximum() {
        let mut parser = rx();
        parser.feed(&[0xF9, 0x05, 0xEF, 0xFE]);
        assert_eq!(parser.push(0xFF), length(MAX_EXTENDED_LENGTH));
    }

    #[test]
    fn test_extended_length_zero_goes_to_fcs() {
        let mut parser = rx();
        parser.feed(&[0xF9, 0x05, 0xEF, 0x00]);
        assert_eq!(parser.push(0x00), length(0));
        assert_eq!(parser.phase(), Phase::Fcs);
    }

    #[test]
    fn test_single_byte_mode_ignores_continuation_bit() {
        let mut parser = FrameParser::new(Direction::Tx, LengthMode::SingleByte);
        parser.feed(&[0xF9, 0x05, 0xEF]);

        assert_eq!(parser.push(0x04), length(2));
        assert_eq!(parser.phase(), Phase::Data);

        let events = parser.feed(&[b'O', b'K', 0x40, 0xF9]);
        assert_eq!(
            events,
            vec![
                data(1, Direction::Tx, b'O'),
                data(1, Direction::Tx, b'K'),
                FrameEvent::Checksum(0x40),
                FrameEvent::CloseFlag,
            ]
        );
    }

    #[test]
    fn test_unknown_control_resyncs() {
        let mut parser = rx();
        parser.feed(&[0xF9, 0x03]);
        assert_eq!(parser.push(0x00), resync(0x00, Phase::Control));
        assert_eq!(parser.phase(), Phase::Open);
        assert_eq!(parser.state().frame_type, None);
    }

    #[test]
    fn test_bad_close_flag_resyncs() {
        let mut parser = rx();
        parser.feed(&[0xF9, 0x03, 0xEF, 0x01, 0xAA]);
        assert_eq!(parser.phase(), Phase::Close);

        assert_eq!(parser.push(0x00), resync(0x00, Phase::Close));
        assert_eq!(*parser.state(), FrameParserState::default());
    }

    #[test]
    fn test_noise_before_open_flag() {
        let mut parser = rx();
        let events = parser.feed(b"AT\r");
        assert!(events
            .iter()
            .all(|event| matches!(event, FrameEvent::Resync { phase: Phase::Open, .. })));
        assert_eq!(parser.phase(), Phase::Open);

        assert_eq!(parser.push(0xF9), FrameEvent::OpenFlag);
    }

    #[test]
    fn test_flag_in_payload_is_data() {
        let mut parser = rx();
        parser.feed(&[0xF9, 0x09, 0xEF, 0x05]);
        assert_eq!(parser.push(0xF9), data(2, Direction::Rx, 0xF9));
    }

    #[test]
    fn test_reset_clears_frame_in_progress() {
        let mut parser = rx();
        parser.feed(&[0xF9, 0x0D, 0xEF, 0x07, 0x01]);
        assert_eq!(parser.phase(), Phase::Data);
        assert_eq!(parser.state().dlc, 3);

        parser.reset();
        assert_eq!(*parser.state(), FrameParserState::default());
    }
}
