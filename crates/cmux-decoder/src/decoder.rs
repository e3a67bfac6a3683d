//! The CMUX decoder.
//!
//! [`Decoder`] takes the byte events of a UART decoder, runs one
//! [`FrameParser`] per direction over them and turns the resulting frame
//! events into annotations.

use cmux_metrics::{metric_defs, metrics, LabelCache};
use cmux_protocol::{Direction, Frame, FrameAssembler, FrameEvent, FrameParser};
use tracing::{debug, trace};

use crate::annotation::{data_class, debug_class, Annotation, AnnotationSink};
use crate::options::DecoderOptions;
use crate::uart::UartEvent;

/// Decoding state owned by one direction.
#[derive(Debug)]
struct DirectionState {
    parser: FrameParser,
    assembler: FrameAssembler,
    labels: LabelCache,
}

impl DirectionState {
    fn new(direction: Direction, options: &DecoderOptions) -> Self {
        DirectionState {
            parser: FrameParser::new(direction, options.length),
            assembler: FrameAssembler::new(direction),
            labels: LabelCache::new(direction.as_str()),
        }
    }

    fn direction(&self) -> Direction {
        self.parser.direction()
    }

    /// Feed a byte through the parser and assembler.
    fn push(&mut self, byte: u8) -> (FrameEvent, Option<Frame>) {
        let event = self.parser.push(byte);
        self.record(&event);

        let frame = self.assembler.push(&event);
        if let Some(ref frame) = frame {
            self.record_frame(frame);
        }
        (event, frame)
    }

    fn record(&mut self, event: &FrameEvent) {
        let direction = self.direction();
        metrics::counter!(metric_defs::PARSER_BYTES.name, self.labels.direction()).increment(1);

        match *event {
            FrameEvent::Resync { byte, phase } => {
                debug!("CMUX[{}]: Resync on 0x{:02X} in {}", direction, byte, phase);
                let mut labels = self.labels.direction().clone();
                labels.push(("phase", phase.to_string()));
                metrics::counter!(metric_defs::PARSER_RESYNCS.name, &labels).increment(1);
            }
            FrameEvent::OpenFlag => {
                metrics::counter!(metric_defs::FRAMES_OPENED.name, self.labels.direction())
                    .increment(1);
            }
            FrameEvent::DataByte { dlc, .. } => {
                let labels = self.labels.channel(dlc);
                metrics::counter!(metric_defs::CHANNEL_DATA_BYTES.name, labels).increment(1);
            }
            _ => {}
        }
    }

    fn record_frame(&mut self, frame: &Frame) {
        trace!(
            "CMUX[{}]: {} frame on DLC {} ({} bytes, FCS 0x{:02X})",
            frame.direction,
            frame.frame_type,
            frame.dlc,
            frame.payload.len(),
            frame.fcs
        );

        let labels = self.labels.channel(frame.dlc);
        metrics::histogram!(metric_defs::FRAME_PAYLOAD_SIZE.name, labels)
            .record(frame.payload.len() as f64);

        let mut completed = labels.clone();
        completed.push(("frame_type", frame.frame_type.name().to_string()));
        metrics::counter!(metric_defs::FRAMES_COMPLETED.name, &completed).increment(1);
    }
}

/// Decoder for a two-direction CMUX capture.
///
/// RX and TX are decoded by independent state machines; bytes of one
/// direction never influence the other.
#[derive(Debug)]
pub struct Decoder {
    options: DecoderOptions,
    directions: [DirectionState; 2],
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecoderOptions::default())
    }
}

impl Decoder {
    /// Create a decoder with both directions waiting for an opening flag.
    pub fn new(options: DecoderOptions) -> Self {
        debug!(
            "CMUX: Decoder started (format={}, debug={}, length={})",
            options.format, options.debug, options.length
        );
        Decoder {
            directions: Direction::ALL.map(|direction| DirectionState::new(direction, &options)),
            options,
        }
    }

    /// Options in effect.
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Frame parser of a direction.
    pub fn parser(&self, direction: Direction) -> &FrameParser {
        &self.directions[direction.index()].parser
    }

    /// Drop any frames in progress on both directions.
    pub fn reset(&mut self) {
        for state in &mut self.directions {
            state.parser.reset();
            state.assembler.clear();
        }
    }

    /// Decode one UART event, writing annotations to `sink`.
    ///
    /// Events that do not carry a data byte, and data bytes on unknown
    /// channels, are ignored.
    pub fn decode<S: AnnotationSink + ?Sized>(&mut self, event: &UartEvent, sink: &mut S) {
        self.decode_event(event, sink);
    }

    /// Decode a sequence of UART events in order.
    pub fn decode_all<'a, I, S>(&mut self, events: I, sink: &mut S)
    where
        I: IntoIterator<Item = &'a UartEvent>,
        S: AnnotationSink + ?Sized,
    {
        for event in events {
            self.decode_event(event, sink);
        }
    }

    /// Decode one UART event and return the frame it completed, if any.
    ///
    /// Annotations are written to `sink` exactly as with [`Decoder::decode`].
    pub fn decode_frame<S: AnnotationSink + ?Sized>(
        &mut self,
        event: &UartEvent,
        sink: &mut S,
    ) -> Option<Frame> {
        self.decode_event(event, sink)
    }

    fn decode_event<S: AnnotationSink + ?Sized>(
        &mut self,
        event: &UartEvent,
        sink: &mut S,
    ) -> Option<Frame> {
        let byte = event.data_byte()?;
        let direction = match event.direction() {
            Ok(direction) => direction,
            Err(err) => {
                trace!("CMUX: Ignoring byte 0x{:02X}: {}", byte, err);
                return None;
            }
        };

        let (frame_event, frame) = self.directions[direction.index()].push(byte);
        self.annotate(event, direction, &frame_event, sink);
        frame
    }

    fn annotate<S: AnnotationSink + ?Sized>(
        &self,
        event: &UartEvent,
        direction: Direction,
        frame_event: &FrameEvent,
        sink: &mut S,
    ) {
        let labels = frame_event.labels(self.options.format);
        let annotation = |class| Annotation {
            start: event.start,
            end: event.end,
            class,
            labels: labels.clone(),
        };

        match *frame_event {
            FrameEvent::DataByte { dlc, .. } => {
                if self.options.debug {
                    sink.put(annotation(debug_class(direction)));
                }
                sink.put(annotation(data_class(dlc, direction)));
            }
            _ if self.options.debug => sink.put(annotation(debug_class(direction))),
            _ => {}
        }
    }
}
