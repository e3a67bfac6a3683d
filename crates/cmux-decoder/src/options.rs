//! Decoder options.
//!
//! Hosts hand options over either as `key = value` string pairs or as a YAML
//! document:
//!
//! ```yaml
//! format: ascii    # ascii | dec | hex | oct | bin
//! debug: yes       # yes | no
//! length: extended # extended | single
//! ```

use cmux_protocol::{DataFormat, LengthMode};
use serde::{Deserialize, Serialize};

use crate::error::{DecoderError, DecoderResult};

/// Runtime options of a [`Decoder`](crate::Decoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderOptions {
    /// How payload bytes are rendered.
    pub format: DataFormat,
    /// Whether diagnostic annotations (flags, address, control, length,
    /// checksum, resync) are emitted.
    #[serde(with = "yes_no")]
    pub debug: bool,
    /// How the length field is interpreted.
    pub length: LengthMode,
}

impl DecoderOptions {
    /// Build options from host-provided `key, value` pairs.
    ///
    /// Keys not present keep their defaults.
    pub fn from_pairs<'a, I>(pairs: I) -> DecoderResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            options.set(key, value)?;
        }
        Ok(options)
    }

    /// Parse options from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> DecoderResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Set a single option from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> DecoderResult<()> {
        let invalid = |source| DecoderError::InvalidOption {
            key: key.to_string(),
            value: value.to_string(),
            source,
        };
        match key {
            "format" => self.format = value.parse().map_err(invalid)?,
            "debug" => self.debug = parse_yes_no(value)?,
            "length" => self.length = value.parse().map_err(invalid)?,
            other => return Err(DecoderError::UnknownOption(other.to_string())),
        }
        Ok(())
    }

    /// Set the payload format.
    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable diagnostic annotations.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the length field interpretation.
    pub fn with_length_mode(mut self, length: LengthMode) -> Self {
        self.length = length;
        self
    }
}

fn parse_yes_no(value: &str) -> DecoderResult<bool> {
    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(DecoderError::InvalidDebugFlag(other.to_string())),
    }
}

mod yes_no {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "yes" } else { "no" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_yes_no(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DecoderOptions::default();
        assert_eq!(options.format, DataFormat::Hex);
        assert!(!options.debug);
        assert_eq!(options.length, LengthMode::Extended);
    }

    #[test]
    fn test_from_pairs() {
        let pairs = [("format", "ascii"), ("debug", "yes"), ("length", "single")];
        let options = DecoderOptions::from_pairs(pairs).expect("valid options");
        assert_eq!(options.format, DataFormat::Ascii);
        assert!(options.debug);
        assert_eq!(options.length, LengthMode::SingleByte);
    }

    #[test]
    fn test_from_pairs_rejects_bad_values() {
        let err = DecoderOptions::from_pairs([("format", "base64")]).unwrap_err();
        assert!(matches!(err, DecoderError::InvalidOption { ref key, .. } if key == "format"));

        let err = DecoderOptions::from_pairs([("debug", "maybe")]).unwrap_err();
        assert!(matches!(err, DecoderError::InvalidDebugFlag(_)));

        let err = DecoderOptions::from_pairs([("radix", "hex")]).unwrap_err();
        assert!(matches!(err, DecoderError::UnknownOption(ref key) if key == "radix"));
    }

    #[test]
    fn test_from_yaml() {
        let options =
            DecoderOptions::from_yaml_str("format: oct\ndebug: yes\n").expect("valid yaml");
        assert_eq!(options.format, DataFormat::Oct);
        assert!(options.debug);
        assert_eq!(options.length, LengthMode::Extended);

        let options = DecoderOptions::from_yaml_str("length: single").expect("valid yaml");
        assert_eq!(options.length, LengthMode::SingleByte);
        assert!(!options.debug);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_keys() {
        assert!(DecoderOptions::from_yaml_str("colour: red").is_err());
        assert!(DecoderOptions::from_yaml_str("debug: sometimes").is_err());
    }

    #[test]
    fn test_yaml_serialization_uses_option_names() {
        let options = DecoderOptions::default()
            .with_format(DataFormat::Bin)
            .with_debug(true);
        let yaml = serde_yaml::to_string(&options).expect("serialize");
        assert!(yaml.contains("format: bin"));
        assert!(yaml.contains("debug: yes") || yaml.contains("debug: 'yes'"));

        let parsed = DecoderOptions::from_yaml_str(&yaml).expect("round trip");
        assert_eq!(parsed, options);
    }
}
