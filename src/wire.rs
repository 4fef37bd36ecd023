//! Line codec: one serde value per newline-terminated JSON line.
//!
//! The wire format carries no length prefixes, type tags, or checksums; a line
//! is the whole frame. Malformed input fails loudly with the underlying
//! `serde_json` error rather than yielding a partial value.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::NetError;

/// Serialize `value` into a single line of JSON, without the trailing newline.
///
/// JSON string escaping guarantees the output itself contains no raw newline,
/// so the line is always a complete frame.
pub fn encode_line<T: Serialize>(value: &T) -> Result<String, NetError> {
    Ok(serde_json::to_string(value)?)
}

/// Deserialize one received line into a value of type `T`.
pub fn decode_line<T: DeserializeOwned>(line: &str) -> Result<T, NetError> {
    Ok(serde_json::from_str(
        line.trim_end_matches(|c| c == '\n' || c == '\r'),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Probe {
        name: String,
        turn: u32,
    }

    #[test]
    fn round_trip_reconstructs_equal_value() {
        let value = Probe {
            name: "left\nright".to_string(),
            turn: 7,
        };
        let line = encode_line(&value).unwrap();
        assert!(!line.contains('\n'), "frame must stay on one line");
        let back: Probe = decode_line(&line).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn decode_tolerates_line_terminators() {
        let back: Probe = decode_line("{\"name\":\"x\",\"turn\":1}\r\n").unwrap();
        assert_eq!(back.turn, 1);
    }

    #[test]
    fn malformed_input_fails_loudly() {
        let result: Result<Probe, _> = decode_line("not json at all");
        assert!(matches!(result, Err(NetError::Codec(_))));
    }
}
