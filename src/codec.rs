//! Fixed-width wire codec for the (stage, state) pair.
//!
//! Every log column stores the same 8-byte record: two 4-byte big-endian
//! integers, the stage id followed by the state id. A fixed layout avoids
//! variable-length framing on a hot, high-volume append-only structure and
//! keeps row scans cheap.
//!
//! Decoding resolves ids through the closed [`Stage`]/[`State`] vocabularies
//! and fails loudly on anything it does not recognize.

use crate::entry::{Stage, State};
use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder};

/// Encoded size of a (stage, state) record.
pub const STAGE_STATE_LEN: usize = 8;

/// Encode a (stage, state) pair into its fixed 8-byte record.
pub fn encode(stage: Stage, state: State) -> [u8; STAGE_STATE_LEN] {
    let mut buf = [0u8; STAGE_STATE_LEN];
    BigEndian::write_u32(&mut buf[0..4], stage.id());
    BigEndian::write_u32(&mut buf[4..8], state.id());
    buf
}

/// Decode a stored record back into its (stage, state) pair.
///
/// Fails with [`Error::Corruption`] if the record has the wrong length or
/// either id falls outside the vocabulary. Unknown ids indicate storage
/// corruption or a schema version skew and are never coerced to a default.
pub fn decode(raw: &[u8]) -> Result<(Stage, State)> {
    if raw.len() != STAGE_STATE_LEN {
        return Err(Error::Corruption(format!(
            "stage record must be {} bytes, got {}",
            STAGE_STATE_LEN,
            raw.len()
        )));
    }

    let stage_id = BigEndian::read_u32(&raw[0..4]);
    let state_id = BigEndian::read_u32(&raw[4..8]);

    let stage = Stage::from_id(stage_id)
        .ok_or_else(|| Error::Corruption(format!("unknown stage id {}", stage_id)))?;
    let state = State::from_id(state_id)
        .ok_or_else(|| Error::Corruption(format!("unknown state id {}", state_id)))?;

    Ok((stage, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_pairs() {
        for stage in Stage::ALL {
            for state in State::ALL {
                let raw = encode(stage, state);
                let (decoded_stage, decoded_state) = decode(&raw).unwrap();
                assert_eq!(decoded_stage, stage);
                assert_eq!(decoded_state, state);
            }
        }
    }

    #[test]
    fn test_encoded_layout_is_fixed() {
        let raw = encode(Stage::Active, State::Partial);
        assert_eq!(raw, [0, 0, 0, 0, 0, 0, 0, 1]);

        let raw = encode(Stage::Complete, State::Complete);
        assert_eq!(raw, [0, 0, 0, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let err = decode(&[0, 0, 0]).unwrap_err();
        assert!(err.is_corruption());

        let err = decode(&[0u8; 16]).unwrap_err();
        assert!(err.is_corruption());
    }

    #[test]
    fn test_decode_rejects_unknown_stage() {
        let mut raw = [0u8; STAGE_STATE_LEN];
        BigEndian::write_u32(&mut raw[0..4], 99);
        let err = decode(&raw).unwrap_err();
        assert!(err.is_corruption());
        assert!(err.to_string().contains("stage id 99"));
    }

    #[test]
    fn test_decode_rejects_unknown_state() {
        let mut raw = [0u8; STAGE_STATE_LEN];
        BigEndian::write_u32(&mut raw[0..4], Stage::Committed.id());
        BigEndian::write_u32(&mut raw[4..8], 77);
        let err = decode(&raw).unwrap_err();
        assert!(err.is_corruption());
        assert!(err.to_string().contains("state id 77"));
    }
}
