use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
    DecodeError, Engine as _,
};

/// Standard alphabet, padding required, tolerant of non-zero trailing bits
/// as produced by some link generators.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// Number of `=` characters needed to bring `len` up to a multiple of 4.
///
/// Never returns 4.
pub fn padding_needed(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Re-pads a base64 string whose trailing `=` characters were stripped.
///
/// Existing padding is removed first so over- and under-padded inputs end up
/// the same.
pub fn repad(input: &str) -> String {
    let trimmed = input.trim_end_matches('=');
    let mut padded = String::with_capacity(trimmed.len() + 3);
    padded.push_str(trimmed);
    padded.extend(std::iter::repeat('=').take(padding_needed(trimmed.len())));
    padded
}

/// Reverses a URL-safe Base64 string to standard Base64 format.
pub fn url_safe_base64_reverse(input: &str) -> String {
    input.replace('-', "+").replace('_', "/")
}

/// Decodes a Base64 payload that may be unpadded or use the URL-safe alphabet.
///
/// # Arguments
/// * `input` - The Base64 encoded string, with or without padding.
///
/// # Returns
/// The decoded bytes, or the underlying decode error.
pub fn decode_lenient(input: &str) -> Result<Vec<u8>, DecodeError> {
    LENIENT_STANDARD.decode(repad(&url_safe_base64_reverse(input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    #[test]
    fn test_padding_needed() {
        assert_eq!(padding_needed(0), 0);
        assert_eq!(padding_needed(4), 0);
        assert_eq!(padding_needed(5), 3);
        assert_eq!(padding_needed(6), 2);
        assert_eq!(padding_needed(7), 1);
    }

    #[test]
    fn test_repad_lengths_are_multiples_of_four() {
        for len in 0..64 {
            let input = "A".repeat(len);
            assert_eq!(repad(&input).len() % 4, 0, "length {}", len);
        }
    }

    #[test]
    fn test_decode_lenient_accepts_stripped_padding() {
        for payload in ["a", "ab", "abc", "abcd", "{\"ps\":\"x\"}"] {
            let encoded = STANDARD.encode(payload);
            let stripped = encoded.trim_end_matches('=');
            assert_eq!(decode_lenient(stripped).unwrap(), payload.as_bytes());
            assert_eq!(decode_lenient(&encoded).unwrap(), payload.as_bytes());
        }
    }

    #[test]
    fn test_decode_lenient_accepts_url_safe_alphabet() {
        let bytes = [0xfbu8, 0xff, 0xfe];
        let encoded = STANDARD.encode(bytes);
        assert_eq!(encoded, "+//+");
        assert_eq!(decode_lenient("-__-").unwrap(), bytes);
    }

    #[test]
    fn test_decode_lenient_rejects_garbage() {
        assert!(decode_lenient("not-base64!!!").is_err());
    }
}
