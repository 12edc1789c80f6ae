pub mod url_validator;

/// Fixed length of every short code.
pub const SHORT_CODE_LENGTH: usize = 6;

/// URL-safe alphabet, 64 symbols.
const CODE_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Generate a random 6-character short code.
///
/// Codes are the only handle on otherwise-unlisted links, so they must be
/// unguessable: `rand::rng()` is a CSPRNG reseeded from the OS. No
/// uniqueness is guaranteed here; the store's unique index catches
/// collisions and the service retries with a fresh code.
pub fn generate_short_code() -> String {
    use std::iter;

    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(SHORT_CODE_LENGTH)
        .collect()
}

/// Check that a candidate short code has the exact generated shape.
///
/// Used to reject malformed codes before they reach the database.
pub fn is_valid_short_code(code: &str) -> bool {
    code.len() == SHORT_CODE_LENGTH
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_length() {
        for _ in 0..100 {
            assert_eq!(generate_short_code().len(), SHORT_CODE_LENGTH);
        }
    }

    #[test]
    fn test_generated_code_alphabet() {
        for _ in 0..100 {
            let code = generate_short_code();
            assert!(
                code.bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'),
                "unexpected character in code: {}",
                code
            );
        }
    }

    #[test]
    fn test_generated_codes_pass_validation() {
        for _ in 0..100 {
            assert!(is_valid_short_code(&generate_short_code()));
        }
    }

    #[test]
    fn test_valid_short_codes() {
        assert!(is_valid_short_code("abc123"));
        assert!(is_valid_short_code("A-b_9Z"));
        assert!(is_valid_short_code("______"));
    }

    #[test]
    fn test_invalid_short_codes() {
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("abc12"));
        assert!(!is_valid_short_code("abc1234"));
        assert!(!is_valid_short_code("abc!23"));
        assert!(!is_valid_short_code("abc 23"));
        assert!(!is_valid_short_code("abc/23"));
        // multi-byte characters must not sneak past even at byte length 6
        assert!(!is_valid_short_code("abcé2"));
    }
}
