const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// FNV-1a over the UTF-8 bytes of `text`
///
/// `DefaultHasher` is seeded per process, so it cannot back identity tokens
/// that must stay stable across runs.
pub fn fnv1a(text: &str) -> u64 {
    text.bytes().fold(FNV_OFFSET_BASIS, |state, byte| {
        (state ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_offset_basis() {
        assert_eq!(fnv1a(""), FNV_OFFSET_BASIS);
    }

    #[test]
    fn test_known_vector() {
        // Reference value for "a" from the FNV test suite
        assert_eq!(fnv1a("a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn test_stable_across_calls() {
        let text = "You discover the library's kids corner.";
        assert_eq!(fnv1a(text), fnv1a(text));
        assert_ne!(fnv1a(text), fnv1a("You join a weekend sport team."));
    }
}
