//! Referral Codes
//!
//! Every account is issued a shareable code at creation: "TT" followed by
//! six random base-36 uppercase characters. Generation alone does not
//! guarantee global uniqueness; nothing indexes accounts by code yet.

use rand::Rng;

/// Issued codes always carry the storefront prefix.
pub const REFERRAL_CODE_PREFIX: &str = "TT";

/// Random characters after the prefix.
pub const REFERRAL_CODE_SUFFIX_LEN: usize = 6;

const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a fresh referral code of the form `TT` + 6 base-36 uppercase
/// characters.
pub fn generate_referral_code() -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(REFERRAL_CODE_PREFIX.len() + REFERRAL_CODE_SUFFIX_LEN);
    code.push_str(REFERRAL_CODE_PREFIX);
    for _ in 0..REFERRAL_CODE_SUFFIX_LEN {
        let idx = rng.gen_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }
    code
}

/// Shape check for a submitted code: prefix, length, and alphabet.
///
/// There is no registry mapping issued codes to owning accounts, so a
/// well-formed code that was never issued cannot be distinguished from a
/// real one here. TODO: validate against issued codes and credit the
/// referrer once the crediting split is decided by product.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == REFERRAL_CODE_PREFIX.len() + REFERRAL_CODE_SUFFIX_LEN
        && code.starts_with(REFERRAL_CODE_PREFIX)
        && code[REFERRAL_CODE_PREFIX.len()..]
            .bytes()
            .all(|b| CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_well_formed() {
        for _ in 0..100 {
            let code = generate_referral_code();
            assert_eq!(code.len(), 8);
            assert!(code.starts_with("TT"));
            assert!(is_well_formed(&code), "bad code: {}", code);
        }
    }

    #[test]
    fn test_shape_validation() {
        assert!(is_well_formed("TTA1B2C3"));
        assert!(is_well_formed("TT000000"));

        assert!(!is_well_formed(""));
        assert!(!is_well_formed("TT"));
        assert!(!is_well_formed("TTA1B2C")); // too short
        assert!(!is_well_formed("TTA1B2C3D")); // too long
        assert!(!is_well_formed("XXA1B2C3")); // wrong prefix
        assert!(!is_well_formed("TTa1b2c3")); // lowercase
        assert!(!is_well_formed("TTA1B2C!")); // outside alphabet
    }
}
