use num_bigint::BigInt;
use num_traits::One;
use proptest::prelude::*;

use super::*;

const WIDTHS: [usize; 7] = [1, 7, 8, 64, 65, 128, 256];

/// Value in `[0, 2^w)` built from random words.
fn unsigned_in_width(words: &[u64], bit_count: usize) -> BigInt {
    words_to_int(&mask_to_width(words, bit_count), bit_count, false)
}

proptest! {
    #[test]
    fn test_unsigned_round_trip(
        words in prop::collection::vec(any::<u64>(), 4),
        idx in 0..WIDTHS.len()
    ) {
        let bits = WIDTHS[idx];
        let value = unsigned_in_width(&words, bits);
        let encoded = int_to_words(&value, bits).unwrap();
        prop_assert_eq!(encoded.len(), word_count(bits));
        prop_assert!(high_bits_clear(&encoded, bits));
        prop_assert_eq!(words_to_int(&encoded, bits, false), value);
    }

    #[test]
    fn test_signed_round_trip(
        words in prop::collection::vec(any::<u64>(), 4),
        idx in 0..WIDTHS.len()
    ) {
        let bits = WIDTHS[idx];
        // Any in-width pattern decoded as signed is a valid signed value.
        let value = words_to_int(&mask_to_width(&words, bits), bits, true);
        let encoded = int_to_words(&value, bits).unwrap();
        prop_assert!(high_bits_clear(&encoded, bits));
        prop_assert_eq!(words_to_int(&encoded, bits, true), value);
    }

    #[test]
    fn test_hex_path_agrees(
        words in prop::collection::vec(any::<u64>(), 4),
        idx in 0..WIDTHS.len(),
        signed in any::<bool>()
    ) {
        let bits = WIDTHS[idx];
        let value = words_to_int(&mask_to_width(&words, bits), bits, signed);
        prop_assert_eq!(int_to_words_via_hex(&value, bits), int_to_words(&value, bits));
    }
}

#[test]
fn test_signed_extremes_round_trip() {
    for bits in WIDTHS {
        let min = -(BigInt::one() << (bits - 1));
        let max = (BigInt::one() << (bits - 1)) - 1;
        for value in [min, max, BigInt::from(-1), BigInt::from(0)] {
            let encoded = int_to_words(&value, bits).unwrap();
            assert_eq!(words_to_int(&encoded, bits, true), value, "{bits} bits");
        }
    }
}

#[test]
fn test_unsigned_extremes_round_trip() {
    for bits in WIDTHS {
        let max = (BigInt::one() << bits) - 1;
        let encoded = int_to_words(&max, bits).unwrap();
        assert_eq!(words_to_int(&encoded, bits, false), max, "{bits} bits");
        assert!(int_to_words(&(max + 1), bits).is_err());
    }
}
