//! Row-key nudge properties.
//!
//! The final stored key after any number of conflict nudges must stay of
//! the form `T + k * 0.000001` (within float tolerance), never earlier
//! than `T`, and always parse back as a float.

use bp_common::RowKey;
use proptest::prelude::*;

proptest! {
    #[test]
    fn nudged_keys_stay_anchored_to_the_origin(
        base in 1_000_000_000.0_f64..2_000_000_000.0,
        nudges in 0u32..64,
    ) {
        let mut ts = base;
        for _ in 0..nudges {
            ts += 0.000001;
        }
        let key = RowKey::from_timestamp(ts);
        let parsed: f64 = key.0.parse().expect("row keys parse as floats");

        prop_assert!(parsed >= base);
        let expected = base + f64::from(nudges) * 0.000001;
        prop_assert!((parsed - expected).abs() < 1e-4);
    }

    #[test]
    fn rendered_keys_always_carry_a_decimal_point(
        ts in 1_000_000_000.0_f64..2_000_000_000.0,
    ) {
        let key = RowKey::from_timestamp(ts);
        prop_assert!(key.0.contains('.'));
    }
}
