//! Property-based tests for TOTP generation and validation.

use autha_totp::{
    Algorithm, HmacHotp, Hotp, Secret, Totp, TotpOptions, time_counter,
};
use proptest::prelude::*;

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Sha1),
        Just(Algorithm::Sha256),
        Just(Algorithm::Sha512),
    ]
}

fn secret_strategy() -> impl Strategy<Value = Secret> {
    proptest::collection::vec(any::<u8>(), 1..64).prop_map(Secret::from_bytes)
}

// Up to year ~2500, in milliseconds.
fn time_strategy() -> impl Strategy<Value = u64> {
    0u64..16_725_225_600_000
}

proptest! {
    /// Two instants in the same time step give the same code.
    #[test]
    fn same_counter_same_code(
        secret in secret_strategy(),
        period in 1u64..600,
        t1 in time_strategy(),
        delta in 0u64..600_000,
    ) {
        let totp = Totp::new(Algorithm::Sha1, 6, period).unwrap();
        let step = period * 1000;
        let t2 = t1 - t1 % step + delta % step;

        prop_assert_eq!(time_counter(period, t1), time_counter(period, t2));
        prop_assert_eq!(
            totp.generate(&secret, &TotpOptions::at(t1)).unwrap(),
            totp.generate(&secret, &TotpOptions::at(t2)).unwrap()
        );
    }

    /// Code length always equals the digit count.
    #[test]
    fn code_length_matches_digits(
        secret in secret_strategy(),
        algorithm in algorithm_strategy(),
        digits in 1u32..12,
        t in time_strategy(),
    ) {
        let totp = Totp::new(algorithm, digits, 30).unwrap();
        let code = totp.generate(&secret, &TotpOptions::at(t)).unwrap();

        prop_assert_eq!(code.len(), digits as usize);
        prop_assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    /// A generated code validates at the same instant.
    #[test]
    fn generated_code_validates(
        secret in secret_strategy(),
        algorithm in algorithm_strategy(),
        t in time_strategy(),
    ) {
        let totp = Totp::new(algorithm, 6, 30).unwrap();
        let options = TotpOptions::at(t);
        let code = totp.generate(&secret, &options).unwrap();

        prop_assert!(totp.validate(&code, &secret, &options).unwrap());
    }

    /// Window has `2 * window + 1` codes centered on the current one.
    #[test]
    fn window_shape(
        secret in secret_strategy(),
        window in 0u32..8,
        t in time_strategy(),
    ) {
        let totp = Totp::default();
        let options = TotpOptions::at(t);
        let codes = totp.generate_window(&secret, window, &options).unwrap();

        prop_assert_eq!(codes.len(), 2 * window as usize + 1);
        prop_assert_eq!(
            &codes[window as usize],
            &totp.generate(&secret, &options).unwrap()
        );
    }

    /// Every code of the window is accepted by windowed validation.
    #[test]
    fn window_members_validate(
        secret in secret_strategy(),
        window in 0u32..5,
        t in time_strategy(),
    ) {
        let totp = Totp::default();
        let hotp = HmacHotp::new();
        let options = TotpOptions::at(t);
        let counter = totp.time(&options);

        for offset in -i64::from(window)..=i64::from(window) {
            let code = hotp
                .generate(
                    Algorithm::Sha1,
                    6,
                    &secret,
                    counter.wrapping_add_signed(offset),
                )
                .unwrap();
            prop_assert!(
                totp.validate_window(&code, &secret, window, &options).unwrap()
            );
        }
    }

    /// Changing one digit of the expected code never validates.
    #[test]
    fn altered_code_is_rejected(
        secret in secret_strategy(),
        t in time_strategy(),
        position in 0usize..6,
    ) {
        let totp = Totp::default();
        let options = TotpOptions::at(t);
        let code = totp.generate(&secret, &options).unwrap();

        let mut altered: Vec<u8> = code.clone().into_bytes();
        altered[position] = b'0' + (altered[position] - b'0' + 1) % 10;
        let altered = String::from_utf8(altered).unwrap();

        prop_assert!(!totp.validate(&altered, &secret, &options).unwrap());
    }
}
