#![no_main]

use libfuzzer_sys::arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

#[derive(Debug)]
struct AddressInput {
    address: String,
    seed: Vec<(String, String)>,
}

impl<'a> Arbitrary<'a> for AddressInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> libfuzzer_sys::arbitrary::Result<Self> {
        let address: String = u.arbitrary()?;
        let seed: Vec<(String, String)> = u.arbitrary()?;
        Ok(Self { address, seed })
    }
}

fuzz_target!(|input: AddressInput| {
    let seed: HashMap<String, String> = input.seed.iter().cloned().collect();
    let seeded = seed.clone();

    // Recognition must be total.
    let _ = taos_conn::accepts_scheme(&input.address);

    // Parsing must never panic, and on success every field is either a
    // parsed value or absent, with seed entries intact.
    if let Ok(config) = taos_conn::parse_with(&input.address, seed) {
        assert_ne!(config.host.as_deref(), Some(""));
        assert_ne!(config.database.as_deref(), Some(""));
        for (key, value) in &seeded {
            assert_eq!(config.options.get(key), Some(value));
        }
    }
});
