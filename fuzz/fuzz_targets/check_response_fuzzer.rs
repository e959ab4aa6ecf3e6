//! Fuzz target for check endpoint response parsing
//!
//! # Invariants
//!
//! - Non-2xx status is ALWAYS a transport failure, whatever the body
//! - `Invalid` ONLY from a 2xx body whose `valid` is `false`
//! - NEVER panic on malformed bodies

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wordgate_core::{ValidationError, ValidationOutcome, parse_check_response};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    status: u16,
    body: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let result = parse_check_response(input.status, &input.body);

    if !(200..300).contains(&input.status) {
        assert_eq!(result, Err(ValidationError::Status { code: input.status }));
    }

    if ValidationOutcome::from(result) == ValidationOutcome::Invalid {
        assert!((200..300).contains(&input.status));
        let text = String::from_utf8_lossy(&input.body);
        assert!(text.contains("false"));
    }
});
