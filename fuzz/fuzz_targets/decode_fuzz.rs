//! Decode fuzz target: deserialize arbitrary bytes with a fixed struct.
//! Decoding must not panic. Whatever decodes must re-encode to the bytes it consumed
//! and report the same extent.
//! Build with: cargo fuzz run decode_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
const SCHEMA: &str = r#"
struct Fuzz {
    id: u16;
    name: string;
    tags: array<long_string>;
    grid: long_array<array<i8>>;
    ratio: u32;
}
"#;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let schema = schemabuf::parse(SCHEMA).expect("fixed schema parses");
    let s = schema.get("Fuzz").expect("Fuzz");
    let extent = s.extent(data, 0);
    if let Ok((record, consumed)) = s.deserialize_with_length(data, 0) {
        assert_eq!(extent.ok(), Some(consumed));
        let bytes = s.serialize(&record).expect("re-encode");
        assert_eq!(&bytes[..], &data[..consumed]);
    } else {
        assert!(extent.is_err());
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run decode_fuzz");
}
