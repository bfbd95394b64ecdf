#![no_main]

use libfuzzer_sys::{fuzz_target, Corpus};
use msgarg::{Context, Endian, Variant};

const SIGNATURES: [&str; 8] = [
    "s",
    "as",
    "aai",
    "(isby)",
    "{sd}",
    "a{s(yxd)}",
    "(u(yxd)sd(yxd)iq(yxd)b)",
    "aa{ta(bn)}",
];

fuzz_target!(|data: &[u8]| -> Corpus {
    let (selector, data) = match data.split_first() {
        Some(split) => split,
        None => return Corpus::Reject,
    };

    let signature = SIGNATURES[usize::from(*selector) % SIGNATURES.len()];
    let endian = if selector & 0x80 == 0 {
        Endian::Little
    } else {
        Endian::Big
    };
    let context = Context::new(endian);

    match Variant::from_bytes(signature, data, context) {
        Ok(arg) => {
            arg.to_string();
            let encoded = arg.to_bytes(context).expect("decoded variants encode");
            assert_eq!(encoded, data);
            Corpus::Keep
        }
        Err(_) => Corpus::Reject,
    }
});
