#![no_main]

use libfuzzer_sys::fuzz_target;
use shutterlag::protocol::read_message;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Drain every delimited message from arbitrary bytes; parsing must
    // never panic, only return a message or a clean error
    let mut cursor = Cursor::new(data.to_vec());
    while read_message(&mut cursor).is_ok() {}
});
