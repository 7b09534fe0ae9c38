// Integration tests for block::encode: exact byte layout of sequences and the
// limited-output pre-checks.

use lz4blk::block::compress::Lz4Error;
use lz4blk::block::decompress_core::decompress_exact;
use lz4blk::block::encode::{encode_sequence, write_last_literals, write_literals, write_match};
use lz4blk::block::types::LimitedOutputDirective::{LimitedOutput, NotLimited};

#[test]
fn one_match_then_last_literals() {
    let src = b"abcdabcdXYZWV";
    let mut dst = [0u8; 32];
    let mut op = 0;
    let mut anchor = 0;
    encode_sequence(src, &mut dst, &mut op, &mut anchor, 4, 4, 4, NotLimited).unwrap();
    assert_eq!(anchor, 8);
    let n = write_last_literals(src, &mut dst, anchor, op, NotLimited).unwrap();
    assert_eq!(
        &dst[..n],
        &[0x40, b'a', b'b', b'c', b'd', 0x04, 0x00, 0x50, b'X', b'Y', b'Z', b'W', b'V']
    );

    let mut out = [0u8; 13];
    assert_eq!(decompress_exact(&dst[..n], &mut out), Ok(13));
    assert_eq!(&out, src);
}

#[test]
fn literal_length_escapes() {
    let src = vec![b'q'; 270];
    let mut dst = vec![0u8; 300];
    let n = write_last_literals(&src, &mut dst, 0, 0, NotLimited).unwrap();
    // 15 in the nibble, then 255 + 0 for the remaining 255.
    assert_eq!(&dst[..3], &[0xF0, 255, 0]);
    assert_eq!(n, 3 + 270);

    let n = write_last_literals(&src[..15], &mut dst, 0, 0, NotLimited).unwrap();
    assert_eq!(&dst[..2], &[0xF0, 0]);
    assert_eq!(n, 2 + 15);

    let n = write_last_literals(&src[..14], &mut dst, 0, 0, NotLimited).unwrap();
    assert_eq!(dst[0], 0xE0);
    assert_eq!(n, 1 + 14);
}

#[test]
fn match_length_nibble_boundary() {
    let mut dst = [0u8; 16];

    // match length 18 → code 14, fits in the nibble
    let mut op = 0;
    let token = write_literals(b"", &mut dst, 0, 0, &mut op, NotLimited).unwrap();
    write_match(&mut dst, &mut op, token, 1, 14, NotLimited).unwrap();
    assert_eq!(&dst[..op], &[0x0E, 0x01, 0x00]);

    // match length 19 → code 15, saturates and needs one extra byte
    let mut op = 0;
    let token = write_literals(b"", &mut dst, 0, 0, &mut op, NotLimited).unwrap();
    write_match(&mut dst, &mut op, token, 1, 15, NotLimited).unwrap();
    assert_eq!(&dst[..op], &[0x0F, 0x01, 0x00, 0x00]);

    // code 15 + 255 + 3
    let mut op = 0;
    let token = write_literals(b"", &mut dst, 0, 0, &mut op, NotLimited).unwrap();
    write_match(&mut dst, &mut op, token, 300, 15 + 255 + 3, NotLimited).unwrap();
    assert_eq!(&dst[..op], &[0x0F, 0x2C, 0x01, 0xFF, 0x03]);
}

#[test]
fn limited_output_rejects_before_writing_past_end() {
    let src = vec![b'z'; 40];

    // Literal run check reserves room for the rest of the sequence.
    let mut dst = vec![0u8; 38];
    let mut op = 0;
    assert_eq!(
        write_literals(&src, &mut dst, 0, 30, &mut op, LimitedOutput),
        Err(Lz4Error::OutputTooSmall)
    );

    // Terminal run needs token + escape + 40 bytes.
    let mut dst = vec![0u8; 41];
    assert_eq!(write_last_literals(&src, &mut dst, 0, 0, LimitedOutput), Err(Lz4Error::OutputTooSmall));
    let mut dst = vec![0u8; 42];
    assert_eq!(write_last_literals(&src, &mut dst, 0, 0, LimitedOutput), Ok(42));
}
