#![expect(missing_docs)]

use core::fmt::Write;

use bytecursor::{BinaryRead, BinaryWrite, Reader, Seek, Writer};

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(out, "{byte:02x}").unwrap();
    }
    out
}

#[test]
fn snapshot_mixed_record() {
    let mut writer = Writer::new();
    writer.write_u16(1).unwrap();
    writer.write_i32(-5).unwrap();
    writer.write_utf("ok").unwrap();
    let bytes = writer.finish();
    insta::assert_snapshot!(hex(&bytes), @"0100fbffffff02006f6b");

    let mut reader = Reader::new(&bytes);
    assert_eq!(reader.read_u16().unwrap(), 1);
    assert_eq!(reader.read_i32().unwrap(), -5);
    assert_eq!(reader.read_utf().unwrap(), "ok");
    assert_eq!(reader.bytes_available(), 0);
}

#[test]
fn snapshot_every_primitive() {
    let mut writer = Writer::new();
    writer.write_u8(0xab).unwrap();
    writer.write_i8(-2).unwrap();
    writer.write_bool(true).unwrap();
    writer.write_bool(false).unwrap();
    writer.write_i16(-2).unwrap();
    writer.write_u32(0x0102_0304).unwrap();
    writer.write_u64(1).unwrap();
    writer.write_i64(-1).unwrap();
    writer.write_f32(1.0).unwrap();
    writer.write_f64(-2.5).unwrap();
    let bytes = writer.finish();
    insta::assert_snapshot!(
        hex(&bytes),
        @"abfe0100feff040302010100000000000000ffffffffffffffff0000803f00000000000004c0"
    );
}

#[test]
fn snapshot_strings() {
    let mut writer = Writer::new();
    writer.write_utf("").unwrap();
    writer.write_utf("héllo").unwrap();
    writer.write_string("raw").unwrap();
    let bytes = writer.finish();
    insta::assert_snapshot!(hex(&bytes), @"0000060068c3a96c6c6f726177");

    let mut reader = Reader::new(&bytes);
    assert_eq!(reader.read_utf().unwrap(), "");
    assert_eq!(reader.read_utf().unwrap(), "héllo");
    assert_eq!(reader.read_string(3).unwrap(), "raw");
}

#[test]
fn snapshot_backpatched_length() {
    let mut writer = Writer::new();
    writer.write_u32(0).unwrap();
    writer.write_string("body").unwrap();
    let end = writer.position();
    writer.seek(Seek::Begin(0)).unwrap();
    writer.write_u32(u32::try_from(end - 4).unwrap()).unwrap();
    writer.seek(Seek::Begin(end)).unwrap();
    writer.write_u8(0xff).unwrap();
    insta::assert_snapshot!(hex(&writer.finish()), @"04000000626f6479ff");
}
