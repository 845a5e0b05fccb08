#![expect(missing_docs)]

use std::{collections::VecDeque, io};

use bytecursor::{BinaryRead, Drain, Reader, ReaderOptions, Source, Utf8Policy};
use bytes::Bytes;

fn record() -> Vec<u8> {
    let mut bytes = vec![0x2a, 0x00];
    bytes.extend_from_slice(&[3, 0]);
    bytes.extend_from_slice(b"abc");
    bytes
}

fn assert_record(reader: &mut Reader<'_>) {
    assert_eq!(reader.len(), 7);
    assert_eq!(reader.read_u16().unwrap(), 42);
    assert_eq!(reader.read_utf().unwrap(), "abc");
    assert!(reader.read_u8().is_err());
}

#[test]
fn borrowed_slice() {
    let bytes = record();
    assert_record(&mut Reader::new(&bytes));
}

#[test]
fn owned_vec() {
    let mut reader = Reader::from(record());
    assert!(matches!(reader.source(), Source::Shared(_)));
    assert_record(&mut reader);
}

#[test]
fn shared_bytes() {
    let bytes = Bytes::from(record());
    let mut reader = Reader::from(bytes.clone());
    assert_eq!(reader.source().as_ptr(), bytes.as_ptr());
    assert_record(&mut reader);
}

#[test]
fn segmented_input() {
    let bytes = record();
    let (head, tail) = bytes.split_at(3);
    let mut reader = Reader::from_segments(&[head, &[], tail]);
    assert_record(&mut reader);
}

#[test]
fn ring_buffer() {
    let mut deque = VecDeque::with_capacity(8);
    deque.extend([0xee; 5]);
    deque.drain(..5);
    deque.extend(record());
    let mut reader = Reader::from_source(&deque).unwrap();
    assert_record(&mut reader);
}

#[test]
fn drained_stream() {
    let mut reader = Reader::from_stream(io::Cursor::new(record())).unwrap();
    assert_record(&mut reader);

    let mut drained = Reader::from_source(Drain(io::Cursor::new(record()))).unwrap();
    assert_record(&mut drained);
}

#[test]
fn failing_stream_surfaces_io_error() {
    struct Broken;

    impl io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("boom"))
        }
    }

    let err = Reader::from_stream(Broken).unwrap_err();
    assert!(matches!(err, bytecursor::Error::Io(_)));
}

#[test]
fn read_memory_slices_without_copying() {
    let mut reader = Reader::from(Bytes::from(record()));
    reader.read_u16().unwrap();
    let region = reader.read_memory(5).unwrap();
    drop(reader);
    assert_eq!(&region[2..], b"abc");
}

#[test]
fn lossy_policy_applies_to_every_source() {
    let options = ReaderOptions {
        utf8: Utf8Policy::Lossy,
    };
    let mut reader = Reader::from(vec![2, 0, 0xc3, 0x28]).with_options(options);
    assert_eq!(reader.read_utf().unwrap(), "\u{fffd}(");
}
