#![no_main]

use arbitrary::Arbitrary;
use bytecursor::{BinaryRead, BinaryWrite, BufferPool, PoolConfig, Reader, Seek, Writer, WriterOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Bytes(Vec<u8>),
    Fill(u8, u16),
    U32(u32),
    F32(f32),
    Utf(String),
    Back(u16),
    Forward(u16),
    Dispose,
}

#[derive(Debug, Arbitrary)]
struct Input {
    max_capacity: Option<u16>,
    ops: Vec<Op>,
}

/// Drive a writer and a plain `Vec` model side by side.
fn run(input: &Input) {
    let pool = BufferPool::with_config(PoolConfig::new().max_bucket(1 << 12).buffers_per_bucket(2));
    let mut options = WriterOptions::default();
    if let Some(max) = input.max_capacity {
        options.max_capacity = usize::from(max);
    }
    let mut writer = Writer::with_pool(pool.clone()).with_options(options);
    let mut model: Vec<u8> = Vec::new();
    let mut position = 0usize;

    for op in &input.ops {
        let (written, bytes) = match op {
            Op::Bytes(bytes) => (writer.write_span(bytes), bytes.clone()),
            Op::Fill(byte, n) => {
                let fill = vec![*byte; usize::from(*n)];
                (writer.write_memory(&fill), fill)
            }
            Op::U32(v) => (writer.write_u32(*v), v.to_le_bytes().to_vec()),
            Op::F32(v) => (writer.write_f32(*v), v.to_bits().to_le_bytes().to_vec()),
            Op::Utf(text) => {
                let before = writer.position();
                if writer.write_utf(text).is_ok() {
                    let mut framed = u16::try_from(text.len()).unwrap().to_le_bytes().to_vec();
                    framed.extend_from_slice(text.as_bytes());
                    overwrite(&mut model, &mut position, &framed);
                } else {
                    assert_eq!(writer.position(), before);
                }
                writer.assert_invariants();
                continue;
            }
            Op::Back(n) => {
                let back = usize::from(*n).min(position);
                position = writer.seek(Seek::Current(-(back as isize))).unwrap();
                writer.assert_invariants();
                continue;
            }
            Op::Forward(n) => {
                if writer.seek(Seek::Begin(position + usize::from(*n))).is_ok() {
                    position += usize::from(*n);
                    if model.len() < position {
                        model.resize(position, 0);
                    }
                }
                writer.assert_invariants();
                continue;
            }
            Op::Dispose => {
                writer.dispose();
                model.clear();
                position = 0;
                writer.assert_invariants();
                continue;
            }
        };
        if written.is_ok() {
            overwrite(&mut model, &mut position, &bytes);
        }
        assert_eq!(writer.position(), position);
        writer.assert_invariants();
    }

    assert_eq!(writer.buffer(), model.as_slice());
    let mut reader = Reader::new(writer.buffer());
    assert_eq!(reader.read_span(model.len()).unwrap(), model.as_slice());
    drop(writer);
    assert_eq!(pool.stats().outstanding(), 0);
}

fn overwrite(model: &mut Vec<u8>, position: &mut usize, bytes: &[u8]) {
    let end = *position + bytes.len();
    if model.len() < end {
        model.resize(end, 0);
    }
    model[*position..end].copy_from_slice(bytes);
    *position = end;
}

fuzz_target!(|input: Input| run(&input));
