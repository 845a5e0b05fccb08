#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use bytecursor::{BinaryRead, Reader, ReaderOptions, Seek, Utf8Policy};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    U8,
    I16,
    U32,
    I64,
    F64,
    Bool,
    Span(u16),
    Memory(u16),
    Text(u16),
    Utf,
    Seek(SeekOp),
}

#[derive(Debug, Arbitrary)]
enum SeekOp {
    Begin(u16),
    Current(i16),
    End(u16),
}

impl From<&SeekOp> for Seek {
    fn from(op: &SeekOp) -> Self {
        match *op {
            SeekOp::Begin(n) => Seek::Begin(usize::from(n)),
            SeekOp::Current(n) => Seek::Current(isize::from(n)),
            SeekOp::End(n) => Seek::End(usize::from(n)),
        }
    }
}

fn run(data: &[u8]) -> arbitrary::Result<()> {
    let mut u = Unstructured::new(data);
    let lossy: bool = u.arbitrary()?;
    let ops: Vec<Op> = u.arbitrary()?;
    let source = u.take_rest();

    let utf8 = if lossy { Utf8Policy::Lossy } else { Utf8Policy::Strict };
    let mut reader = Reader::new(source).with_options(ReaderOptions { utf8 });

    for op in &ops {
        let before = reader.position();
        let ok = match op {
            Op::U8 => reader.read_u8().is_ok(),
            Op::I16 => reader.read_i16().is_ok(),
            Op::U32 => reader.read_u32().is_ok(),
            Op::I64 => reader.read_i64().is_ok(),
            Op::F64 => reader.read_f64().is_ok(),
            Op::Bool => reader.read_bool().is_ok(),
            Op::Span(n) => reader.read_span(usize::from(*n)).is_ok(),
            Op::Memory(n) => reader
                .read_memory(usize::from(*n))
                .is_ok_and(|region| region.len() == usize::from(*n)),
            Op::Text(n) => reader.read_string(usize::from(*n)).is_ok(),
            Op::Utf => reader.read_utf().is_ok(),
            Op::Seek(seek) => {
                let ok = reader.seek(seek.into()).is_ok();
                assert!(ok || reader.position() == before, "failed seek moved the cursor");
                continue;
            }
        };
        if ok {
            assert!(reader.position() > before || matches!(op, Op::Span(0) | Op::Memory(0) | Op::Text(0)));
            assert!(reader.position() <= reader.len());
        } else {
            assert_eq!(reader.position(), before, "failed read moved the cursor");
        }
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = run(data);
});
