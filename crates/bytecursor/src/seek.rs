use crate::{Error, Result};

/// Where a cursor moves to.
///
/// `End(n)` counts `n` bytes back from the end, exclusive of the final
/// byte: `End(0)` is one past the last byte and `End(1)` addresses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seek {
    /// Absolute offset from the start.
    Begin(usize),
    /// Signed offset from the current position.
    Current(isize),
    /// Offset counted backward from the end.
    End(usize),
}

impl Seek {
    /// Resolve against a cursor at `position` over `len` bytes.
    ///
    /// Only targets below zero are rejected; a target past `len` is returned
    /// as is and left for the caller to handle.
    pub(crate) fn resolve(self, position: usize, len: usize) -> Result<usize> {
        let target = match self {
            Seek::Begin(offset) => return Ok(offset),
            Seek::Current(offset) => position as i128 + offset as i128,
            Seek::End(offset) => len as i128 - offset as i128,
        };
        usize::try_from(target).map_err(|_| Error::SeekOutOfRange { target })
    }
}

#[cfg(test)]
mod tests {
    use super::Seek;
    use crate::Error;

    #[test]
    fn end_is_exclusive() {
        assert_eq!(Seek::End(0).resolve(3, 10).unwrap(), 10);
        assert_eq!(Seek::End(1).resolve(3, 10).unwrap(), 9);
    }

    #[test]
    fn current_may_overshoot_but_not_underflow() {
        assert_eq!(Seek::Current(20).resolve(3, 10).unwrap(), 23);
        assert!(matches!(
            Seek::Current(-4).resolve(3, 10),
            Err(Error::SeekOutOfRange { target: -1 })
        ));
        assert!(matches!(
            Seek::End(11).resolve(0, 10),
            Err(Error::SeekOutOfRange { target: -1 })
        ));
    }
}
