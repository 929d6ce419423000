//! Errors for every fallible buffer operation.
//!
//! All of these are recoverable and reported to the immediate caller;
//! the only fatal condition is allocation failure during growth, which
//! aborts. They are rich rather than flat: a failed bounds check carries
//! the offsets involved, and a partial read carries its count. A failed
//! operation never mutates the buffer.

use derive_more::Display;

/// An offset handed to a positional read or write was outside the
/// buffer. The valid range is `[0, size)`.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum OffsetErr {
	#[display(fmt = "negative offset {}", _0)]
	Negative(i64),
	#[display(fmt = "offset {} overflows buffer of {} bytes", offset, size)]
	Overflow { offset: usize, size: usize },
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum SeekErr {
	/// The raw whence value was not one of 0 (start), 1 (current),
	/// 2 (end).
	#[display(fmt = "unknown whence value {}", _0)]
	UnknownWhence(i64),
	#[display(fmt = "negative seek target {}", _0)]
	Negative(i64),
	/// Seek targets address existing bytes only, so the valid range is
	/// `[0, size)` and an empty buffer has no valid target at all.
	#[display(fmt = "seek target {} overflows buffer of {} bytes", target, size)]
	Overflow { target: usize, size: usize },
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum ReadErr {
	/// The read ran off the end of the available bytes. `read` is the
	/// count copied out before the end was hit; those bytes are good and
	/// callers must still consume them.
	#[display(fmt = "end of data after {} bytes", read)]
	EndOfData { read: usize },
	#[display(fmt = "{}", _0)]
	Offset(OffsetErr),
	/// A one-byte read came back with a count other than one and no
	/// better error to explain it.
	#[display(fmt = "error reading byte")]
	ByteRead,
	/// The encoding ran past ten bytes, or its last group carried bits
	/// beyond the 64th.
	#[display(fmt = "varint overflows a 64-bit integer")]
	VarintOverflow,
}

impl From<OffsetErr> for ReadErr {
	fn from(e: OffsetErr) -> Self {
		ReadErr::Offset(e)
	}
}

impl std::error::Error for OffsetErr {}
impl std::error::Error for SeekErr {}

impl std::error::Error for ReadErr {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			ReadErr::Offset(e) => Some(e),
			_ => None,
		}
	}
}
