//! Narrow capability traits, one per I/O shape, so generic consumers can
//! depend on exactly the capability they need instead of the concrete
//! buffer. The sequential capabilities are the standard ones -
//! `std::io::{Read, Write, Seek}` - implemented in the stream module.

use crate::buf::Buf;
use crate::err::{OffsetErr, ReadErr};

/// Positional reads. These never move a cursor, so any number of holders
/// may read at once, provided no write is interleaved.
pub trait ReadAt {
	fn read_at(&self, dst: &mut [u8], offset: i64) -> Result<usize, ReadErr>;
}

/// Positional writes. The offset must address an existing byte.
pub trait WriteAt {
	fn write_at(
		&mut self,
		src: &[u8],
		offset: i64,
	) -> Result<usize, OffsetErr>;
}

/// One byte at a time, sequentially. This is all the varint decoder
/// needs.
pub trait ReadByte {
	fn read_byte(&mut self) -> Result<u8, ReadErr>;
}

/// Append one byte. Infallible; growth that cannot be satisfied aborts.
pub trait WriteByte {
	fn write_byte(&mut self, b: u8);
}

impl ReadAt for Buf {
	fn read_at(&self, dst: &mut [u8], offset: i64) -> Result<usize, ReadErr> {
		Buf::read_at(self, dst, offset)
	}
}

impl WriteAt for Buf {
	fn write_at(
		&mut self,
		src: &[u8],
		offset: i64,
	) -> Result<usize, OffsetErr> {
		Buf::write_at(self, src, offset)
	}
}

impl ReadByte for Buf {
	fn read_byte(&mut self) -> Result<u8, ReadErr> {
		Buf::read_byte(self)
	}
}

impl WriteByte for Buf {
	fn write_byte(&mut self, b: u8) {
		Buf::write_byte(self, b)
	}
}
