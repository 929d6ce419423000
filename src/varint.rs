//! Unsigned varints: little-endian base-128, seven payload bits per
//! byte, continuation bit on everything but the last group.

use crate::buf::Buf;
use crate::cap::ReadByte;
use crate::err::ReadErr;

/// A 64-bit value needs at most ten groups of seven bits.
pub const MAX_LEN: usize = 10;

/// Encode `x` into `dst`, least-significant group first. Returns the
/// number of bytes used.
pub fn encode(mut x: u64, dst: &mut [u8; MAX_LEN]) -> usize {
	let mut i = 0;
	while x >= 0x80 {
		dst[i] = x as u8 | 0x80;
		x >>= 7;
		i += 1;
	}
	dst[i] = x as u8;
	i + 1
}

/// Decode one varint from any byte reader. A sequence cut short
/// surfaces whatever error the reader reports; an encoding that does
/// not fit in 64 bits fails with `VarintOverflow`.
pub fn decode<R: ReadByte + ?Sized>(r: &mut R) -> Result<u64, ReadErr> {
	let mut x = 0u64;
	let mut shift = 0u32;

	for i in 0..MAX_LEN {
		let b = r.read_byte()?;
		if b < 0x80 {
			if i == MAX_LEN - 1 && b > 1 {
				return Err(ReadErr::VarintOverflow);
			}
			return Ok(x | u64::from(b) << shift);
		}
		x |= u64::from(b & 0x7f) << shift;
		shift += 7;
	}

	Err(ReadErr::VarintOverflow)
}

impl Buf {
	/// Encode `x` at the cursor via [`Buf::write`]; the usual
	/// advance-by-growth cursor rule applies. Returns the encoded size.
	pub fn write_uvarint(&mut self, x: u64) -> usize {
		let mut tmp = [0u8; MAX_LEN];
		let n = encode(x, &mut tmp);
		self.write(&tmp[..n])
	}

	/// Decode one varint starting at the cursor.
	pub fn read_uvarint(&mut self) -> Result<u64, ReadErr> {
		decode(self)
	}
}
