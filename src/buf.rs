//! The buffer itself: one growable byte store, one cursor.

use core::cmp::Ordering;

use crate::err::{OffsetErr, ReadErr, SeekErr};

/// Reference point for a seek.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Whence {
	Start,
	Current,
	End,
}

impl Whence {
	/// Decode the conventional integer encoding (lseek et al):
	/// 0 = start, 1 = current, 2 = end. Anything else is rejected, never
	/// defaulted.
	pub fn from_raw(raw: i64) -> Result<Self, SeekErr> {
		match raw {
			0 => Ok(Whence::Start),
			1 => Ok(Whence::Current),
			2 => Ok(Whence::End),
			_ => Err(SeekErr::UnknownWhence(raw)),
		}
	}
}

/// A growable in-memory byte buffer with a seekable cursor.
///
/// `pos <= storage.len()` holds before and after every public operation,
/// and a failed operation leaves both fields exactly as they were.
#[derive(Debug, Default)]
pub struct Buf {
	storage: Vec<u8>,
	pos: usize,
}

impl Buf {
	/// A buffer of `size` zero bytes with the cursor at 0. A size of
	/// zero is fine; the storage grows on demand.
	pub fn new(size: usize) -> Self {
		Self { storage: vec![0; size], pos: 0 }
	}

	/// Throw away all content and reallocate to `size` zero bytes, with
	/// the cursor back at 0.
	pub fn reset(&mut self, size: usize) {
		self.storage = vec![0; size];
		self.pos = 0;
	}

	pub fn clear(&mut self) {
		self.reset(0);
	}

	#[inline]
	pub fn size(&self) -> usize {
		self.storage.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.storage.is_empty()
	}

	/// Current cursor position.
	#[inline]
	pub fn pos(&self) -> usize {
		self.pos
	}

	#[inline]
	pub fn as_slice(&self) -> &[u8] {
		&self.storage
	}

	/// A fresh copy of the contents.
	pub fn to_vec(&self) -> Vec<u8> {
		self.storage.clone()
	}

	/// Move the cursor. Returns the new position.
	///
	/// Only existing bytes can be addressed: the valid target range is
	/// `[0, size)`, so an empty buffer has no valid target, and the
	/// cursor can reach `size` itself only by writing.
	pub fn seek(
		&mut self,
		offset: i64,
		whence: Whence,
	) -> Result<usize, SeekErr> {
		let target = match whence {
			Whence::Start => Some(offset),
			Whence::Current => (self.pos as i64).checked_add(offset),
			Whence::End => (self.size() as i64).checked_add(offset),
		};

		let target = match target {
			Some(t) if t < 0 => return Err(SeekErr::Negative(t)),
			Some(t) => t as usize,
			// past i64 entirely, so necessarily past the end
			None => usize::MAX,
		};

		if target >= self.size() {
			return Err(SeekErr::Overflow { target, size: self.size() });
		}

		self.pos = target;
		Ok(target)
	}

	/// [`Buf::seek`] with the raw 0/1/2 whence encoding.
	pub fn seek_raw(
		&mut self,
		offset: i64,
		whence: i64,
	) -> Result<usize, SeekErr> {
		self.seek(offset, Whence::from_raw(whence)?)
	}

	pub fn seek_from_start(&mut self, offset: i64) -> Result<usize, SeekErr> {
		self.seek(offset, Whence::Start)
	}

	pub fn seek_from_current(
		&mut self,
		offset: i64,
	) -> Result<usize, SeekErr> {
		self.seek(offset, Whence::Current)
	}

	pub fn seek_from_end(&mut self, offset: i64) -> Result<usize, SeekErr> {
		self.seek(offset, Whence::End)
	}

	pub fn seek_to_start(&mut self) -> Result<usize, SeekErr> {
		self.seek(0, Whence::Start)
	}

	pub fn seek_to_end(&mut self) -> Result<usize, SeekErr> {
		self.seek(0, Whence::End)
	}

	/// Shared by the sequential and positional reads. `pos` must already
	/// be within `[0, storage.len()]`.
	fn copy_out(
		storage: &[u8],
		dst: &mut [u8],
		pos: usize,
	) -> Result<usize, ReadErr> {
		let avail = storage.len() - pos;
		if avail == 0 {
			return Err(ReadErr::EndOfData { read: 0 });
		}

		let n = avail.min(dst.len());
		dst[..n].copy_from_slice(&storage[pos..pos + n]);

		if n < dst.len() {
			// Fewer bytes left than the destination wanted. What was
			// copied is still good; the count rides in the error.
			return Err(ReadErr::EndOfData { read: n });
		}

		Ok(n)
	}

	/// Read from the cursor into `dst`, advancing the cursor by however
	/// many bytes were copied - including on a partial read.
	pub fn read(&mut self, dst: &mut [u8]) -> Result<usize, ReadErr> {
		let res = Self::copy_out(&self.storage, dst, self.pos);
		if let Ok(n) | Err(ReadErr::EndOfData { read: n }) = res {
			self.pos += n;
		}
		res
	}

	/// Read at `offset` without touching the cursor. Any number of
	/// positional reads may run at once, provided no write is
	/// interleaved.
	pub fn read_at(
		&self,
		dst: &mut [u8],
		offset: i64,
	) -> Result<usize, ReadErr> {
		let pos = self.check_offset(offset)?;
		Self::copy_out(&self.storage, dst, pos)
	}

	/// One byte from the cursor.
	pub fn read_byte(&mut self) -> Result<u8, ReadErr> {
		let mut b = [0u8; 1];
		let n = self.read(&mut b)?;
		if n != 1 {
			return Err(ReadErr::ByteRead);
		}
		Ok(b[0])
	}

	/// One byte at `offset`, cursor untouched. Much like indexing.
	pub fn byte_at(&self, offset: i64) -> Result<u8, ReadErr> {
		let mut b = [0u8; 1];
		let n = self.read_at(&mut b, offset)?;
		if n != 1 {
			return Err(ReadErr::ByteRead);
		}
		Ok(b[0])
	}

	fn check_offset(&self, offset: i64) -> Result<usize, OffsetErr> {
		if offset < 0 {
			return Err(OffsetErr::Negative(offset));
		}
		let offset = offset as usize;
		if offset >= self.size() {
			return Err(OffsetErr::Overflow { offset, size: self.size() });
		}
		Ok(offset)
	}

	/// Overwrite-then-grow primitive shared by `write` and `write_at`.
	/// The part of `src` that lands within the buffer overwrites in
	/// place; the rest appends. Returns the appended count; the whole of
	/// `src` lands either way.
	fn splice_in(&mut self, src: &[u8], pos: usize) -> usize {
		let overlap = (self.size() - pos).min(src.len());
		let appended = src.len() - overlap;

		if overlap > 0 {
			self.storage[pos..pos + overlap]
				.copy_from_slice(&src[..overlap]);
		}
		if appended > 0 {
			self.storage.extend_from_slice(&src[overlap..]);
		}

		appended
	}

	/// Write at the cursor. Returns the total bytes written, which is
	/// always `src.len()` - growth is unbounded and running out of
	/// memory aborts rather than reports.
	///
	/// The cursor advances by the *appended* count only: a write landing
	/// entirely inside existing storage does not move it. This is a
	/// deliberate contract, not a bug to fix.
	pub fn write(&mut self, src: &[u8]) -> usize {
		let appended = self.splice_in(src, self.pos);
		self.pos += appended;
		src.len()
	}

	/// Write at `offset`, which must address an existing byte. On
	/// success the cursor lands at `offset` plus the appended count,
	/// the same advance-by-growth rule as [`Buf::write`].
	pub fn write_at(
		&mut self,
		src: &[u8],
		offset: i64,
	) -> Result<usize, OffsetErr> {
		let pos = self.check_offset(offset)?;
		let appended = self.splice_in(src, pos);
		self.pos = pos + appended;
		Ok(src.len())
	}

	/// Append one byte at the true end, wherever the cursor is, and
	/// leave the cursor on the new end.
	pub fn write_byte(&mut self, b: u8) {
		self.storage.push(b);
		self.pos = self.storage.len();
	}
}

impl Clone for Buf {
	/// Deep copy of the contents. The clone's cursor starts at 0; the
	/// source cursor is not preserved.
	fn clone(&self) -> Self {
		Self { storage: self.storage.clone(), pos: 0 }
	}
}

impl PartialEq for Buf {
	fn eq(&self, other: &Self) -> bool {
		self.storage == other.storage
	}
}

impl Eq for Buf {}

impl Ord for Buf {
	/// Lexicographic over the contents only; cursors never participate.
	fn cmp(&self, other: &Self) -> Ordering {
		self.storage.cmp(&other.storage)
	}
}

impl PartialOrd for Buf {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::arb_bytes;
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	#[test]
	fn fresh_buffer() {
		let b = Buf::new(16);
		assert_eq!(b.size(), 16);
		assert_eq!(b.pos(), 0);
		assert_eq!(b.to_vec(), vec![0; 16]);
		assert!(!b.is_empty());
		assert!(Buf::new(0).is_empty());
	}

	#[test]
	fn reset_discards_everything() {
		let mut b = Buf::new(0);
		b.write(b"some bytes");
		b.seek_from_start(3).unwrap();

		b.reset(4);
		assert_eq!(b.size(), 4);
		assert_eq!(b.pos(), 0);
		assert_eq!(b.as_slice(), &[0, 0, 0, 0]);

		b.clear();
		assert_eq!(b.size(), 0);
		assert_eq!(b.pos(), 0);
	}

	#[test]
	fn ordering_ignores_cursors() {
		let mut a = Buf::new(0);
		a.write(b"abc");
		let mut b = Buf::new(0);
		b.write(b"abd");
		b.seek_to_start().unwrap();

		assert!(a < b);
		assert_eq!(a.cmp(&a.clone()), Ordering::Equal);

		// a proper prefix compares less
		let mut c = Buf::new(0);
		c.write(b"ab");
		assert!(c < a);
	}

	#[test]
	fn clone_is_deep_and_rewound() {
		let mut b = Buf::new(0);
		b.write(b"hello");
		b.seek_from_start(2).unwrap();

		let mut c = b.clone();
		assert_eq!(c.pos(), 0);
		assert_eq!(c.as_slice(), b"hello");

		c.write_byte(b'!');
		assert_eq!(b.as_slice(), b"hello");
		assert_eq!(c.as_slice(), b"hello!");
	}

	#[test]
	fn seek_bounds() {
		let mut b = Buf::new(8);
		assert_eq!(b.seek_from_start(-1), Err(SeekErr::Negative(-1)));
		assert_eq!(b.pos(), 0);
		assert_eq!(
			b.seek_from_start(8),
			Err(SeekErr::Overflow { target: 8, size: 8 })
		);
		assert_eq!(b.pos(), 0);

		assert_eq!(b.seek_from_start(5), Ok(5));
		assert_eq!(b.seek_from_current(-2), Ok(3));
		assert_eq!(b.seek_from_end(-1), Ok(7));
		assert_eq!(b.seek_to_start(), Ok(0));
	}

	#[test]
	fn seek_to_end_is_one_past_the_last_valid_target() {
		let mut b = Buf::new(4);
		assert_eq!(
			b.seek_to_end(),
			Err(SeekErr::Overflow { target: 4, size: 4 })
		);
		assert_eq!(b.pos(), 0);
	}

	#[test]
	fn empty_buffer_has_no_valid_seek_target() {
		let mut b = Buf::new(0);
		assert_eq!(
			b.seek_to_start(),
			Err(SeekErr::Overflow { target: 0, size: 0 })
		);
	}

	#[test]
	fn huge_seek_offsets_report_overflow() {
		let mut b = Buf::new(8);
		b.seek_from_start(1).unwrap();

		// additions that would not even fit in i64 are still overflows,
		// reported rather than panicking
		assert!(matches!(
			b.seek_from_current(i64::MAX),
			Err(SeekErr::Overflow { .. })
		));
		assert!(matches!(
			b.seek_from_end(i64::MAX),
			Err(SeekErr::Overflow { .. })
		));
		assert!(matches!(
			b.seek_from_start(i64::MAX),
			Err(SeekErr::Overflow { .. })
		));
		assert_eq!(b.pos(), 1);
	}

	#[test]
	fn unknown_whence_is_rejected() {
		let mut b = Buf::new(8);
		assert_eq!(b.seek_raw(0, 3), Err(SeekErr::UnknownWhence(3)));
		assert_eq!(b.seek_raw(0, -1), Err(SeekErr::UnknownWhence(-1)));
		assert_eq!(b.pos(), 0);
		assert_eq!(b.seek_raw(2, 0), Ok(2));
	}

	#[test]
	fn read_past_end_keeps_the_partial_count() {
		let mut b = Buf::new(0);
		b.write(b"abcdef");
		b.seek_from_start(4).unwrap();

		let mut dst = [0u8; 4];
		assert_eq!(b.read(&mut dst), Err(ReadErr::EndOfData { read: 2 }));
		assert_eq!(&dst[..2], b"ef");
		// partial reads still advance
		assert_eq!(b.pos(), 6);

		assert_eq!(b.read(&mut dst), Err(ReadErr::EndOfData { read: 0 }));
		assert_eq!(b.pos(), 6);
	}

	#[test]
	fn read_at_leaves_the_cursor_alone() {
		let mut b = Buf::new(0);
		b.write(b"abcdef");
		b.seek_from_start(1).unwrap();

		let mut dst = [0u8; 3];
		assert_eq!(b.read_at(&mut dst, 2), Ok(3));
		assert_eq!(&dst, b"cde");
		assert_eq!(b.pos(), 1);

		assert_eq!(
			b.read_at(&mut dst, -1),
			Err(ReadErr::Offset(OffsetErr::Negative(-1)))
		);
		assert_eq!(
			b.read_at(&mut dst, 6),
			Err(ReadErr::Offset(OffsetErr::Overflow { offset: 6, size: 6 }))
		);
		assert_eq!(b.pos(), 1);
	}

	#[test]
	fn byte_ops() {
		let mut b = Buf::new(0);
		b.write(b"xy");
		b.seek_to_start().unwrap();

		assert_eq!(b.read_byte(), Ok(b'x'));
		assert_eq!(b.read_byte(), Ok(b'y'));
		assert_eq!(b.read_byte(), Err(ReadErr::EndOfData { read: 0 }));

		assert_eq!(b.byte_at(1), Ok(b'y'));
		assert_eq!(
			b.byte_at(2),
			Err(ReadErr::Offset(OffsetErr::Overflow { offset: 2, size: 2 }))
		);
		assert_eq!(b.pos(), 2);
	}

	#[test]
	fn overlap_write_overwrites_then_appends() {
		let mut b = Buf::new(0);
		b.write(b"abcdef");
		b.seek_from_start(3).unwrap();

		assert_eq!(b.write(b"abcdef"), 6);
		assert_eq!(b.as_slice(), b"abcabcdef");
		assert_eq!(b.pos(), 6);
	}

	#[test]
	fn in_bounds_write_does_not_move_the_cursor() {
		let mut b = Buf::new(0);
		b.write(b"abcdef");
		b.seek_from_start(1).unwrap();

		assert_eq!(b.write(b"XY"), 2);
		assert_eq!(b.as_slice(), b"aXYdef");
		assert_eq!(b.pos(), 1);
	}

	#[test]
	fn write_at_lands_the_cursor_after_the_growth() {
		let mut b = Buf::new(0);
		b.write(b"abcdef");
		b.seek_to_start().unwrap();

		assert_eq!(b.write_at(b"WXYZ", 4), Ok(4));
		assert_eq!(b.as_slice(), b"abcdWXYZ");
		// offset 4 + 2 appended
		assert_eq!(b.pos(), 6);

		assert_eq!(b.write_at(b"!", -1), Err(OffsetErr::Negative(-1)));
		assert_eq!(
			b.write_at(b"!", 8),
			Err(OffsetErr::Overflow { offset: 8, size: 8 })
		);
		assert_eq!(b.pos(), 6);
	}

	#[test]
	fn write_byte_always_appends() {
		let mut b = Buf::new(0);
		b.write(b"abc");
		b.seek_to_start().unwrap();

		b.write_byte(b'd');
		assert_eq!(b.as_slice(), b"abcd");
		assert_eq!(b.pos(), 4);
	}

	proptest! {
		#[test]
		fn new_buffer_is_zeroed(size in 0usize..1024) {
			let b = Buf::new(size);
			assert_eq!(b.size(), size);
			assert_eq!(b.pos(), 0);
			assert!(b.as_slice().iter().all(|&x| x == 0));
		}

		#[test]
		fn write_seek_read_round_trip(s in arb_bytes(256)) {
			prop_assume!(!s.is_empty());
			let mut b = Buf::new(0);
			assert_eq!(b.write(&s), s.len());
			b.seek_to_start().unwrap();

			let mut out = vec![0; s.len()];
			assert_eq!(b.read(&mut out), Ok(s.len()));
			assert_eq!(out, s);
		}

		#[test]
		fn comparison_matches_the_byte_ordering(
			xs in arb_bytes(64),
			ys in arb_bytes(64),
		) {
			let mut a = Buf::new(0);
			a.write(&xs);
			let mut b = Buf::new(0);
			b.write(&ys);

			assert_eq!(a.cmp(&b), xs.cmp(&ys));
			assert_eq!(a.clone().cmp(&a), Ordering::Equal);
		}
	}
}
