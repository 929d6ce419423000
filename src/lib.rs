//! Seekbuf is an in-memory byte buffer that behaves like a seekable
//! stream: one growable backing store, one cursor.
//!
//! The following implementation notes may be useful:
//! - A [`Buf`] *is* the cursor-plus-storage invariant; everything else is
//!   a method layered on it.
//! - Seeking addresses existing bytes only. Growing the buffer is the
//!   writer's job.
//! - A write overwrites in place for the part that lands inside the
//!   buffer and appends the rest; the cursor advances by the appended
//!   count only.
//! - Positional reads take `&self` and never touch the cursor.
//! - Generic consumers go through `std::io::{Read, Write, Seek}` or the
//!   narrow capability traits in [`cap`].

// Offsets travel as i64 and positions as usize; the conversions between
// the two are lossless only when usize is 64 bits wide.
#[cfg(not(target_pointer_width = "64"))]
compile_error!("code assumes usize is u64");

mod buf;
pub mod cap;
mod err;
mod stream;
#[cfg(test)]
mod test_utils;
pub mod varint;

pub use buf::{Buf, Whence};
pub use cap::{ReadAt, ReadByte, WriteAt, WriteByte};
pub use err::{OffsetErr, ReadErr, SeekErr};
