//! `std::io` interop, so a [`Buf`] plugs into anything written against
//! the standard sequential traits - copy loops, `BufReader`, adapters.

use std::io;

use crate::buf::{Buf, Whence};
use crate::err::{ReadErr, SeekErr};

impl io::Read for Buf {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		match Buf::read(self, buf) {
			Ok(n) => Ok(n),
			// Partial and empty reads map onto the Ok(n) / Ok(0)-at-EOF
			// convention.
			Err(ReadErr::EndOfData { read }) => Ok(read),
			Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
		}
	}
}

impl io::Write for Buf {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		Ok(Buf::write(self, buf))
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl io::Seek for Buf {
	fn seek(&mut self, from: io::SeekFrom) -> io::Result<u64> {
		let (offset, whence) = match from {
			io::SeekFrom::Start(n) => match i64::try_from(n) {
				Ok(offset) => (offset, Whence::Start),
				// past i64 entirely, so necessarily past the end
				Err(_) => {
					return Err(io::Error::new(
						io::ErrorKind::InvalidInput,
						SeekErr::Overflow {
							target: n as usize,
							size: self.size(),
						},
					))
				}
			},
			io::SeekFrom::Current(n) => (n, Whence::Current),
			io::SeekFrom::End(n) => (n, Whence::End),
		};
		Buf::seek(self, offset, whence)
			.map(|pos| pos as u64)
			.map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
	}
}
