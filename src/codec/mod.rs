//! Order-preserving codecs.
//!
//! Every codec implements [`Codec`] for a single value type. The encoded bytes of
//! two values compare, as unsigned byte strings, in the same order as the values
//! themselves (or in the reverse order, for [`Negate`]).

use std::io::{ErrorKind, Read, Write};

use crate::err::{Error, Result};

pub mod bigfloat;
pub mod bigint;
pub mod bytes;
pub mod convert;
pub mod escape;
pub mod float;
pub mod negate;
pub mod num;
pub mod option;
pub mod prefix;
pub mod rational;
pub mod seq;

pub use bigfloat::BigFloatCodec;
pub use bigint::BigInt;
pub use bytes::{Bytes, Str};
pub use convert::Convert;
pub use escape::Terminate;
pub use float::{Float32, Float64};
pub use negate::Negate;
pub use num::{Bool, Int8, Int16, Int32, Int64, Int128, Uint8, Uint16, Uint32, Uint64, Uint128};
pub use option::Nullable;
pub use prefix::NilOrder;
pub use rational::BigRational;
pub use seq::Seq;

/// An order-preserving encoding of values of type `T`.
///
/// Codecs are immutable once constructed, and can be shared freely between
/// threads as long as any codecs they delegate to can be.
pub trait Codec<T> {
	/// Push the encoding of `value` onto the end of the buffer.
	///
	/// Bytes already present in the buffer are left untouched.
	fn append(&self, buf: &mut Vec<u8>, value: &T) -> Result<()>;

	/// Decode a value from the front of the buffer.
	///
	/// Returns the value along with the number of bytes consumed.
	fn get(&self, buf: &[u8]) -> Result<(T, usize)>;

	/// Read exactly one encoded value from a byte source.
	///
	/// Returns [`Error::Eof`] if the source was empty, and
	/// [`Error::UnexpectedEof`] if it ended part way through a value. The
	/// source may have been advanced when an error is returned.
	fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<T>;

	/// Whether an encoding produced by this codec can be a proper prefix of
	/// another encoding produced by the same codec.
	///
	/// Composite codecs must frame the output of any codec which returns true
	/// before concatenating more than one of them.
	fn requires_terminator(&self) -> bool;

	/// Write the encoding of `value` to a byte sink.
	fn write<W: Write + ?Sized>(&self, w: &mut W, value: &T) -> Result<()> {
		let mut buf = Vec::new();
		self.append(&mut buf, value)?;
		w.write_all(&buf)?;
		Ok(())
	}

	/// Encode a value into a new buffer.
	fn encode(&self, value: &T) -> Result<Vec<u8>> {
		let mut buf = Vec::new();
		self.append(&mut buf, value)?;
		Ok(buf)
	}

	/// Decode a value which must occupy the whole buffer.
	fn decode(&self, buf: &[u8]) -> Result<T> {
		let (value, n) = self.get(buf)?;
		match buf.len() - n {
			0 => Ok(value),
			rest => Err(Error::TrailingBytes(rest)),
		}
	}
}

/// Split `n` bytes off the front of the buffer.
pub(crate) fn take(buf: &[u8], n: usize) -> Result<(&[u8], &[u8])> {
	if buf.len() >= n {
		Ok(buf.split_at(n))
	} else if buf.is_empty() {
		Err(Error::Eof)
	} else {
		Err(Error::UnexpectedEof)
	}
}

/// Fill the buffer from the reader, distinguishing a source which was already
/// exhausted from one which ran out part way through.
pub(crate) fn read_full<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> Result<()> {
	let mut filled = 0;
	while filled < buf.len() {
		match r.read(&mut buf[filled..]) {
			Ok(0) if filled == 0 => return Err(Error::Eof),
			Ok(0) => return Err(Error::UnexpectedEof),
			Ok(n) => filled += n,
			Err(e) if e.kind() == ErrorKind::Interrupted => continue,
			Err(e) => return Err(e.into()),
		}
	}
	Ok(())
}

/// Read a single byte from the reader.
pub(crate) fn read_byte<R: Read + ?Sized>(r: &mut R) -> Result<u8> {
	let mut b = [0u8; 1];
	read_full(r, &mut b)?;
	Ok(b[0])
}

/// Read the remainder of the reader, up to `limit` bytes.
pub(crate) fn read_rest<R: Read + ?Sized>(r: &mut R, limit: usize) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	// One byte past the limit is enough to detect an oversize value
	let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
	r.take(cap).read_to_end(&mut out)?;
	if out.len() > limit {
		return Err(Error::TooLarge {
			size: out.len() as u64,
			max: limit,
		});
	}
	Ok(out)
}

/// Decode a value from a whole frame, rejecting unconsumed bytes.
pub(crate) fn get_whole<T, C: Codec<T>>(codec: &C, raw: &[u8]) -> Result<T> {
	let (value, n) = codec.get(raw).map_err(Error::midway)?;
	match raw.len() - n {
		0 => Ok(value),
		rest => Err(Error::TrailingBytes(rest)),
	}
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;

	#[test]
	fn take_distinguishes_empty_and_short() {
		assert!(matches!(take(&[], 1), Err(Error::Eof)));
		assert!(matches!(take(&[1], 2), Err(Error::UnexpectedEof)));
		let (head, tail) = take(&[1, 2, 3], 2).unwrap();
		assert_eq!(head, &[1, 2]);
		assert_eq!(tail, &[3]);
		let (head, tail) = take(&[], 0).unwrap();
		assert!(head.is_empty() && tail.is_empty());
	}

	#[test]
	fn read_full_distinguishes_empty_and_short() {
		let mut buf = [0u8; 4];
		assert!(matches!(read_full(&mut Cursor::new(vec![]), &mut buf), Err(Error::Eof)));
		assert!(matches!(
			read_full(&mut Cursor::new(vec![1, 2]), &mut buf),
			Err(Error::UnexpectedEof)
		));
		read_full(&mut Cursor::new(vec![1, 2, 3, 4, 5]), &mut buf).unwrap();
		assert_eq!(buf, [1, 2, 3, 4]);
	}

	#[test]
	fn read_rest_respects_limit() {
		assert_eq!(read_rest(&mut Cursor::new(vec![1, 2, 3]), 3).unwrap(), vec![1, 2, 3]);
		assert!(matches!(
			read_rest(&mut Cursor::new(vec![1, 2, 3]), 2),
			Err(Error::TooLarge {
				size: 3,
				max: 2
			})
		));
	}

	#[test]
	fn read_rest_with_unbounded_limit() {
		assert_eq!(read_rest(&mut Cursor::new(vec![1, 2, 3]), usize::MAX).unwrap(), vec![1, 2, 3]);
		assert_eq!(read_rest(&mut Cursor::new(vec![]), usize::MAX).unwrap(), Vec::<u8>::new());
	}

	#[test]
	fn read_rest_stops_an_endless_source() {
		let mut src = std::io::repeat(0x05);
		assert!(matches!(
			read_rest(&mut src, 16),
			Err(Error::TooLarge {
				size: 17,
				max: 16
			})
		));
	}

	#[test]
	fn decode_rejects_trailing_bytes() {
		assert_eq!(Int32.decode(&[0x80, 0, 0, 7]).unwrap(), 7);
		assert!(matches!(Int32.decode(&[0x80, 0, 0, 7, 9]), Err(Error::TrailingBytes(1))));
	}
}
