//! Adapter for encoding one type with the codec of another.

use std::fmt;
use std::io::Read;

use crate::codec::Codec;
use crate::err::Result;

/// Encodes values of type `U` through a codec for type `T`.
///
/// This is the way to give a domain type, such as a newtype around an
/// integer or an enum stored as a string, the ordering of its representation.
/// The wire format and terminator requirement are those of the wrapped codec.
pub struct Convert<C, T, U> {
	codec: C,
	into: fn(&U) -> T,
	from: fn(T) -> U,
}

impl<C, T, U> Convert<C, T, U> {
	pub fn new(codec: C, into: fn(&U) -> T, from: fn(T) -> U) -> Self {
		Convert {
			codec,
			into,
			from,
		}
	}
}

impl<C: Clone, T, U> Clone for Convert<C, T, U> {
	fn clone(&self) -> Self {
		Convert {
			codec: self.codec.clone(),
			into: self.into,
			from: self.from,
		}
	}
}

impl<C: Copy, T, U> Copy for Convert<C, T, U> {}

impl<C: fmt::Debug, T, U> fmt::Debug for Convert<C, T, U> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Convert").field("codec", &self.codec).finish_non_exhaustive()
	}
}

impl<C: Codec<T>, T, U> Codec<U> for Convert<C, T, U> {
	fn append(&self, buf: &mut Vec<u8>, value: &U) -> Result<()> {
		self.codec.append(buf, &(self.into)(value))
	}

	fn get(&self, buf: &[u8]) -> Result<(U, usize)> {
		let (value, n) = self.codec.get(buf)?;
		Ok(((self.from)(value), n))
	}

	fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<U> {
		Ok((self.from)(self.codec.read(r)?))
	}

	fn requires_terminator(&self) -> bool {
		self.codec.requires_terminator()
	}
}
