//! Reversal of another codec's ordering.

use std::io::Read;

use crate::codec::escape::{COMPLEMENT, append_framed, get_framed, read_framed};
use crate::codec::{Codec, get_whole};
use crate::err::Result;

/// Reverses the ordering of the wrapped codec.
///
/// Complementing the wrapped encoding directly would break whenever one
/// encoding is a prefix of another: the shorter value would still sort first.
/// The wrapped output is therefore always framed before being complemented,
/// and the complemented terminator (`0xff`) delimits the value on its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct Negate<C> {
	codec: C,
}

impl<C> Negate<C> {
	pub fn new(codec: C) -> Self {
		Negate {
			codec,
		}
	}

	/// The codec whose ordering is reversed.
	pub fn inner(&self) -> &C {
		&self.codec
	}
}

impl<T, C: Codec<T>> Codec<T> for Negate<C> {
	fn append(&self, buf: &mut Vec<u8>, value: &T) -> Result<()> {
		let raw = self.codec.encode(value)?;
		append_framed(buf, &raw, COMPLEMENT);
		Ok(())
	}

	fn get(&self, buf: &[u8]) -> Result<(T, usize)> {
		let (raw, n) = get_framed(buf, COMPLEMENT)?;
		Ok((get_whole(&self.codec, &raw)?, n))
	}

	fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<T> {
		let raw = read_framed(r, COMPLEMENT)?;
		get_whole(&self.codec, &raw)
	}

	fn requires_terminator(&self) -> bool {
		false
	}
}
