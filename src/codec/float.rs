//! IEEE-754 floating point codecs.
//!
//! Within one sign, the exponent and fraction bits of an IEEE-754 value
//! already sort in magnitude order when read as an unsigned integer. Flipping
//! the sign bit of positive values and every bit of negative values yields
//!
//! ```text
//! -NaN < -Inf < -finite < -0.0 < +0.0 < +finite < +Inf < +NaN
//! ```
//!
//! with every NaN payload kept distinct.

use std::io::Read;

use crate::codec::{Codec, read_full, take};
use crate::err::Result;

macro_rules! impl_float {
	($(#[$meta:meta])* $name:ident, $t:ty, $u:ty) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
		pub struct $name;

		impl $name {
			const SIGN: $u = 1 << (<$u>::BITS - 1);

			fn to_ordered(value: $t) -> $u {
				let bits = value.to_bits();
				if bits & Self::SIGN == 0 {
					bits ^ Self::SIGN
				} else {
					!bits
				}
			}

			fn from_ordered(bits: $u) -> $t {
				// The encoded sign bit is set for non-negative values
				if bits & Self::SIGN != 0 {
					<$t>::from_bits(bits ^ Self::SIGN)
				} else {
					<$t>::from_bits(!bits)
				}
			}
		}

		impl Codec<$t> for $name {
			fn append(&self, buf: &mut Vec<u8>, value: &$t) -> Result<()> {
				buf.extend_from_slice(&Self::to_ordered(*value).to_be_bytes());
				Ok(())
			}

			fn get(&self, buf: &[u8]) -> Result<($t, usize)> {
				const N: usize = size_of::<$t>();
				let (head, _) = take(buf, N)?;
				let mut bytes = [0u8; N];
				bytes.copy_from_slice(head);
				Ok((Self::from_ordered(<$u>::from_be_bytes(bytes)), N))
			}

			fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<$t> {
				let mut bytes = [0u8; size_of::<$t>()];
				read_full(r, &mut bytes)?;
				Ok(Self::from_ordered(<$u>::from_be_bytes(bytes)))
			}

			fn requires_terminator(&self) -> bool {
				false
			}
		}
	};
}

impl_float!(
	/// Codec for `f32`.
	Float32,
	f32,
	u32
);
impl_float!(
	/// Codec for `f64`.
	Float64,
	f64,
	u64
);
