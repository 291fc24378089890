//! Fixed width integer and boolean codecs.
//!
//! Unsigned integers are written big-endian, which already sorts in numeric
//! order. Signed integers have their sign bit flipped first, mapping the most
//! negative value to all zero bytes and the most positive to all one bytes.

use std::io::Read;

use crate::codec::{Codec, read_full, take};
use crate::err::{Error, Result};

macro_rules! impl_unsigned {
	($(#[$meta:meta])* $name:ident, $t:ty) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
		pub struct $name;

		impl Codec<$t> for $name {
			fn append(&self, buf: &mut Vec<u8>, value: &$t) -> Result<()> {
				buf.extend_from_slice(&value.to_be_bytes());
				Ok(())
			}

			fn get(&self, buf: &[u8]) -> Result<($t, usize)> {
				const N: usize = size_of::<$t>();
				let (head, _) = take(buf, N)?;
				let mut bytes = [0u8; N];
				bytes.copy_from_slice(head);
				Ok((<$t>::from_be_bytes(bytes), N))
			}

			fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<$t> {
				let mut bytes = [0u8; size_of::<$t>()];
				read_full(r, &mut bytes)?;
				Ok(<$t>::from_be_bytes(bytes))
			}

			fn requires_terminator(&self) -> bool {
				false
			}
		}
	};
}

macro_rules! impl_signed {
	($(#[$meta:meta])* $name:ident, $t:ty, $u:ty) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
		pub struct $name;

		impl $name {
			const SIGN: $u = 1 << (<$u>::BITS - 1);
		}

		impl Codec<$t> for $name {
			fn append(&self, buf: &mut Vec<u8>, value: &$t) -> Result<()> {
				let bits = (*value as $u) ^ Self::SIGN;
				buf.extend_from_slice(&bits.to_be_bytes());
				Ok(())
			}

			fn get(&self, buf: &[u8]) -> Result<($t, usize)> {
				const N: usize = size_of::<$t>();
				let (head, _) = take(buf, N)?;
				let mut bytes = [0u8; N];
				bytes.copy_from_slice(head);
				Ok(((<$u>::from_be_bytes(bytes) ^ Self::SIGN) as $t, N))
			}

			fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<$t> {
				let mut bytes = [0u8; size_of::<$t>()];
				read_full(r, &mut bytes)?;
				Ok((<$u>::from_be_bytes(bytes) ^ Self::SIGN) as $t)
			}

			fn requires_terminator(&self) -> bool {
				false
			}
		}
	};
}

impl_unsigned!(
	/// Codec for `u8`.
	Uint8,
	u8
);
impl_unsigned!(
	/// Codec for `u16`.
	Uint16,
	u16
);
impl_unsigned!(
	/// Codec for `u32`.
	Uint32,
	u32
);
impl_unsigned!(
	/// Codec for `u64`.
	Uint64,
	u64
);
impl_unsigned!(
	/// Codec for `u128`.
	Uint128,
	u128
);

impl_signed!(
	/// Codec for `i8`.
	Int8,
	i8,
	u8
);
impl_signed!(
	/// Codec for `i16`.
	Int16,
	i16,
	u16
);
impl_signed!(
	/// Codec for `i32`.
	Int32,
	i32,
	u32
);
impl_signed!(
	/// Codec for `i64`.
	Int64,
	i64,
	u64
);
impl_signed!(
	/// Codec for `i128`.
	Int128,
	i128,
	u128
);

/// Codec for `bool`, written as a single `0x00` or `0x01` byte.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Bool;

impl Bool {
	fn from_byte(b: u8) -> Result<bool> {
		match b {
			0 => Ok(false),
			1 => Ok(true),
			b => Err(Error::InvalidBool(b)),
		}
	}
}

impl Codec<bool> for Bool {
	fn append(&self, buf: &mut Vec<u8>, value: &bool) -> Result<()> {
		buf.push(u8::from(*value));
		Ok(())
	}

	fn get(&self, buf: &[u8]) -> Result<(bool, usize)> {
		let (head, _) = take(buf, 1)?;
		Ok((Self::from_byte(head[0])?, 1))
	}

	fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<bool> {
		let mut b = [0u8; 1];
		read_full(r, &mut b)?;
		Self::from_byte(b[0])
	}

	fn requires_terminator(&self) -> bool {
		false
	}
}
