//! Single byte markers distinguishing absent values from present ones.
//!
//! The prefix bytes avoid the escape alphabet, and their complements avoid it
//! too, so a prefixed value remains valid inside a negated encoding.

use std::fmt;
use std::io::Read;

use crate::codec::read_byte;
use crate::err::{Error, Result};

/// Prefix of an absent value which sorts before all present values.
pub const NIL_FIRST: u8 = 0x02;
/// Prefix of a present value.
pub const NON_NIL: u8 = 0x03;
/// Prefix of an absent value which sorts after all present values.
pub const NIL_LAST: u8 = 0xfd;

/// Where absent values sort relative to present values.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum NilOrder {
	#[default]
	First,
	Last,
}

impl NilOrder {
	/// The prefix byte marking an absent value under this ordering.
	pub fn nil_byte(self) -> u8 {
		match self {
			NilOrder::First => NIL_FIRST,
			NilOrder::Last => NIL_LAST,
		}
	}

	fn other(self) -> Self {
		match self {
			NilOrder::First => NilOrder::Last,
			NilOrder::Last => NilOrder::First,
		}
	}
}

impl fmt::Display for NilOrder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NilOrder::First => f.write_str("nils-first"),
			NilOrder::Last => f.write_str("nils-last"),
		}
	}
}

/// Push the prefix byte for a value onto the buffer.
pub fn append(buf: &mut Vec<u8>, is_nil: bool, order: NilOrder) {
	buf.push(if is_nil {
		order.nil_byte()
	} else {
		NON_NIL
	});
}

/// Interpret a prefix byte, returning whether it marks an absent value.
pub fn check(b: u8, order: NilOrder) -> Result<bool> {
	match b {
		NON_NIL => Ok(false),
		b if b == order.nil_byte() => Ok(true),
		b if b == order.other().nil_byte() => {
			trace!("Found a {} prefix where {order} was expected", order.other());
			Err(Error::PrefixMismatch {
				found: b,
				expected: order,
			})
		}
		b => Err(Error::InvalidPrefix(b)),
	}
}

/// Decode the prefix byte at the front of the buffer.
pub fn get(buf: &[u8], order: NilOrder) -> Result<bool> {
	match buf.first() {
		Some(&b) => check(b, order),
		None => Err(Error::Eof),
	}
}

/// Read a prefix byte from a byte source.
pub fn read<R: Read + ?Sized>(r: &mut R, order: NilOrder) -> Result<bool> {
	check(read_byte(r)?, order)
}
