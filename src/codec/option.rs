//! Optional value codec.

use std::io::Read;

use crate::codec::Codec;
use crate::codec::prefix::{self, NilOrder};
use crate::err::{Error, Result};

/// Codec for `Option<T>`.
///
/// An absent value is the nil prefix byte alone. A present value is the
/// non-nil prefix byte followed by the wrapped encoding. Where absent values
/// sort is decided by the [`NilOrder`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Nullable<C> {
	codec: C,
	order: NilOrder,
}

impl<C> Nullable<C> {
	pub fn new(codec: C, order: NilOrder) -> Self {
		Nullable {
			codec,
			order,
		}
	}

	pub fn order(&self) -> NilOrder {
		self.order
	}
}

impl<T, C: Codec<T>> Codec<Option<T>> for Nullable<C> {
	fn append(&self, buf: &mut Vec<u8>, value: &Option<T>) -> Result<()> {
		prefix::append(buf, value.is_none(), self.order);
		match value {
			Some(v) => self.codec.append(buf, v),
			None => Ok(()),
		}
	}

	fn get(&self, buf: &[u8]) -> Result<(Option<T>, usize)> {
		if prefix::get(buf, self.order)? {
			return Ok((None, 1));
		}
		let (value, n) = self.codec.get(&buf[1..]).map_err(Error::midway)?;
		Ok((Some(value), n + 1))
	}

	fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<Option<T>> {
		if prefix::read(r, self.order)? {
			return Ok(None);
		}
		Ok(Some(self.codec.read(r).map_err(Error::midway)?))
	}

	fn requires_terminator(&self) -> bool {
		self.codec.requires_terminator()
	}
}
