//! Arbitrary precision integer codec.
//!
//! An integer is written as its magnitude's byte length, as a signed 64-bit
//! integer carrying the sign of the value, followed by the magnitude in
//! big-endian order. Negative magnitudes are complemented so that a larger
//! magnitude sorts earlier. Since a minimal big-endian magnitude never has a
//! leading zero byte, a longer magnitude is always further from zero.

use std::io::Read;

use malachite::base::num::basic::traits::Zero;
use malachite::base::num::conversion::traits::PowerOf2Digits;
use malachite::{Integer, Natural};

use crate::cnf::MAX_BIG_INTEGER_BYTES;
use crate::codec::{Codec, Int64, read_full, take};
use crate::err::{Error, Result};

/// Codec for [`malachite::Integer`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BigInt;

/// The big-endian bytes of a magnitude, without leading zeros.
pub(crate) fn magnitude_bytes(n: &Natural) -> Vec<u8> {
	PowerOf2Digits::<u8>::to_power_of_2_digits_desc(n, 8)
}

/// Rebuild a magnitude from big-endian bytes.
pub(crate) fn natural_from_bytes(bytes: &[u8]) -> Result<Natural> {
	<Natural as PowerOf2Digits<u8>>::from_power_of_2_digits_desc(8, bytes.iter().copied())
		.ok_or_else(|| Error::Malformed("invalid magnitude bytes".to_string()))
}

pub(crate) fn append_integer(buf: &mut Vec<u8>, value: &Integer) -> Result<()> {
	let negative = *value < Integer::ZERO;
	let magnitude = magnitude_bytes(value.unsigned_abs_ref());
	let size = i64::try_from(magnitude.len())
		.map_err(|_| Error::Unreachable("integer magnitude length overflows i64".to_string()))?;
	if negative {
		Int64.append(buf, &-size)?;
		buf.extend(magnitude.iter().map(|b| !b));
	} else {
		Int64.append(buf, &size)?;
		buf.extend_from_slice(&magnitude);
	}
	Ok(())
}

/// Validate a decoded length, returning the magnitude size in bytes.
fn checked_size(len: i64) -> Result<usize> {
	let size = len.unsigned_abs();
	let max = *MAX_BIG_INTEGER_BYTES;
	match usize::try_from(size) {
		Ok(size) if size <= max => Ok(size),
		_ => {
			trace!("Big integer length {len} exceeds the limit of {max} bytes");
			Err(Error::TooLarge {
				size,
				max,
			})
		}
	}
}

fn integer_from_parts(negative: bool, magnitude: &[u8]) -> Result<Integer> {
	let magnitude = if negative {
		magnitude.iter().map(|b| !b).collect()
	} else {
		magnitude.to_vec()
	};
	if magnitude.first() == Some(&0) {
		return Err(Error::Malformed("big integer magnitude has a leading zero byte".to_string()));
	}
	Ok(Integer::from_sign_and_abs(!negative, natural_from_bytes(&magnitude)?))
}

pub(crate) fn get_integer(buf: &[u8]) -> Result<(Integer, usize)> {
	let (len, n) = Int64.get(buf)?;
	let size = checked_size(len)?;
	let (magnitude, _) = take(&buf[n..], size).map_err(Error::midway)?;
	Ok((integer_from_parts(len < 0, magnitude)?, n + size))
}

pub(crate) fn read_integer<R: Read + ?Sized>(r: &mut R) -> Result<Integer> {
	let len = Int64.read(r)?;
	let size = checked_size(len)?;
	let mut magnitude = vec![0u8; size];
	read_full(r, &mut magnitude).map_err(Error::midway)?;
	integer_from_parts(len < 0, &magnitude)
}

impl Codec<Integer> for BigInt {
	fn append(&self, buf: &mut Vec<u8>, value: &Integer) -> Result<()> {
		append_integer(buf, value)
	}

	fn get(&self, buf: &[u8]) -> Result<(Integer, usize)> {
		get_integer(buf)
	}

	fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<Integer> {
		read_integer(r)
	}

	fn requires_terminator(&self) -> bool {
		false
	}
}
