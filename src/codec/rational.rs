//! Arbitrary precision rational codec.
//!
//! A rational is written as its signed numerator followed by its positive
//! denominator, both with the big integer encoding. Rationals with equal
//! denominators therefore sort by numerator, and integers sort numerically.
//! Only fractions in lowest terms are accepted on decode, so every value has
//! exactly one encoding.

use std::io::Read;

use malachite::base::num::basic::traits::Zero;
use malachite::{Integer, Rational};

use crate::codec::Codec;
use crate::codec::bigint::{append_integer, get_integer, read_integer};
use crate::err::{Error, Result};

/// Codec for [`malachite::Rational`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BigRational;

fn from_parts(numerator: Integer, denominator: Integer) -> Result<Rational> {
	if denominator <= Integer::ZERO {
		return Err(Error::Malformed(format!("rational denominator {denominator} is not positive")));
	}
	let denominator = denominator.unsigned_abs_ref().clone();
	let value = Rational::from_sign_and_naturals(
		numerator >= Integer::ZERO,
		numerator.unsigned_abs_ref().clone(),
		denominator.clone(),
	);
	if *value.denominator_ref() != denominator {
		return Err(Error::Malformed(format!(
			"rational {numerator}/{denominator} is not in lowest terms"
		)));
	}
	Ok(value)
}

impl Codec<Rational> for BigRational {
	fn append(&self, buf: &mut Vec<u8>, value: &Rational) -> Result<()> {
		let numerator =
			Integer::from_sign_and_abs(*value >= Rational::ZERO, value.numerator_ref().clone());
		append_integer(buf, &numerator)?;
		append_integer(buf, &Integer::from(value.denominator_ref().clone()))
	}

	fn get(&self, buf: &[u8]) -> Result<(Rational, usize)> {
		let (numerator, n) = get_integer(buf)?;
		let (denominator, m) = get_integer(&buf[n..]).map_err(Error::midway)?;
		Ok((from_parts(numerator, denominator)?, n + m))
	}

	fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<Rational> {
		let numerator = read_integer(r)?;
		let denominator = read_integer(r).map_err(Error::midway)?;
		from_parts(numerator, denominator)
	}

	fn requires_terminator(&self) -> bool {
		false
	}
}
