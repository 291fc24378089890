//! Arbitrary precision floating point codec.
//!
//! The encoding of a [`BigFloat`] is:
//!
//! 1. the kind, one of `-Inf < -finite < -0 < +0 < +finite < +Inf`, as an
//!    8-bit signed integer. Zero and infinite values end here.
//! 2. the exponent as a 32-bit signed integer, negated for negative values.
//! 3. the mantissa bytes, framed, and complemented for negative values.
//! 4. the precision as a 32-bit signed integer, negated for negative values.
//! 5. the rounding mode byte.
//!
//! The mantissa bytes are the value shifted left until every bit of the
//! declared precision, rounded up to a whole byte, sits left of the radix
//! point. The leading bit of the first byte is therefore always set, and the
//! bytes of two values with the same exponent compare like their magnitudes.
//! When two values are equal, the one with the higher precision has more
//! trailing zero bytes, or a larger precision field, and sorts further from
//! zero.

use std::io::Read;

use malachite::base::num::logic::traits::SignificantBits;

use crate::codec::bigint::{magnitude_bytes, natural_from_bytes};
use crate::codec::escape::{COMPLEMENT, PLAIN, append_framed, get_framed, read_framed};
use crate::codec::{Codec, Int8, Int32, read_byte, take};
use crate::err::{Error, Result};
use crate::val::{BigFloat, Form, RoundingMode};

const NEG_INF: i8 = -3;
const NEG_FINITE: i8 = -2;
const NEG_ZERO: i8 = -1;
const POS_ZERO: i8 = 0;
const POS_FINITE: i8 = 1;
const POS_INF: i8 = 2;

/// Codec for [`BigFloat`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BigFloatCodec;

fn kind(value: &BigFloat) -> i8 {
	match (value.form(), value.is_sign_negative()) {
		(Form::Infinite, true) => NEG_INF,
		(Form::Finite, true) => NEG_FINITE,
		(Form::Zero, true) => NEG_ZERO,
		(Form::Zero, false) => POS_ZERO,
		(Form::Finite, false) => POS_FINITE,
		(Form::Infinite, false) => POS_INF,
	}
}

/// The precision rounded up to a whole number of bytes, in bits.
fn byte_aligned(precision: u32) -> u64 {
	u64::from(precision).div_ceil(8) * 8
}

/// The mantissa of a finite value as exactly `byte_aligned(precision) / 8`
/// bytes, with the leading bit set.
fn mantissa_bytes(value: &BigFloat) -> Result<Vec<u8>> {
	let mantissa = value.mantissa();
	let bits = mantissa.significant_bits();
	let aligned = byte_aligned(value.precision());
	if aligned < bits {
		error!("Big float {value} has more mantissa bits than its precision");
		return Err(Error::Unreachable(format!(
			"big float mantissa has {bits} bits but precision {}",
			value.precision()
		)));
	}
	let bytes = magnitude_bytes(&(mantissa << (aligned - bits)));
	if bytes.len() as u64 * 8 != aligned {
		error!("Big float {value} produced {} mantissa bytes", bytes.len());
		return Err(Error::Unreachable(format!(
			"big float mantissa has {} bytes where {} were expected",
			bytes.len(),
			aligned / 8
		)));
	}
	Ok(bytes)
}

/// Apply the sign of the value to an exponent or precision field.
fn signed(negative: bool, v: i32) -> i32 {
	if negative {
		-v
	} else {
		v
	}
}

/// Recover an exponent or precision field written by [`signed`].
fn unsigned(negative: bool, v: i32) -> Result<i32> {
	if negative {
		v.checked_neg().ok_or_else(|| Error::Malformed(format!("field {v} cannot be negated")))
	} else {
		Ok(v)
	}
}

/// The fields of a finite value, as read from the input.
struct Parts {
	negative: bool,
	exponent: i32,
	mantissa: Vec<u8>,
	precision: i32,
	mode: u8,
}

impl Parts {
	fn build(self) -> Result<BigFloat> {
		let exponent = unsigned(self.negative, self.exponent)?;
		if exponent == i32::MIN {
			return Err(Error::Malformed("big float exponent is out of range".to_string()));
		}
		let precision = unsigned(self.negative, self.precision)?;
		let precision = u32::try_from(precision)
			.ok()
			.filter(|p| *p > 0)
			.ok_or_else(|| {
				Error::Malformed(format!("big float precision {precision} is invalid"))
			})?;
		let mode = RoundingMode::try_from(self.mode)?;
		// The mantissa must be exactly as long as the precision implies
		let aligned = byte_aligned(precision);
		if self.mantissa.len() as u64 * 8 != aligned {
			return Err(Error::Malformed(format!(
				"big float mantissa has {} bytes but precision {precision} needs {}",
				self.mantissa.len(),
				aligned / 8
			)));
		}
		if self.mantissa[0] & 0x80 == 0 {
			return Err(Error::Malformed("big float mantissa is not normalized".to_string()));
		}
		let mantissa = natural_from_bytes(&self.mantissa)?;
		let zeros = mantissa.trailing_zeros().unwrap_or(0);
		let mantissa = mantissa >> zeros;
		BigFloat::finite(self.negative, mantissa, exponent, precision, mode)
			.map_err(|e| Error::Malformed(e.to_string()))
	}
}

fn from_kind(kind: i8) -> Result<Option<BigFloat>> {
	match kind {
		NEG_INF => Ok(Some(BigFloat::infinity(true))),
		NEG_ZERO => Ok(Some(BigFloat::zero(true))),
		POS_ZERO => Ok(Some(BigFloat::zero(false))),
		POS_INF => Ok(Some(BigFloat::infinity(false))),
		NEG_FINITE | POS_FINITE => Ok(None),
		k => Err(Error::InvalidKind(k)),
	}
}

fn get_parts(buf: &[u8], negative: bool) -> Result<(Parts, usize)> {
	let (exponent, mut n) = Int32.get(buf)?;
	let (mantissa, len) = get_framed(&buf[n..], mask(negative))?;
	n += len;
	let (precision, len) = Int32.get(&buf[n..])?;
	n += len;
	let (mode, _) = take(&buf[n..], 1)?;
	let parts = Parts {
		negative,
		exponent,
		mantissa,
		precision,
		mode: mode[0],
	};
	Ok((parts, n + 1))
}

fn read_parts<R: Read + ?Sized>(r: &mut R, negative: bool) -> Result<Parts> {
	Ok(Parts {
		negative,
		exponent: Int32.read(r)?,
		mantissa: read_framed(r, mask(negative))?,
		precision: Int32.read(r)?,
		mode: read_byte(r)?,
	})
}

fn mask(negative: bool) -> u8 {
	if negative {
		COMPLEMENT
	} else {
		PLAIN
	}
}

impl Codec<BigFloat> for BigFloatCodec {
	fn append(&self, buf: &mut Vec<u8>, value: &BigFloat) -> Result<()> {
		Int8.append(buf, &kind(value))?;
		if value.form() != Form::Finite {
			return Ok(());
		}
		let negative = value.is_sign_negative();
		let mantissa = mantissa_bytes(value)?;
		// Precision is at most i32::MAX by construction
		let precision = value.precision() as i32;
		Int32.append(buf, &signed(negative, value.exponent()))?;
		append_framed(buf, &mantissa, mask(negative));
		Int32.append(buf, &signed(negative, precision))?;
		buf.push(value.mode().into());
		Ok(())
	}

	fn get(&self, buf: &[u8]) -> Result<(BigFloat, usize)> {
		let (kind, n) = Int8.get(buf)?;
		if let Some(value) = from_kind(kind)? {
			return Ok((value, n));
		}
		let (parts, len) = get_parts(&buf[n..], kind == NEG_FINITE).map_err(Error::midway)?;
		Ok((parts.build()?, n + len))
	}

	fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<BigFloat> {
		let kind = Int8.read(r)?;
		if let Some(value) = from_kind(kind)? {
			return Ok(value);
		}
		read_parts(r, kind == NEG_FINITE).map_err(Error::midway)?.build()
	}

	fn requires_terminator(&self) -> bool {
		false
	}
}
