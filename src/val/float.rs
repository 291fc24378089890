//! Arbitrary precision binary floating point values.

use std::fmt;

use malachite::base::num::basic::traits::Zero;
use malachite::base::num::logic::traits::SignificantBits;
use malachite::{Integer, Natural};

use crate::err::{Error, Result};

/// How arithmetic on a [`BigFloat`] rounds results which are not exact.
///
/// The discriminant is the byte written by the big float codec.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum RoundingMode {
	#[default]
	ToNearestEven = 0,
	ToNearestAway = 1,
	ToZero = 2,
	AwayFromZero = 3,
	ToNegativeInf = 4,
	ToPositiveInf = 5,
}

impl From<RoundingMode> for u8 {
	fn from(mode: RoundingMode) -> u8 {
		mode as u8
	}
}

impl TryFrom<u8> for RoundingMode {
	type Error = Error;

	fn try_from(b: u8) -> Result<Self> {
		match b {
			0 => Ok(RoundingMode::ToNearestEven),
			1 => Ok(RoundingMode::ToNearestAway),
			2 => Ok(RoundingMode::ToZero),
			3 => Ok(RoundingMode::AwayFromZero),
			4 => Ok(RoundingMode::ToNegativeInf),
			5 => Ok(RoundingMode::ToPositiveInf),
			b => Err(Error::InvalidRoundingMode(b)),
		}
	}
}

/// The class of a [`BigFloat`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Form {
	Zero,
	Finite,
	Infinite,
}

/// An arbitrary precision binary floating point number.
///
/// A finite non-zero value is `±0.m × 2^exponent`, where `m` is the binary
/// mantissa with its leading bit set, so `0.5 <= 0.m < 1`. The mantissa is
/// stored without trailing zero bits, and never has more significant bits
/// than the declared precision.
///
/// Zero and infinite values only carry a sign. Their precision is 0 and their
/// rounding mode is the default.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BigFloat {
	negative: bool,
	form: Form,
	mantissa: Natural,
	exponent: i32,
	precision: u32,
	mode: RoundingMode,
}

impl BigFloat {
	/// The largest precision a value may declare.
	pub const MAX_PRECISION: u32 = i32::MAX as u32;

	pub fn zero(negative: bool) -> Self {
		Self::special(negative, Form::Zero)
	}

	pub fn infinity(negative: bool) -> Self {
		Self::special(negative, Form::Infinite)
	}

	fn special(negative: bool, form: Form) -> Self {
		BigFloat {
			negative,
			form,
			mantissa: Natural::ZERO,
			exponent: 0,
			precision: 0,
			mode: RoundingMode::default(),
		}
	}

	/// Creates the value `value × 2^scale` with the given precision.
	///
	/// No rounding takes place: an error is returned if the value needs more
	/// significant bits than `precision`. A zero `value` gives positive zero.
	pub fn new(value: &Integer, scale: i64, precision: u32, mode: RoundingMode) -> Result<Self> {
		if *value == Integer::ZERO {
			return Ok(Self::zero(false));
		}
		let negative = *value < Integer::ZERO;
		let magnitude = value.unsigned_abs_ref();
		let zeros = magnitude.trailing_zeros().unwrap_or(0);
		let mantissa = magnitude >> zeros;
		let bits = mantissa.significant_bits();
		let exponent = i128::from(scale) + i128::from(zeros) + i128::from(bits);
		let exponent = i32::try_from(exponent)
			.ok()
			.filter(|e| *e != i32::MIN)
			.ok_or_else(|| Error::InvalidFloat(format!("exponent {exponent} is out of range")))?;
		Self::finite(negative, mantissa, exponent, precision, mode)
	}

	/// Creates a finite non-zero value from an odd mantissa.
	pub(crate) fn finite(
		negative: bool,
		mantissa: Natural,
		exponent: i32,
		precision: u32,
		mode: RoundingMode,
	) -> Result<Self> {
		if precision == 0 || precision > Self::MAX_PRECISION {
			return Err(Error::InvalidFloat(format!("precision {precision} is out of range")));
		}
		let bits = mantissa.significant_bits();
		if bits > u64::from(precision) {
			return Err(Error::InvalidFloat(format!(
				"mantissa needs {bits} bits but the precision is {precision}"
			)));
		}
		Ok(BigFloat {
			negative,
			form: Form::Finite,
			mantissa,
			exponent,
			precision,
			mode,
		})
	}

	/// Returns the same value declared with a different precision.
	///
	/// Zero and infinite values are returned unchanged.
	pub fn with_precision(self, precision: u32) -> Result<Self> {
		match self.form {
			Form::Finite => {
				Self::finite(self.negative, self.mantissa, self.exponent, precision, self.mode)
			}
			_ => Ok(self),
		}
	}

	/// Returns the same value with a different rounding mode.
	///
	/// Zero and infinite values are returned unchanged.
	pub fn with_mode(mut self, mode: RoundingMode) -> Self {
		if self.form == Form::Finite {
			self.mode = mode;
		}
		self
	}

	pub fn form(&self) -> Form {
		self.form
	}

	pub fn is_sign_negative(&self) -> bool {
		self.negative
	}

	/// The significant bits of the mantissa, without trailing zeros.
	pub fn mantissa(&self) -> &Natural {
		&self.mantissa
	}

	/// The binary exponent, for which `0.5 <= |self| / 2^exponent < 1`.
	pub fn exponent(&self) -> i32 {
		self.exponent
	}

	pub fn precision(&self) -> u32 {
		self.precision
	}

	pub fn mode(&self) -> RoundingMode {
		self.mode
	}
}

impl TryFrom<f64> for BigFloat {
	type Error = Error;

	/// Converts exactly, with a precision of 53 bits.
	fn try_from(value: f64) -> Result<Self> {
		if value.is_nan() {
			return Err(Error::InvalidFloat("NaN has no big float representation".to_string()));
		}
		let negative = value.is_sign_negative();
		if value.is_infinite() {
			return Ok(Self::infinity(negative));
		}
		if value == 0.0 {
			return Ok(Self::zero(negative));
		}
		let bits = value.to_bits();
		let biased = ((bits >> 52) & 0x7ff) as i64;
		let fraction = bits & ((1 << 52) - 1);
		let (mantissa, scale) = match biased {
			0 => (fraction, -1074),
			_ => (fraction | (1 << 52), biased - 1075),
		};
		let value = Integer::from_sign_and_abs(!negative, Natural::from(mantissa));
		Self::new(&value, scale, 53, RoundingMode::ToNearestEven)
	}
}

impl fmt::Display for BigFloat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let sign = if self.negative {
			"-"
		} else {
			"+"
		};
		match self.form {
			Form::Zero => write!(f, "{sign}0"),
			Form::Infinite => write!(f, "{sign}Inf"),
			Form::Finite => write!(
				f,
				"{sign}0b0.{:b}p{} (prec {}, {:?})",
				self.mantissa, self.exponent, self.precision, self.mode
			),
		}
	}
}
