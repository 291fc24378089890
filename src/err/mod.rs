use std::io::Error as IoError;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::codec::prefix::NilOrder;

/// An error originating from encoding or decoding a key.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// The input ended before any byte of the value was read
	#[error("Reached the end of the input before reading a value")]
	Eof,

	/// The input ended part way through a value
	#[error("Reached the end of the input part way through a value")]
	UnexpectedEof,

	/// A framed value was not closed by an unescaped terminator
	#[error("Unterminated buffer: no unescaped terminator was found")]
	Unterminated,

	/// The byte is not a nil or non-nil prefix
	#[error("Unrecognized prefix byte {0:#04x}")]
	InvalidPrefix(u8),

	/// The byte is the nil prefix of the other ordering policy
	#[error("Prefix byte {found:#04x} does not belong to the {expected} ordering")]
	PrefixMismatch {
		found: u8,
		expected: NilOrder,
	},

	/// A boolean was encoded with a byte other than 0 or 1
	#[error("Invalid boolean byte {0:#04x}")]
	InvalidBool(u8),

	/// A big float was encoded with an unknown kind
	#[error("Invalid big float kind {0}")]
	InvalidKind(i8),

	/// A big float was encoded with an unknown rounding mode
	#[error("Invalid rounding mode byte {0:#04x}")]
	InvalidRoundingMode(u8),

	/// A decoded length exceeds the configured limit
	#[error("Encoded length {size} exceeds the maximum of {max} bytes")]
	TooLarge {
		size: u64,
		max: usize,
	},

	/// The encoding is structurally invalid
	#[error("Malformed encoding: {0}")]
	Malformed(String),

	/// Bytes were left over after decoding a complete value
	#[error("{0} unexpected trailing bytes after the encoded value")]
	TrailingBytes(usize),

	/// A string value did not contain valid UTF-8
	#[error("Invalid UTF-8 in string value: {0}")]
	InvalidUtf8(#[from] FromUtf8Error),

	/// A big float could not be constructed from its parts
	#[error("Invalid big float: {0}")]
	InvalidFloat(String),

	/// The encoder reached a state which should be impossible
	#[error("The key encoder encountered unreachable logic: {0}")]
	Unreachable(String),

	/// The underlying byte source or sink failed
	#[error("I/O error: {0}")]
	Io(#[from] IoError),
}

impl Error {
	/// Converts a clean end of input into an unexpected one.
	///
	/// Used once at least one byte of a value has been consumed, at which
	/// point running out of input can no longer signal the end of a sequence.
	pub(crate) fn midway(self) -> Self {
		match self {
			Error::Eof => Error::UnexpectedEof,
			e => e,
		}
	}

	/// Whether this error is the clean end of input signal.
	pub fn is_eof(&self) -> bool {
		matches!(self, Error::Eof)
	}
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
