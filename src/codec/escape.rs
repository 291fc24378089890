//! Escaping and termination of variable length values.
//!
//! A framed value is the raw bytes with every [`TERMINATOR`] and [`ESCAPE`]
//! byte preceded by an [`ESCAPE`], followed by a single unescaped
//! [`TERMINATOR`]. Framing keeps the ordering of the raw bytes, and no framed
//! value is a prefix of another, so framed values can be concatenated.
//!
//! Every function here takes a `mask` which is XORed with each output byte
//! and each input byte. A mask of `0x00` gives the plain framing, and a mask
//! of `0xff` gives the complemented framing used to reverse an ordering.

use std::io::Read;

use crate::cnf::MAX_FRAME_BYTES;
use crate::codec::{Codec, get_whole, read_byte};
use crate::err::{Error, Result};

/// Closes a framed value.
pub const TERMINATOR: u8 = 0x00;
/// Marks the following byte as a literal.
pub const ESCAPE: u8 = 0x01;

/// The mask for plain framing.
pub const PLAIN: u8 = 0x00;
/// The mask for complemented framing.
pub const COMPLEMENT: u8 = 0xff;

/// Push the framed form of `raw` onto the buffer.
pub fn append_framed(buf: &mut Vec<u8>, raw: &[u8], mask: u8) {
	buf.reserve(raw.len() + 1);
	for &b in raw {
		if b == TERMINATOR || b == ESCAPE {
			buf.push(ESCAPE ^ mask);
		}
		buf.push(b ^ mask);
	}
	buf.push(TERMINATOR ^ mask);
}

/// Frame a byte string into a new buffer.
pub fn frame(raw: &[u8]) -> Vec<u8> {
	let mut buf = Vec::with_capacity(raw.len() + 1);
	append_framed(&mut buf, raw, PLAIN);
	buf
}

/// Remove the framing from the front of the buffer.
///
/// Returns the raw bytes and the number of framed bytes consumed, including
/// the terminator.
pub fn get_framed(buf: &[u8], mask: u8) -> Result<(Vec<u8>, usize)> {
	if buf.is_empty() {
		return Err(Error::Eof);
	}
	let mut raw = Vec::new();
	let mut escaped = false;
	for (i, &b) in buf.iter().enumerate() {
		let b = b ^ mask;
		if escaped {
			raw.push(b);
			escaped = false;
		} else if b == TERMINATOR {
			return Ok((raw, i + 1));
		} else if b == ESCAPE {
			escaped = true;
		} else {
			raw.push(b);
		}
	}
	Err(Error::Unterminated)
}

/// Remove the framing from a byte string.
pub fn unframe(buf: &[u8]) -> Result<(Vec<u8>, usize)> {
	get_framed(buf, PLAIN)
}

/// Read one framed value from a byte source.
///
/// The source is read one byte at a time, so callers reading from a file or
/// socket should wrap it in a [`std::io::BufReader`].
pub fn read_framed<R: Read + ?Sized>(r: &mut R, mask: u8) -> Result<Vec<u8>> {
	read_framed_limited(r, mask, *MAX_FRAME_BYTES)
}

/// Read one framed value of at most `limit` raw bytes.
pub(crate) fn read_framed_limited<R: Read + ?Sized>(
	r: &mut R,
	mask: u8,
	limit: usize,
) -> Result<Vec<u8>> {
	let mut raw = Vec::new();
	let mut escaped = false;
	let mut first = true;
	loop {
		let b = match read_byte(r) {
			Ok(b) => b ^ mask,
			Err(e) if first => return Err(e),
			Err(e) => return Err(e.midway()),
		};
		first = false;
		if escaped {
			raw.push(b);
			escaped = false;
		} else if b == TERMINATOR {
			return Ok(raw);
		} else if b == ESCAPE {
			escaped = true;
		} else {
			raw.push(b);
		}
		if raw.len() > limit {
			trace!("Framed value exceeds the limit of {limit} bytes");
			return Err(Error::TooLarge {
				size: raw.len() as u64,
				max: limit,
			});
		}
	}
}

/// Frames the output of another codec.
///
/// The result never requires a terminator of its own, so this is the wrapper
/// composite codecs use around element codecs which do.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminate<C> {
	codec: C,
}

impl<C> Terminate<C> {
	pub fn new(codec: C) -> Self {
		Terminate {
			codec,
		}
	}
}

impl<T, C: Codec<T>> Codec<T> for Terminate<C> {
	fn append(&self, buf: &mut Vec<u8>, value: &T) -> Result<()> {
		let raw = self.codec.encode(value)?;
		append_framed(buf, &raw, PLAIN);
		Ok(())
	}

	fn get(&self, buf: &[u8]) -> Result<(T, usize)> {
		let (raw, n) = get_framed(buf, PLAIN)?;
		Ok((get_whole(&self.codec, &raw)?, n))
	}

	fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<T> {
		let raw = read_framed(r, PLAIN)?;
		get_whole(&self.codec, &raw)
	}

	fn requires_terminator(&self) -> bool {
		false
	}
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use rstest::rstest;

	use super::*;
	use crate::codec::{Int32, Str};

	#[rstest]
	#[case::empty(&[], &[0x00])]
	#[case::terminator(&[0x00], &[0x01, 0x00, 0x00])]
	#[case::escape(&[0x01], &[0x01, 0x01, 0x00])]
	#[case::plain(&[0x02, 0xff], &[0x02, 0xff, 0x00])]
	#[case::mixed(&[0x00, 0x05, 0x01], &[0x01, 0x00, 0x05, 0x01, 0x01, 0x00])]
	#[case::trailing_escape(&[0x07, 0x01], &[0x07, 0x01, 0x01, 0x00])]
	fn test_frame(#[case] raw: &[u8], #[case] framed: &[u8]) {
		assert_eq!(frame(raw), framed);
		let (back, n) = unframe(framed).unwrap();
		assert_eq!(back, raw);
		assert_eq!(n, framed.len());
	}

	#[test]
	fn test_frame_complemented() {
		let mut buf = Vec::new();
		append_framed(&mut buf, &[0x00, 0x42], COMPLEMENT);
		assert_eq!(buf, vec![0xfe, 0xff, 0xbd, 0xff]);
		let (raw, n) = get_framed(&buf, COMPLEMENT).unwrap();
		assert_eq!(raw, vec![0x00, 0x42]);
		assert_eq!(n, 4);
	}

	#[test]
	fn test_concatenated_frames_split() {
		let parts: [&[u8]; 4] =
			[&[0x00, 0x00, 0x01], &[], &[0x05, 0x01, 0x00, 0x09], &[0x01, 0x01, 0x00, 0x00]];
		let mut buf = Vec::new();
		for part in parts {
			append_framed(&mut buf, part, PLAIN);
		}
		let mut rest = buf.as_slice();
		for part in parts {
			let (raw, n) = unframe(rest).unwrap();
			assert_eq!(raw, part);
			rest = &rest[n..];
		}
		assert!(rest.is_empty());
	}

	#[test]
	fn test_frame_order() {
		let ordered: [&[u8]; 8] = [
			&[],
			&[0x00],
			&[0x00, 0x00],
			&[0x00, 0x01],
			&[0x01],
			&[0x01, 0x00],
			&[0x02],
			&[0xff, 0xff],
		];
		for pair in ordered.windows(2) {
			assert!(pair[0] < pair[1]);
			assert!(frame(pair[0]) < frame(pair[1]), "{:?} < {:?}", pair[0], pair[1]);
		}
	}

	#[rstest]
	#[case::no_terminator(&[0x05, 0x06])]
	#[case::escaped_terminator(&[0x05, 0x01, 0x00])]
	#[case::dangling_escape(&[0x01])]
	fn test_unframe_unterminated(#[case] framed: &[u8]) {
		assert!(matches!(unframe(framed), Err(Error::Unterminated)));
	}

	#[test]
	fn test_unframe_empty() {
		assert!(matches!(unframe(&[]), Err(Error::Eof)));
	}

	#[test]
	fn test_read_framed() {
		let mut src = Cursor::new(vec![0x01, 0x00, 0x07, 0x00, 0x08, 0x00]);
		assert_eq!(read_framed(&mut src, PLAIN).unwrap(), vec![0x00, 0x07]);
		assert_eq!(read_framed(&mut src, PLAIN).unwrap(), vec![0x08]);
		assert!(matches!(read_framed(&mut src, PLAIN), Err(Error::Eof)));
		let mut src = Cursor::new(vec![0x07, 0x01]);
		assert!(matches!(read_framed(&mut src, PLAIN), Err(Error::UnexpectedEof)));
	}

	#[test]
	fn test_read_framed_limit() {
		// Escapes do not count towards the limit
		let mut src = Cursor::new(vec![0x01, 0x00, 0x01, 0x01, 0x07, 0x00]);
		assert_eq!(read_framed_limited(&mut src, PLAIN, 3).unwrap(), vec![0x00, 0x01, 0x07]);
		let mut src = std::io::repeat(0x05);
		assert!(matches!(
			read_framed_limited(&mut src, PLAIN, 8),
			Err(Error::TooLarge {
				size: 9,
				max: 8
			})
		));
		let mut src = std::io::repeat(0xfa);
		assert!(matches!(
			read_framed_limited(&mut src, COMPLEMENT, 4),
			Err(Error::TooLarge {
				..
			})
		));
	}

	#[test]
	fn test_terminate() {
		let codec = Terminate::new(Str);
		assert!(!codec.requires_terminator());
		let mut buf = Vec::new();
		codec.append(&mut buf, &"a\0b".to_string()).unwrap();
		codec.append(&mut buf, &String::new()).unwrap();
		assert_eq!(buf, vec![b'a', 0x01, 0x00, b'b', 0x00, 0x00]);
		let (first, n) = codec.get(&buf).unwrap();
		assert_eq!(first, "a\0b");
		let (second, m) = codec.get(&buf[n..]).unwrap();
		assert_eq!(second, "");
		assert_eq!(n + m, buf.len());
		let mut src = Cursor::new(buf);
		assert_eq!(codec.read(&mut src).unwrap(), "a\0b");
		assert_eq!(codec.read(&mut src).unwrap(), "");
		assert!(codec.read(&mut src).unwrap_err().is_eof());
	}

	#[test]
	fn test_terminate_rejects_leftovers() {
		let codec = Terminate::new(Int32);
		let framed = frame(&[0x80, 0x00, 0x00, 0x01, 0x09]);
		assert!(matches!(codec.get(&framed), Err(Error::TrailingBytes(1))));
		let framed = frame(&[0x80, 0x00]);
		assert!(matches!(codec.get(&framed), Err(Error::UnexpectedEof)));
	}
}
