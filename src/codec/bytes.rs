//! Byte string and string codecs.
//!
//! Both codecs write their payload verbatim. A shorter value can therefore be
//! a prefix of a longer one, so they require a terminator whenever they are
//! followed by anything else. Decoding consumes all of the remaining input.

use std::io::Read;

use crate::cnf::MAX_FRAME_BYTES;
use crate::codec::{Codec, read_rest};
use crate::err::Result;

/// Codec for `Vec<u8>`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Bytes;

/// Codec for UTF-8 `String`s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Str;

/// Read the rest of the source as a string of at most `limit` bytes.
fn read_str<R: Read + ?Sized>(r: &mut R, limit: usize) -> Result<String> {
	Ok(String::from_utf8(read_rest(r, limit)?)?)
}

impl Codec<Vec<u8>> for Bytes {
	fn append(&self, buf: &mut Vec<u8>, value: &Vec<u8>) -> Result<()> {
		buf.extend_from_slice(value);
		Ok(())
	}

	fn get(&self, buf: &[u8]) -> Result<(Vec<u8>, usize)> {
		Ok((buf.to_vec(), buf.len()))
	}

	fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<Vec<u8>> {
		read_rest(r, *MAX_FRAME_BYTES)
	}

	fn requires_terminator(&self) -> bool {
		true
	}
}

impl Codec<String> for Str {
	fn append(&self, buf: &mut Vec<u8>, value: &String) -> Result<()> {
		buf.extend_from_slice(value.as_bytes());
		Ok(())
	}

	fn get(&self, buf: &[u8]) -> Result<(String, usize)> {
		Ok((String::from_utf8(buf.to_vec())?, buf.len()))
	}

	fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<String> {
		read_str(r, *MAX_FRAME_BYTES)
	}

	fn requires_terminator(&self) -> bool {
		true
	}
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;
	use crate::err::Error;

	#[test]
	fn test_bytes_verbatim() {
		let value = vec![0x00, 0x01, 0xff];
		assert_eq!(Bytes.encode(&value).unwrap(), value);
		assert_eq!(Bytes.decode(&value).unwrap(), value);
		assert_eq!(Bytes.get(&[]).unwrap(), (vec![], 0));
		assert!(Bytes.requires_terminator());
	}

	#[test]
	fn test_str_order() {
		let values = ["", "a", "aa", "ab", "b", "\u{e9}", "\u{1f600}"];
		for pair in values.windows(2) {
			let a = Str.encode(&pair[0].to_string()).unwrap();
			let b = Str.encode(&pair[1].to_string()).unwrap();
			assert!(a < b, "{:?} < {:?}", pair[0], pair[1]);
		}
	}

	#[test]
	fn test_str_reads_to_end() {
		let mut src = Cursor::new(b"hello".to_vec());
		assert_eq!(Str.read(&mut src).unwrap(), "hello");
		assert_eq!(Str.read(&mut src).unwrap(), "");
	}

	#[test]
	fn test_reads_are_bounded() {
		let mut src = std::io::repeat(b'a');
		assert!(matches!(
			read_str(&mut src, 32),
			Err(Error::TooLarge {
				size: 33,
				max: 32
			})
		));
		assert_eq!(read_str(&mut Cursor::new(b"abc".to_vec()), 3).unwrap(), "abc");
		assert!(matches!(
			read_str(&mut Cursor::new(b"abcd".to_vec()), 3),
			Err(Error::TooLarge {
				..
			})
		));
	}

	#[test]
	fn test_str_rejects_invalid_utf8() {
		assert!(matches!(Str.get(&[0xff, 0xfe]), Err(Error::InvalidUtf8(_))));
		assert!(matches!(Str.read(&mut Cursor::new(vec![0xc3])), Err(Error::InvalidUtf8(_))));
	}
}
