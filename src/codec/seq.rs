//! Sequence codec.

use std::io::Read;

use crate::codec::escape::{PLAIN, append_framed, get_framed, read_framed};
use crate::codec::{Codec, get_whole};
use crate::err::{Error, Result};

/// Codec for `Vec<T>`, ordering sequences element by element.
///
/// Elements are concatenated in order. When the element codec requires a
/// terminator each element is framed, so a shorter element can never compare
/// against the start of the next one. A sequence which is a prefix of another
/// sorts first, and the sequence itself requires a terminator.
///
/// Decoding continues until the input runs out, so a sequence must be the last
/// value in a buffer or stream unless it is framed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Seq<C> {
	codec: C,
}

impl<C> Seq<C> {
	pub fn new(codec: C) -> Self {
		Seq {
			codec,
		}
	}

	fn get_element<T>(&self, buf: &[u8]) -> Result<(T, usize)>
	where
		C: Codec<T>,
	{
		if self.codec.requires_terminator() {
			let (raw, n) = get_framed(buf, PLAIN)?;
			Ok((get_whole(&self.codec, &raw)?, n))
		} else {
			self.codec.get(buf)
		}
	}

	fn read_element<T, R: Read + ?Sized>(&self, r: &mut R) -> Result<T>
	where
		C: Codec<T>,
	{
		if self.codec.requires_terminator() {
			let raw = read_framed(r, PLAIN)?;
			get_whole(&self.codec, &raw)
		} else {
			self.codec.read(r)
		}
	}
}

impl<T, C: Codec<T>> Codec<Vec<T>> for Seq<C> {
	fn append(&self, buf: &mut Vec<u8>, value: &Vec<T>) -> Result<()> {
		let framed = self.codec.requires_terminator();
		for v in value {
			if framed {
				let raw = self.codec.encode(v)?;
				append_framed(buf, &raw, PLAIN);
			} else {
				self.codec.append(buf, v)?;
			}
		}
		Ok(())
	}

	fn get(&self, buf: &[u8]) -> Result<(Vec<T>, usize)> {
		let mut out = Vec::new();
		let mut n = 0;
		while n < buf.len() {
			let (v, len) = self.get_element(&buf[n..])?;
			if len == 0 {
				return Err(Error::Malformed("sequence element consumed no input".to_string()));
			}
			out.push(v);
			n += len;
		}
		Ok((out, n))
	}

	fn read<R: Read + ?Sized>(&self, r: &mut R) -> Result<Vec<T>> {
		let mut out = Vec::new();
		loop {
			match self.read_element(r) {
				Ok(v) => out.push(v),
				Err(Error::Eof) => return Ok(out),
				Err(e) => return Err(e),
			}
		}
	}

	fn requires_terminator(&self) -> bool {
		true
	}
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;
	use crate::codec::{Int32, Negate, Str, Uint8};

	fn strings(values: &[&str]) -> Vec<String> {
		values.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn test_seq_of_fixed_width() {
		let codec = Seq::new(Uint8);
		assert_eq!(codec.encode(&vec![1, 2, 3]).unwrap(), vec![1, 2, 3]);
		assert_eq!(codec.decode(&[1, 2, 3]).unwrap(), vec![1, 2, 3]);
		assert_eq!(codec.decode(&[]).unwrap(), Vec::<u8>::new());
	}

	#[test]
	fn test_seq_frames_unterminated_elements() {
		let codec = Seq::new(Str);
		let enc = codec.encode(&strings(&["a", "", "b\0"])).unwrap();
		assert_eq!(enc, vec![b'a', 0x00, 0x00, b'b', 0x01, 0x00, 0x00]);
		assert_eq!(codec.decode(&enc).unwrap(), strings(&["a", "", "b\0"]));
	}

	#[test]
	fn test_seq_order() {
		let codec = Seq::new(Str);
		let values = [
			strings(&[]),
			strings(&[""]),
			strings(&["", "a"]),
			strings(&["a"]),
			strings(&["a", ""]),
			strings(&["a", "b"]),
			strings(&["ab"]),
			strings(&["b"]),
		];
		for (i, pair) in values.windows(2).enumerate() {
			let a = codec.encode(&pair[0]).unwrap();
			let b = codec.encode(&pair[1]).unwrap();
			assert!(a < b, "#{i} - {:?} < {:?}", pair[0], pair[1]);
		}
	}

	#[test]
	fn test_seq_of_negated() {
		let codec = Seq::new(Negate::new(Int32));
		let a = codec.encode(&vec![5, 1]).unwrap();
		let b = codec.encode(&vec![5, 0]).unwrap();
		assert!(a < b);
		assert_eq!(codec.decode(&a).unwrap(), vec![5, 1]);
	}

	#[test]
	fn test_seq_stream_ends_cleanly() {
		let codec = Seq::new(Int32);
		let mut buf = Vec::new();
		codec.write(&mut buf, &vec![-1, 0, 1]).unwrap();
		assert_eq!(codec.read(&mut Cursor::new(buf.clone())).unwrap(), vec![-1, 0, 1]);
		assert_eq!(codec.read(&mut Cursor::new(vec![])).unwrap(), Vec::<i32>::new());
		buf.pop();
		assert!(matches!(codec.read(&mut Cursor::new(buf.clone())), Err(Error::UnexpectedEof)));
		assert!(matches!(codec.get(&buf), Err(Error::UnexpectedEof)));
	}

	#[test]
	fn test_seq_unterminated_element() {
		let codec = Seq::new(Str);
		assert!(matches!(codec.get(b"abc"), Err(Error::Unterminated)));
		assert!(matches!(codec.read(&mut Cursor::new(b"abc".to_vec())), Err(Error::UnexpectedEof)));
	}
}
