//! # Surrealdb Keycodec
//!
//! Order-preserving binary encodings of typed values, for use as keys in ordered
//! key-value stores. Comparing two encodings as unsigned byte strings gives the same
//! result as comparing the values they encode, and every encoding decodes back to an
//! equal value.
//!
//! Each encoding is a [`Codec`](codec::Codec). Codecs are small immutable values which
//! can be nested to build the encoding of a composite key:
//!
//! ```
//! use surrealdb_keycodec::codec::{Codec, Int64, Negate, NilOrder, Nullable, Seq, Str};
//!
//! // Newest first, then by an optional name with missing names last
//! let time = Negate::new(Int64);
//! let name = Nullable::new(Str, NilOrder::Last);
//!
//! let mut key = Vec::new();
//! time.append(&mut key, &1_700_000_000).unwrap();
//! name.append(&mut key, &Some("tobie".to_string())).unwrap();
//!
//! let (t, n) = time.get(&key).unwrap();
//! let (s, _) = name.get(&key[n..]).unwrap();
//! assert_eq!((t, s.as_deref()), (1_700_000_000, Some("tobie")));
//!
//! let tags = Seq::new(Str);
//! let a = tags.encode(&vec!["a".to_string()]).unwrap();
//! let b = tags.encode(&vec!["a".to_string(), "b".to_string()]).unwrap();
//! assert!(a < b);
//! ```
//!
//! ## Wire format
//!
//! | Type | Encoding |
//! |---|---|
//! | bool | `0x00` or `0x01` |
//! | uint8 … uint128 | big-endian |
//! | int8 … int128 | big-endian with the sign bit flipped |
//! | float32 / float64 | sign bit flipped if positive, all bits flipped if negative, big-endian |
//! | bytes / string | raw bytes, requires a terminator |
//! | framed | raw bytes with `0x00` and `0x01` escaped by `0x01`, then `0x00` |
//! | negated | framed, then every byte complemented |
//! | optional | `0x02` (nils first) or `0xfd` (nils last) when absent, `0x03` then the value when present |
//! | sequence | elements in order, each framed if its codec requires a terminator |
//! | big integer | int64 magnitude length carrying the sign, then the magnitude, complemented if negative |
//! | big float | int8 kind; if finite: int32 exponent, framed mantissa, int32 precision (each reversed if negative), then the rounding mode byte |
//! | big rational | big integer numerator, then big integer denominator |

#[macro_use]
extern crate tracing;

#[macro_use]
mod mac;

pub mod cnf;
pub mod codec;
pub mod err;
pub mod val;

pub use codec::Codec;
pub use err::{Error, Result};
pub use val::{BigFloat, RoundingMode};
