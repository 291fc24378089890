use std::sync::LazyLock;

/// The largest big integer magnitude, in bytes, accepted when decoding (defaults to 16 MiB)
pub static MAX_BIG_INTEGER_BYTES: LazyLock<usize> =
	lazy_env_parse!("SURREAL_KEYCODEC_MAX_BIG_INTEGER_BYTES", usize, 16 << 20);

/// The largest unframed value, in bytes, read from a byte stream (defaults to 64 MiB)
pub static MAX_FRAME_BYTES: LazyLock<usize> =
	lazy_env_parse!("SURREAL_KEYCODEC_MAX_FRAME_BYTES", usize, 64 << 20);
