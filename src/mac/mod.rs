/// Lazily parses a value from an environment variable, falling back to
/// `$default` if the variable is not set or does not parse as `$t`.
///
/// Expands to a `std::sync::LazyLock`, so the variable is read at most once.
macro_rules! lazy_env_parse {
	($key:expr_2021, $t:ty, $default:expr_2021) => {
		std::sync::LazyLock::new(|| {
			std::env::var($key).ok().and_then(|s| s.parse::<$t>().ok()).unwrap_or($default)
		})
	};
}

#[cfg(test)]
mod test {
	use std::sync::LazyLock;

	#[test]
	fn test_lazy_env_parse_unset() {
		static VALUE: LazyLock<usize> =
			lazy_env_parse!("SURREAL_KEYCODEC_TEST_UNSET_VARIABLE", usize, 42);
		assert_eq!(*VALUE, 42);
	}

	#[test]
	fn test_lazy_env_parse_unparsable() {
		// PATH is never a number
		static VALUE: LazyLock<usize> = lazy_env_parse!("PATH", usize, 1 << 4);
		assert_eq!(*VALUE, 16);
	}
}
