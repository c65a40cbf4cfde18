use std::sync::LazyLock;

pub const LOGO: &str = "
 .d8888b.  888 d8b          888
d88P  Y88b 888 Y8P          888
888    888 888              888
888        888 888 88888b.  888888
888  88888 888 888 888 '88b 888
888    888 888 888 888  888 888
Y88b  d88P 888 888 888  888 Y88b.
 'Y8888P88 888 888 888  888  'Y888

";

/// The publicly visible name of the tool
pub const PKG_NAME: &str = "glint";

/// How many threads the runtime starts for asynchronous work (defaults to the number of CPUs)
pub static RUNTIME_WORKER_THREADS: LazyLock<usize> =
	lazy_env_parse!("GLINT_RUNTIME_WORKER_THREADS", usize, || {
		std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
	});

/// How many threads can be started for blocking operations (defaults to 64)
pub static RUNTIME_MAX_BLOCKING_THREADS: LazyLock<usize> =
	lazy_env_parse!("GLINT_RUNTIME_MAX_BLOCKING_THREADS", usize, 64);

/// The version identifier of this build
pub static PKG_VERSION: LazyLock<String> = LazyLock::new(|| {
	let version = option_env!("GLINT_BUILD_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
	match option_env!("GLINT_BUILD_METADATA") {
		Some(metadata) if !metadata.trim().is_empty() => format!("{version}+{metadata}"),
		_ => version.to_owned(),
	}
});

/// The release identifier shown by `--version`
pub static RELEASE: LazyLock<String> = LazyLock::new(|| {
	format!("{} for {} on {}", *PKG_VERSION, std::env::consts::OS, std::env::consts::ARCH)
});
