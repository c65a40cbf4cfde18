use std::process::Command;
use std::{env, str};

use semver::{BuildMetadata, Version};

const BUILD_VERSION: &str = "GLINT_BUILD_VERSION";
const BUILD_METADATA: &str = "GLINT_BUILD_METADATA";

fn main() {
	println!("cargo:rerun-if-env-changed={BUILD_VERSION}");
	println!("cargo:rerun-if-env-changed={BUILD_METADATA}");
	println!("cargo:rerun-if-changed=crates/core/src");
	println!("cargo:rerun-if-changed=src");
	println!("cargo:rerun-if-changed=build.rs");
	println!("cargo:rerun-if-changed=Cargo.toml");
	if let Some(version) = build_version() {
		println!("cargo:rustc-env={BUILD_VERSION}={version}");
	}
	if let Some(metadata) = build_metadata() {
		println!("cargo:rustc-env={BUILD_METADATA}={metadata}");
	}
}

/// An explicit release version, which must not carry build metadata
fn build_version() -> Option<String> {
	let input = env::var(BUILD_VERSION).ok()?;
	let version = input.trim();
	if version.is_empty() {
		return None;
	}
	let parsed = match Version::parse(version) {
		Ok(version) => version,
		Err(..) => panic!("invalid build version `{input}`: expected a SemVer version without a 'v' prefix"),
	};
	if !parsed.build.is_empty() {
		panic!(
			"build metadata should not be included in {BUILD_VERSION}, use {BUILD_METADATA} instead (found `{}`)",
			parsed.build
		);
	}
	Some(version.to_owned())
}

/// The commit date and revision, unless given explicitly
fn build_metadata() -> Option<String> {
	if let Ok(input) = env::var(BUILD_METADATA) {
		let metadata = input.trim();
		if let Err(error) = BuildMetadata::new(metadata) {
			panic!("invalid build metadata `{input}`: {error}");
		}
		return Some(metadata.to_owned());
	}
	let date = git_output(&["show", "--no-patch", "--format=%ad", "--date=format:%Y%m%d"])?;
	let rev = git_output(&["rev-parse", "--short", "HEAD"])?;
	let clean = Command::new("git")
		.args(["diff", "--quiet"])
		.output()
		.map(|output| output.status.success())
		.unwrap_or_default();
	Some(if clean {
		format!("{date}.{rev}")
	} else {
		format!("{date}.{rev}.dirty")
	})
}

fn git_output(args: &[&str]) -> Option<String> {
	Command::new("git")
		.args(args)
		.output()
		.ok()
		.filter(|output| output.status.success())
		.and_then(|output| str::from_utf8(&output.stdout).ok().map(|s| s.trim().to_owned()))
		.filter(|s| !s.is_empty())
}
