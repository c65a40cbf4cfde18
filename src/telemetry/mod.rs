use clap::ValueEnum;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

use crate::err::Error;

/// How log lines are written to stderr.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
	#[default]
	Text,
	Json,
}

#[derive(Default, Debug, Clone)]
pub struct Builder {
	log_level: Option<String>,
	format: LogFormat,
}

pub fn builder() -> Builder {
	Builder::default()
}

impl Builder {
	/// Set the log level or filter directives, e.g. `debug` or `glint_core=trace`
	pub fn with_log_level(mut self, log_level: &str) -> Self {
		self.log_level = Some(log_level.to_string());
		self
	}

	pub fn with_format(mut self, format: LogFormat) -> Self {
		self.format = format;
		self
	}

	/// Build a tracing dispatcher writing to stderr
	pub fn build(self) -> Result<Box<dyn Subscriber + Send + Sync + 'static>, Error> {
		let filter = filter(self.log_level.as_deref().unwrap_or("info"))?;
		let layer = match self.format {
			LogFormat::Text => tracing_subscriber::fmt::layer()
				.compact()
				.with_ansi(true)
				.with_target(true)
				.with_span_events(FmtSpan::NONE)
				.with_writer(std::io::stderr)
				.boxed(),
			LogFormat::Json => tracing_subscriber::fmt::layer()
				.json()
				.with_target(true)
				.with_span_events(FmtSpan::NONE)
				.with_writer(std::io::stderr)
				.boxed(),
		};
		Ok(Box::new(tracing_subscriber::registry().with(layer.with_filter(filter))))
	}

	/// Install the dispatcher as the global default
	pub fn init(self) -> Result<(), Error> {
		self.build()?.try_init().map_err(|e| Error::Logging(e.to_string()))
	}
}

/// Parses a level or a list of filter directives
fn filter(directives: &str) -> Result<EnvFilter, Error> {
	EnvFilter::builder().parse(directives).map_err(|e| Error::InvalidLogFilter {
		filter: directives.to_owned(),
		message: e.to_string(),
	})
}
