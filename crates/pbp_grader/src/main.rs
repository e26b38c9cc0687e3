use anyhow::Result;
use clap::Parser;
use pbp_grader::{run, write_output, Config, Game, GameFile, GraderError};
use tracing_subscriber::{filter::EnvFilter, fmt::format::JsonFields, util::SubscriberInitExt, Layer};

fn main() -> Result<()> {
	dotenv::dotenv().ok();
	let config = Config::parse();

	init_tracing(&config)?;

	let game = Game::from(GameFile::load(&config.game)?);
	let output = run(&config.command, &game)?;
	write_output(&output, config.output.as_deref())?;
	Ok(())
}

/// Logs go to stderr so stdout stays clean JSON. No `RUST_LOG`, no logs.
pub fn init_tracing(config: &Config) -> Result<(), GraderError> {
	use std::str::FromStr;
	use tracing_subscriber::layer::SubscriberExt;

	let Some(directives) = config.rust_log.as_deref() else {
		return Ok(());
	};
	let filter = EnvFilter::from_str(directives).map_err(|e| GraderError::LogFilter(e.to_string()))?;

	tracing_subscriber::registry()
		.with(if config.log_json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.with_writer(std::io::stderr)
					.fmt_fields(JsonFields::default())
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(
				tracing_subscriber::fmt::layer()
					.with_writer(std::io::stderr)
					.event_format(tracing_subscriber::fmt::format().pretty())
					.with_filter(filter),
			)
		})
		.init();
	Ok(())
}
