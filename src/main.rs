use clap::{Arg, ArgAction, Command};
use std::path::Path;

use publishr::config::Config;
use publishr::logging::{error, init_tracing};
use publishr::publish;
use publishr::sync::SyncBuilder;
use publishr::SyncError;

#[tokio::main]
async fn main() {
	init_tracing();

	let matches = Command::new("publishr")
		.version("0.3.0")
		.about("Incremental checksum-aware publisher for build output")
		.subcommand_required(true)
		.arg(
			Arg::new("config")
				.short('c')
				.long("config")
				.value_name("FILE")
				.help("Config file (default ~/.config/publishr/config.toml)"),
		)
		.arg(
			Arg::new("exclude")
				.short('e')
				.long("exclude")
				.value_name("PATTERN")
				.action(ArgAction::Append)
				.help("Glob pattern to exclude from the local set (repeatable)"),
		)
		.subcommand(
			Command::new("sync")
				.about("Sync an existing directory to a remote location")
				.arg(Arg::new("dir").required(true))
				.arg(Arg::new("remote").required(true)),
		)
		.subcommand(
			Command::new("publish")
				.about("Run the build command into a scratch directory, then sync it")
				.arg(Arg::new("remote").required(true))
				.arg(
					Arg::new("build-args")
						.action(ArgAction::Append)
						.num_args(0..)
						.allow_hyphen_values(true)
						.trailing_var_arg(true)
						.help("Arguments passed through to the build command"),
				),
		)
		.get_matches();

	if let Err(e) = run(&matches).await {
		error!("{}", e);
		std::process::exit(1);
	}
}

async fn run(matches: &clap::ArgMatches) -> Result<(), SyncError> {
	let mut config = match matches.get_one::<String>("config") {
		Some(path) => Config::load_from(Path::new(path))?,
		None => Config::load_default()?,
	};
	if let Some(patterns) = matches.get_many::<String>("exclude") {
		config.exclude_patterns.extend(patterns.cloned());
	}

	if let Some(sub) = matches.subcommand_matches("sync") {
		let dir = sub.get_one::<String>("dir").ok_or(SyncError::InvalidConfig {
			message: "sync: directory argument required".to_string(),
		})?;
		let remote = sub.get_one::<String>("remote").ok_or(SyncError::InvalidConfig {
			message: "sync: remote argument required".to_string(),
		})?;

		let report = SyncBuilder::new()
			.local_root(dir)
			.remote(remote)
			.manifest_name(&config.manifest_name)
			.exclude_patterns(config.exclude_patterns.clone())
			.parallel_hashing(config.parallel_hashing)
			.ssh(config.ssh.clone())
			.sync()
			.await?;

		println!(
			"Uploaded {} of {} files ({} unchanged)",
			report.uploaded_files, report.total_local_files, report.skipped_unchanged
		);
	} else if let Some(sub) = matches.subcommand_matches("publish") {
		let remote = sub.get_one::<String>("remote").ok_or(SyncError::InvalidConfig {
			message: "publish: remote argument required".to_string(),
		})?;
		let build_args: Vec<String> = sub
			.get_many::<String>("build-args")
			.map(|args| args.cloned().collect())
			.unwrap_or_default();

		let report = publish::publish(&config, remote, &build_args).await?;

		println!(
			"Published {} of {} files ({} unchanged)",
			report.uploaded_files, report.total_local_files, report.skipped_unchanged
		);
	}

	Ok(())
}

// vim: ts=4
