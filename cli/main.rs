//! This module contains the main entrypoint to the salary cli.

use clap::{Args, Parser};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "app")]
mod app;
mod predict;

#[derive(Parser)]
#[command(
	about = "Predict whether an employee's salary is above or below 100K.",
	disable_help_subcommand = true
)]
enum Options {
	#[cfg(feature = "app")]
	#[command(name = "app")]
	App(AppOptions),
	#[command(name = "predict")]
	Predict(PredictOptions),
}

#[cfg(feature = "app")]
#[derive(Args)]
#[command(about = "run the app")]
#[command(long_about = "run the salary prediction web app")]
pub struct AppOptions {
	/// the path to the model file
	#[arg(long, env = "MODEL", default_value = "salary_predictor_model.bin")]
	model: PathBuf,
	#[arg(long, default_value = "0.0.0.0")]
	host: std::net::IpAddr,
	#[arg(long, env = "PORT", default_value = "8080")]
	port: u16,
}

#[derive(Args, Debug)]
#[command(about = "predict a csv file")]
#[command(
	long_about = "predict the salary class of every row of a csv file and write it back with a PredictedClass column"
)]
pub struct PredictOptions {
	/// the path to the model file
	#[arg(short, long)]
	model: PathBuf,
	/// the path to your .csv file
	#[arg(short, long)]
	file: PathBuf,
	/// the path to write the predictions to, or stdout if omitted
	#[arg(short, long)]
	output: Option<PathBuf>,
}

fn main() {
	let options = Options::parse();
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(filter)
		.init();
	let result = match options {
		#[cfg(feature = "app")]
		Options::App(options) => self::app::app(options),
		Options::Predict(options) => self::predict::predict(options),
	};
	if let Err(error) = result {
		eprintln!("{}: {}", "error".red().bold(), error);
		std::process::exit(1);
	}
}
