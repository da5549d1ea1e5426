use crate::AppOptions;
use anyhow::Result;

pub(crate) fn app(options: AppOptions) -> Result<()> {
	tracing::info!(host = %options.host, port = options.port, "starting the app");
	salary_app::run(salary_app::Options {
		host: options.host,
		model: options.model,
		port: options.port,
	})
}
