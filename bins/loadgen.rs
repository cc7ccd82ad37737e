use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> std::process::ExitCode {
    dotenv().ok();
    let cfg = AppConfig::load_or_env();
    common::utils::logging::init_logging(
        cfg.as_ref().map(|c| c.logging.format).unwrap_or_default() == LogFormat::Json,
    );

    let cfg = match cfg {
        Ok(cfg) => cfg.loadgen,
        Err(e) => {
            error!(service = "loadgen", event = "config_invalid", error = %e, "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "loadgen", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "loadgen",
        event = "start",
        base_url = %cfg.base_url,
        stages = cfg.stages.len(),
        max_vus = cfg.max_vus(),
        total_secs = cfg.total_duration_secs(),
        "load run starting"
    );

    rt.block_on(async move {
        let results = match loadgen::run(&cfg).await {
            Ok(r) => r,
            Err(e) => {
                error!(service = "loadgen", event = "run_failed", error = %e, "load run failed");
                return std::process::ExitCode::FAILURE;
            }
        };
        for (label, (rps, rate)) in results
            .throughput
            .labels
            .iter()
            .zip(results.throughput.rps.iter().zip(&results.error_rate.rate))
        {
            info!(service = "loadgen", endpoint = %label, rps, error_rate = rate, "endpoint summary");
        }
        if let Err(e) = results.write_to(&cfg.output).await {
            error!(service = "loadgen", event = "report_failed", error = %e, "cannot write results");
            return std::process::ExitCode::FAILURE;
        }
        info!(service = "loadgen", event = "report_written", path = %cfg.output, "results written");
        std::process::ExitCode::SUCCESS
    })
}
