use std::time::{Duration, Instant};

use configs::{LoadgenConfig, StageConfig};
use reqwest::Client;
use tracing::{info, warn};

use crate::error::LoadgenError;
use crate::recorder::Recorder;
use crate::report::BenchmarkResults;
use crate::scenario::ItemClient;

async fn virtual_user(client: ItemClient, recorder: Recorder, deadline: Instant) {
    while Instant::now() < deadline {
        client.iteration(&recorder).await;
    }
}

/// Hold `stage.target` users for the stage duration; a user finishes its
/// current iteration before stopping.
async fn run_stage(client: &ItemClient, recorder: &Recorder, index: usize, stage: StageConfig) {
    let duration = Duration::from_secs(stage.duration_secs);
    info!(stage = index, vus = stage.target, secs = stage.duration_secs, event = "stage_start", "load stage starting");

    if stage.target == 0 {
        tokio::time::sleep(duration).await;
        return;
    }

    let deadline = Instant::now() + duration;
    let mut handles = Vec::with_capacity(stage.target);
    for _ in 0..stage.target {
        let handle = tokio::spawn(virtual_user(client.clone(), recorder.clone(), deadline));
        handles.push(handle);
    }
    for handle in handles {
        if let Err(e) = handle.await {
            warn!(stage = index, error = %e, "virtual user task failed");
        }
    }
}

/// Run every stage against `cfg.base_url` and summarize the whole run.
pub async fn run(cfg: &LoadgenConfig) -> Result<BenchmarkResults, LoadgenError> {
    let http = Client::builder()
        .timeout(Duration::from_secs(cfg.request_timeout_secs))
        .build()
        .map_err(LoadgenError::Client)?;
    let client = ItemClient::new(http, cfg.base_url.clone());
    let recorder = Recorder::new();

    let started = Instant::now();
    for (index, stage) in cfg.stages.iter().enumerate() {
        run_stage(&client, &recorder, index, *stage).await;
    }
    let elapsed = started.elapsed().as_secs_f64();

    info!(
        event = "run_complete",
        requests = recorder.total_requests(),
        elapsed_secs = elapsed,
        "load run finished"
    );
    Ok(BenchmarkResults::from_recorder(&recorder, elapsed, cfg.max_vus(), cfg.total_duration_secs()))
}
