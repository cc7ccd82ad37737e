use configs::{HttpConfig, LoadgenConfig, StageConfig};
use loadgen::BenchmarkResults;
use tokio::net::TcpListener;

use server::{routes, startup};

async fn start_server() -> anyhow::Result<String> {
    let state = startup::seeded_state().await;
    let http = HttpConfig { request_logging: false, ..HttpConfig::default() };
    let app = routes::build_router(state, &http);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(startup::serve(listener, app, std::future::pending::<()>()));
    Ok(format!("http://{addr}"))
}

fn one_second(base_url: String, vus: usize) -> LoadgenConfig {
    LoadgenConfig {
        base_url,
        stages: vec![StageConfig { duration_secs: 1, target: vus }],
        request_timeout_secs: 5,
        output: String::new(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn short_run_has_no_errors() -> anyhow::Result<()> {
    let base_url = start_server().await?;
    let results = loadgen::run(&one_second(base_url.clone(), 3)).await?;

    assert_eq!(results.latency.labels, vec!["list", "detail", "create", "update", "delete"]);
    assert!(results.error_rate.rate.iter().all(|r| *r == 0.0), "{:?}", results.error_rate);
    assert!(results.throughput.rps.iter().all(|r| *r > 0.0), "{:?}", results.throughput);
    assert!(results.latency.p95.iter().zip(&results.latency.p50).all(|(p95, p50)| p95 >= p50));
    assert_eq!(results.environment.vus, 3);
    assert_eq!(results.environment.duration, "1s");

    // every created item was deleted again, the seed is what remains
    let items: Vec<serde_json::Value> = reqwest::get(format!("{base_url}/items")).await?.json().await?;
    assert_eq!(items.len(), 10);
    Ok(())
}

#[tokio::test]
async fn unreachable_server_counts_errors() -> anyhow::Result<()> {
    let probe = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = probe.local_addr()?;
    drop(probe);

    let results = loadgen::run(&one_second(format!("http://{addr}"), 1)).await?;
    // create and list fail; the item steps never run
    assert_eq!(results.error_rate.rate, vec![1.0, 0.0, 1.0, 0.0, 0.0]);
    assert_eq!(results.throughput.rps[1], 0.0);
    Ok(())
}

#[tokio::test]
async fn report_is_written_as_json() -> anyhow::Result<()> {
    let base_url = start_server().await?;
    let results = loadgen::run(&one_second(base_url, 1)).await?;

    let path = std::env::temp_dir().join(format!("item_bench_results_{}.json", std::process::id()));
    let path = path.to_string_lossy().to_string();
    results.write_to(&path).await?;

    let back: BenchmarkResults = serde_json::from_slice(&tokio::fs::read(&path).await?)?;
    assert_eq!(back, results);
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}
