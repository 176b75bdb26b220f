use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::watch;

use crate::cli::Command;
use crate::config::Config;
use crate::database::{LibsqlStore, ServerStore};
use crate::monitoring::{CheckCycle, Scheduler, TnfsChecker};
use crate::render;
use crate::validation::normalize_server_host;

/// Dependencies shared by the commands that touch the store
struct Service {
    store: Arc<dyn ServerStore>,
    cycle: Arc<CheckCycle>,
}

impl Service {
    async fn open(config: &Config) -> Result<Self> {
        let store: Arc<dyn ServerStore> = Arc::new(
            LibsqlStore::open(&config.database.path, config.database.pool_size)
                .await
                .with_context(|| format!("Failed to open database {}", config.database.path.display()))?,
        );
        let checker = Arc::new(TnfsChecker::new(config.probe_config()));
        let cycle = Arc::new(CheckCycle::new(store.clone(), checker, config.monitor.concurrency));

        Ok(Self { store, cycle })
    }
}

pub async fn run(command: Command, config: Config) -> Result<()> {
    match command {
        Command::Config => {
            print!("{config}");
            Ok(())
        }
        Command::Probe { host } => probe(&host, &config).await,
        Command::Serve => serve(Service::open(&config).await?, &config).await,
        Command::Check => check(Service::open(&config).await?).await,
        Command::Add { host } => add(Service::open(&config).await?, &host).await,
        Command::Remove { id } => remove(Service::open(&config).await?, id).await,
        Command::Reorder { ids } => reorder(Service::open(&config).await?, &ids).await,
        Command::List { json } => list(Service::open(&config).await?, json).await,
    }
}

async fn probe(host: &str, config: &Config) -> Result<()> {
    let host = normalize_server_host(host)?;
    let reachability = tnfs_probe::probe_host(&host, &config.probe_config()).await;
    println!("{}", render::render_probe(&host, reachability));
    Ok(())
}

async fn serve(service: Service, config: &Config) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let period = Duration::from_secs(config.monitor.interval_seconds);

    tracing::info!("Checking TNFS servers every {}s", config.monitor.interval_seconds);
    let handle = Scheduler::new(service.cycle, period).spawn(shutdown_rx);

    tokio::signal::ctrl_c().await.context("Failed to listen for ctrl-c")?;
    tracing::info!("Shutdown requested, finishing current cycle");
    let _ = shutdown_tx.send(true);

    handle.await.context("Scheduler task failed")?;
    Ok(())
}

async fn check(service: Service) -> Result<()> {
    let report = service.cycle.run_once().await?;
    println!("{report}");
    Ok(())
}

async fn add(service: Service, host: &str) -> Result<()> {
    let host = normalize_server_host(host)?;
    let reachability = service.cycle.check_server(&host).await;
    let record = service.store.add_server(&host, Utc::now(), reachability).await?;

    println!("Added server {} ({})", record.id, render::render_probe(&record.server_url, reachability));
    Ok(())
}

async fn remove(service: Service, id: i64) -> Result<()> {
    service.store.delete_server(id).await?;
    println!("Removed server {id}");
    Ok(())
}

async fn reorder(service: Service, ids: &[i64]) -> Result<()> {
    service.store.reorder(ids).await?;
    print!("{}", render::render_table(&service.store.list_servers().await?, Utc::now()));
    Ok(())
}

async fn list(service: Service, json: bool) -> Result<()> {
    let servers = service.store.list_servers().await?;
    let now = Utc::now();

    if json {
        println!("{}", render::render_json(&servers, now)?);
    } else {
        print!("{}", render::render_table(&servers, now));
    }
    Ok(())
}
