use ckb_rosetta_app_config::{ExitCode, RunArgs};
use ckb_rosetta_client::RpcClient;
use ckb_rosetta_logger::info;
use ckb_rosetta_rpc::{RpcServer, ServiceBuilder};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub fn run(args: RunArgs, version: &str) -> Result<(), ExitCode> {
    let config = Arc::new(*args.config);
    info!("ckb-rosetta version: {}", version);
    info!("config file: {}", args.config_file.display());

    let client = RpcClient::new(
        &config.node.rpc_url,
        Duration::from_secs(config.rpc.request_timeout_secs),
    )
    .map_err(|err| {
        eprintln!("Config Error: {err}");
        ExitCode::Config
    })?;
    info!(
        "serving {} through the node at {}",
        config.network.as_str(),
        client.url()
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("GlobalRt")
        .build()?;

    let (stop_tx, mut stop_rx) = watch::channel(false);
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(true);
    })
    .map_err(|err| {
        eprintln!("Error setting Ctrl-C handler: {err}");
        ExitCode::Failure
    })?;

    let router = ServiceBuilder::new(Arc::clone(&config), Arc::new(client))
        .enable_all()
        .build();
    let mut server_stop = stop_rx.clone();
    runtime.block_on(async {
        let server = RpcServer::start(&config.rpc, router, async move {
            let _ = server_stop.changed().await;
        })
        .await?;
        info!("ckb-rosetta started on {}", server.http_address);
        let _ = stop_rx.changed().await;
        info!("Trapped exit signal, exiting...");
        Ok::<_, ExitCode>(())
    })?;

    // In flight requests get one request timeout to complete.
    runtime.shutdown_timeout(Duration::from_secs(config.rpc.request_timeout_secs));
    info!("ckb-rosetta shutdown");
    Ok(())
}
