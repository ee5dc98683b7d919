use axum::Router;
use ckb_rosetta_app_config::RpcConfig;
use ckb_rosetta_logger::{error, info};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

#[derive(Debug)]
pub struct RpcServer {
    pub http_address: SocketAddr,
}

impl RpcServer {
    /// Binds the listen address and serves `router` on the current tokio runtime.
    ///
    /// ## Parameters
    ///
    /// * `config` - RPC config options.
    /// * `router` - The API modules. See [ServiceBuilder](../service_builder/struct.ServiceBuilder.html).
    /// * `shutdown` - Stops accepting requests once resolved, in flight requests still complete.
    pub async fn start<F>(config: &RpcConfig, router: Router, shutdown: F) -> io::Result<Self>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = router
            .layer(CorsLayer::permissive())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            )));

        let listener = TcpListener::bind(&config.listen_address).await?;
        let http_address = listener.local_addr()?;
        info!("Listen HTTP RPCServer on address: {}", http_address);

        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!("HTTP RPCServer error: {}", err);
            }
            info!("HTTP RPCServer stopped");
        });

        Ok(Self { http_address })
    }
}
