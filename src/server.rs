use axum::{Extension, Router, routing::get};
use std::{io, net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Notify};

use crate::{api, spotify::auth::SharedAuth};

pub fn router(state: SharedAuth) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .route("/token", get(api::token))
        .layer(Extension(state))
}

/// Binds the callback listener so address problems surface before the
/// browser is opened.
pub async fn bind(addr: &str) -> io::Result<TcpListener> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    TcpListener::bind(&addr).await
}

/// Serves the callback routes until `shutdown` is notified.
pub async fn serve(
    listener: TcpListener,
    state: SharedAuth,
    shutdown: Arc<Notify>,
) -> io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.notified().await })
        .await
}
