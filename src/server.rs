//! TCP Server
//!
//! Owns the listener and the one [`Store`] every connection shares. Each
//! accepted socket gets its own task; there is no connection cap.

use crate::commands::CommandHandler;
use crate::connection::{handle_connection, ConnectionStats};
use crate::storage::Store;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, ToSocketAddrs};
use tracing::{error, info};

/// A bound, not yet running, server.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    store: Arc<Store>,
    stats: Arc<ConnectionStats>,
}

impl Server {
    /// Binds the listener and creates the server's store.
    pub async fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;

        Ok(Self {
            listener,
            store: Arc::new(Store::new()),
            stats: Arc::new(ConnectionStats::new()),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle to the shared store.
    pub fn store(&self) -> Arc<Store> {
        Arc::clone(&self.store)
    }

    pub fn stats(&self) -> Arc<ConnectionStats> {
        Arc::clone(&self.stats)
    }

    /// Accepts connections forever.
    ///
    /// A failed `accept` is logged and the loop carries on.
    pub async fn run(self) {
        if let Ok(addr) = self.listener.local_addr() {
            info!(%addr, "Accepting connections");
        }

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let handler = CommandHandler::new(Arc::clone(&self.store));
                    let stats = Arc::clone(&self.stats);

                    tokio::spawn(async move {
                        handle_connection(stream, addr, handler, stats).await;
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
