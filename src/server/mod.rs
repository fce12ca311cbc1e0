//! Server module
//!
//! Owns the listening socket and drives the accept loop. Startup validates
//! the serving root before any socket exists; shutdown is a future the
//! caller supplies.

pub mod signal;

use std::future::Future;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};

use crate::config::{AppState, Config};
use crate::handler;
use crate::logger;

/// Errors that prevent the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("serving root '{}' does not exist", .0.display())]
    RootMissing(PathBuf),
    #[error("serving root '{}' is not a directory", .0.display())]
    RootNotDirectory(PathBuf),
    #[error("invalid listen address: {0}")]
    InvalidAddress(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
}

/// HTTP server bound to its listening socket
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Validate the serving root and bind the listening socket
    ///
    /// The root directory is checked before any socket is created, so a
    /// misconfigured root fails fast without occupying the port.
    pub fn bind(config: &Config) -> Result<Self, StartupError> {
        let root = PathBuf::from(&config.server.root);
        let root = root
            .canonicalize()
            .map_err(|_| StartupError::RootMissing(root))?;
        if !root.is_dir() {
            return Err(StartupError::RootNotDirectory(root));
        }

        let addr = config
            .get_socket_addr()
            .map_err(StartupError::InvalidAddress)?;
        let listener =
            create_reusable_listener(addr).map_err(|source| StartupError::Bind { addr, source })?;
        let state = Arc::new(AppState::new(config.clone(), root));

        Ok(Self { listener, state })
    }

    /// Address the listener is actually bound to
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Canonicalized directory files are served from
    pub fn root(&self) -> &Path {
        &self.state.root
    }

    /// Serve connections until `shutdown` resolves
    ///
    /// Each accepted connection runs on its own task; a failed accept is
    /// logged and the loop keeps going.
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let Self { listener, state } = self;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            spawn_connection(stream, peer_addr, Arc::clone(&state));
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }

                () = &mut shutdown => {
                    logger::log_shutdown();
                    break;
                }
            }
        }
    }
}

/// Serve a single connection in a spawned task
fn spawn_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&state), peer_addr)),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}

/// Create a `TcpListener` with `SO_REUSEPORT` and `SO_REUSEADDR` enabled.
///
/// Allows immediate rebinding of the port after a restart, including while
/// old connections sit in TIME_WAIT.
fn create_reusable_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn test_config(root: &Path) -> Config {
        let mut config = Config::load_from("no-such-config").unwrap();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.server.root = root.to_string_lossy().into_owned();
        config.logging.access_log = false;
        config
    }

    #[tokio::test]
    async fn test_bind_fails_when_root_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = test_config(&dir.path().join("nope"));

        let err = Server::bind(&config).err().expect("bind must fail");
        assert!(matches!(err, StartupError::RootMissing(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_bind_fails_when_root_is_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("root.txt");
        std::fs::write(&file, b"not a directory").expect("write file");
        let config = test_config(&file);

        let err = Server::bind(&config).err().expect("bind must fail");
        assert!(matches!(err, StartupError::RootNotDirectory(_)));
    }

    #[tokio::test]
    async fn test_range_round_trip_and_shutdown() {
        let dir = tempfile::tempdir().expect("tempdir");
        let content: Vec<u8> = (0..64u8).map(|i| b'a' + (i % 26)).collect();
        std::fs::write(dir.path().join("blog.db"), &content).expect("write fixture");

        let server = Server::bind(&test_config(dir.path())).expect("bind");
        let addr = server.local_addr().expect("local addr");

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let task = tokio::spawn(server.run(async move {
            let _ = rx.await;
        }));

        let mut stream = TcpStream::connect(addr).await.expect("connect");
        stream
            .write_all(
                b"GET /blog.db HTTP/1.1\r\n\
                  Host: localhost\r\n\
                  Range: bytes=0-9\r\n\
                  Connection: close\r\n\r\n",
            )
            .await
            .expect("send request");

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.expect("read response");
        let response = String::from_utf8_lossy(&raw).to_lowercase();

        assert!(response.starts_with("http/1.1 206"));
        assert!(response.contains("content-range: bytes 0-9/64"));
        assert!(response.contains("content-length: 10"));
        assert!(response.ends_with("abcdefghij"));

        tx.send(()).expect("signal shutdown");
        task.await.expect("server task joins");
    }
}
