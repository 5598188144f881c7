use endpoint_dns_domain::config::ServerConfig;
use endpoint_dns_infrastructure::dns::DnsMessageHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// UDP server lifecycle: `start` binds the worker sockets and serves,
/// `shutdown` cancels the workers and waits for them to drain.
pub struct DnsServer {
    cancel: CancellationToken,
    workers: JoinSet<()>,
}

impl DnsServer {
    pub fn start(config: &ServerConfig, handler: Arc<DnsMessageHandler>) -> anyhow::Result<Self> {
        let socket_addr: SocketAddr =
            format!("{}:{}", config.bind_address, config.dns_port).parse()?;
        let domain = if socket_addr.is_ipv4() {
            Domain::IPV4
        } else {
            Domain::IPV6
        };

        info!(
            bind_address = %socket_addr,
            workers = config.worker_threads,
            "Starting DNS server with SO_REUSEPORT"
        );

        let cancel = CancellationToken::new();
        let mut workers: JoinSet<()> = JoinSet::new();

        for worker_id in 0..config.worker_threads {
            let socket = Arc::new(create_udp_socket(domain, socket_addr)?);
            let handler = Arc::clone(&handler);
            let cancel = cancel.clone();
            workers.spawn(async move {
                run_udp_worker(socket, handler, cancel, worker_id).await;
            });
        }

        info!(
            "DNS server ready: {} workers on {}",
            config.worker_threads, socket_addr
        );

        Ok(Self { cancel, workers })
    }

    pub async fn shutdown(mut self) {
        info!("Stopping DNS server");
        self.cancel.cancel();
        while self.workers.join_next().await.is_some() {}
        info!("DNS server stopped");
    }
}

async fn run_udp_worker(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsMessageHandler>,
    cancel: CancellationToken,
    worker_id: usize,
) {
    let mut recv_buf = [0u8; 4096];

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            received = socket.recv_from(&mut recv_buf) => {
                match received {
                    Ok((len, peer)) => {
                        let datagram: Arc<[u8]> = Arc::from(&recv_buf[..len]);
                        let handler = Arc::clone(&handler);
                        let socket = Arc::clone(&socket);
                        tokio::spawn(async move {
                            if let Some(response) = handler.handle_datagram(&datagram).await {
                                if let Err(e) = socket.send_to(&response, peer).await {
                                    warn!(%peer, error = %e, "Failed to send DNS response");
                                }
                            }
                        });
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        error!(worker = worker_id, error = %e, "UDP recv error");
                    }
                }
            }
        }
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
