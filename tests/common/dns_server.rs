use hickory_proto::op::{Message, MessageType, OpCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// In-process UDP DNS server answering from a scripted name → addresses
/// table. Names it does not know get an empty NOERROR response; a silent
/// server never answers at all.
pub struct ScriptedDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ScriptedDnsServer {
    /// Keys are fully-qualified lowercase names (`"a.example."`).
    pub async fn start(
        answers: HashMap<String, Vec<Ipv4Addr>>,
    ) -> Result<(Self, SocketAddr), std::io::Error> {
        Self::start_with(Some(answers)).await
    }

    /// Binds a socket that never responds, for no-response paths.
    pub async fn start_silent() -> Result<(Self, SocketAddr), std::io::Error> {
        Self::start_with(None).await
    }

    async fn start_with(
        answers: Option<HashMap<String, Vec<Ipv4Addr>>>,
    ) -> Result<(Self, SocketAddr), std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let local_addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { break };
                        let Some(table) = &answers else { continue };
                        if let Some(response) = Self::build_response(&buf[..len], table) {
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Ok((
            Self {
                addr: local_addr,
                shutdown_tx: Some(shutdown_tx),
            },
            local_addr,
        ))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_response(
        query_bytes: &[u8],
        answers: &HashMap<String, Vec<Ipv4Addr>>,
    ) -> Option<Vec<u8>> {
        let query = Message::from_vec(query_bytes).ok()?;
        let question = query.queries().first()?.clone();
        let name = question.name().to_utf8().to_lowercase();

        let mut response = Message::new(query.id(), MessageType::Response, OpCode::Query);
        response.add_query(question.clone());

        if let Some(addrs) = answers.get(&name) {
            for addr in addrs {
                response.add_answer(Record::from_rdata(
                    question.name().clone(),
                    60,
                    RData::A(A(*addr)),
                ));
            }
        }

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        response.emit(&mut encoder).ok()?;
        Some(buf)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for ScriptedDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
