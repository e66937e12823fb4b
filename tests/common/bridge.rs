//! Fake platform bridge.
//!
//! Sends inbound events as JSON lines and reads what afkd asks for.

use afk_proto::{
    BridgeRequest, BridgeResponse, Inbound, MessageDescriptor, Notice, Outbound, ResponseStatus,
};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A test bridge connection.
pub struct TestBridge {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

#[allow(dead_code)]
impl TestBridge {
    /// Connect to a test daemon.
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }

    /// Send a raw line.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Send an inbound event.
    pub async fn send(&mut self, event: &Inbound) -> anyhow::Result<()> {
        self.send_raw(&event.to_line()?).await
    }

    /// Answer a request.
    pub async fn respond(&mut self, request_id: u64, status: ResponseStatus) -> anyhow::Result<()> {
        self.send(&Inbound::Response(BridgeResponse { request_id, status }))
            .await
    }

    /// Answer a request successfully with `messages`.
    pub async fn respond_ok(
        &mut self,
        request_id: u64,
        messages: Vec<MessageDescriptor>,
    ) -> anyhow::Result<()> {
        self.respond(request_id, ResponseStatus::Ok { messages }).await
    }

    /// Half-close the connection; afkd sees EOF but may still write.
    pub async fn close_sending(&mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }

    /// Receive a single line from afkd.
    pub async fn recv(&mut self) -> anyhow::Result<Outbound> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Outbound> {
        let mut line = String::new();
        let read = timeout(dur, self.reader.read_line(&mut line)).await??;
        if read == 0 {
            anyhow::bail!("afkd closed the connection");
        }
        Ok(Outbound::from_line(&line)?)
    }

    /// Receive a line that must be a notice.
    pub async fn recv_notice(&mut self) -> anyhow::Result<Notice> {
        match self.recv().await? {
            Outbound::Notice(notice) => Ok(notice),
            other => anyhow::bail!("expected notice, got {other:?}"),
        }
    }

    /// Receive a line that must be a request.
    pub async fn recv_request(&mut self) -> anyhow::Result<BridgeRequest> {
        match self.recv().await? {
            Outbound::Request(request) => Ok(request),
            other => anyhow::bail!("expected request, got {other:?}"),
        }
    }
}
