//! Session - one connected bridge.
//!
//! ```text
//!   TCP lines ──▶ reader loop ──▶ Dispatcher ──▶ BridgeLink ──▶ outbound queue ──▶ writer task ──▶ TCP
//!                     │                               ▲
//!                     └──────── response lines ───────┘
//! ```
//!
//! Presence events are handled inline, so their notices leave in arrival
//! order. Purges run on their own tasks because they wait on responses that
//! only this reader can deliver.

use crate::config::BridgeConfig;
use crate::handlers::Dispatcher;
use crate::network::BridgeLink;
use afk_proto::{Inbound, Outbound, ProtocolError};
use chrono::Utc;
use futures_util::{Sink, SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};
use tracing::{debug, error, info, instrument, warn};

/// How long a closing session waits for queued lines to reach the bridge.
const WRITER_DRAIN: Duration = Duration::from_secs(2);

/// A bridge connection handler.
pub struct Session {
    addr: SocketAddr,
    stream: TcpStream,
    dispatcher: Arc<Dispatcher>,
    config: BridgeConfig,
}

impl Session {
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        dispatcher: Arc<Dispatcher>,
        config: BridgeConfig,
    ) -> Self {
        Self {
            addr,
            stream,
            dispatcher,
            config,
        }
    }

    /// Run the session until the bridge disconnects.
    #[instrument(skip(self), fields(peer = %self.addr), name = "bridge")]
    pub async fn run(self) -> anyhow::Result<()> {
        info!("Bridge connected");

        let framed = Framed::new(
            self.stream,
            LinesCodec::new_with_max_length(self.config.max_line_length),
        );
        let (sink, mut lines) = framed.split();
        let (tx, rx) = mpsc::channel::<Outbound>(self.config.outbound_queue);
        let link = Arc::new(BridgeLink::new(tx, self.config.request_timeout()));

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let mut writer = tokio::spawn(write_outbound(sink, rx, shutdown_rx));

        let result = loop {
            let line = match lines.next().await {
                Some(Ok(line)) => line,
                Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                    warn!(limit = self.config.max_line_length, "Oversized bridge line skipped");
                    continue;
                }
                Some(Err(LinesCodecError::Io(e))) => break Err(e.into()),
                None => break Ok(()),
            };

            let event = match Inbound::from_line(&line) {
                Ok(event) => event,
                Err(ProtocolError::EmptyLine) => continue,
                Err(e) => {
                    warn!(error = %e, "Malformed bridge line skipped");
                    continue;
                }
            };

            match event {
                Inbound::Response(response) => {
                    let request_id = response.request_id;
                    if !link.complete(response) {
                        debug!(request_id, "Response for unknown request dropped");
                    }
                }
                Inbound::Message(message) => {
                    let id = message.id.clone();
                    if let Err(e) = self.dispatcher.on_message(&link, message, Utc::now()).await {
                        warn!(message = %id, error = %e, code = e.error_code(), "Message handler failed");
                    }
                }
                Inbound::ScopeChosen(choice) => {
                    let user = choice.user.id.clone();
                    if let Err(e) = self
                        .dispatcher
                        .on_scope_chosen(link.as_ref(), choice, Utc::now())
                        .await
                    {
                        warn!(%user, error = %e, code = e.error_code(), "Scope handler failed");
                    }
                }
            }
        };

        link.disconnect();
        let _ = shutdown_tx.send(());
        if tokio::time::timeout(WRITER_DRAIN, &mut writer).await.is_err() {
            warn!("Outbound queue not drained, dropping remaining lines");
            writer.abort();
        }
        info!(
            away = self.dispatcher.registry().len(),
            "Bridge disconnected"
        );
        result
    }
}

/// Write queued lines until the queue ends.
///
/// Once `shutdown` fires the queue stops accepting new lines, and whatever
/// is already buffered is still written.
async fn write_outbound<S>(
    mut sink: S,
    mut rx: mpsc::Receiver<Outbound>,
    mut shutdown: oneshot::Receiver<()>,
) where
    S: Sink<String, Error = LinesCodecError> + Unpin,
{
    let mut closing = false;
    loop {
        let outbound = tokio::select! {
            outbound = rx.recv() => match outbound {
                Some(outbound) => outbound,
                None => break,
            },
            _ = &mut shutdown, if !closing => {
                rx.close();
                closing = true;
                continue;
            }
        };

        let line = match outbound.to_line() {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "Failed to encode outbound line");
                continue;
            }
        };
        if let Err(e) = sink.send(line).await {
            warn!(error = %e, "Bridge write failed");
            break;
        }
    }
}
