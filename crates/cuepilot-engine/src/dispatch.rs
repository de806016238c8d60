//! OSC dispatch over UDP with bounded retry.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::UdpSocket;
use tracing::{info, warn};

use cuepilot_core::CueCommand;
use cuepilot_protocol::{address, OscMessage};

use crate::error::{EngineError, Result};
use crate::retry::RetryPolicy;

/// Pause after a successful primary send before the auxiliary messages, so
/// the receiver has processed the selection.
const SETTLE: Duration = Duration::from_millis(100);

/// Thin wrapper around one UDP socket aimed at the receiver for the whole
/// run.
///
/// The transport is connectionless and unacknowledged: a successful
/// [`send`](OscSender::send) means the local send call completed, not that
/// the receiver got (or acted on) the datagram.
pub struct OscSender {
    socket: UdpSocket,
    target: SocketAddr,
}

impl OscSender {
    /// Bind an ephemeral local socket aimed at `target`.
    pub async fn bind(target: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", 0)).await?;
        Ok(Self { socket, target })
    }

    pub async fn send(&self, message: &OscMessage) -> std::io::Result<()> {
        self.socket.send_to(&message.encode(), self.target).await?;
        Ok(())
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

/// The primary message a command retries, plus the fire-and-forget
/// auxiliaries that follow a successful primary.
fn wire_plan(command: &CueCommand) -> (OscMessage, Vec<OscMessage>) {
    match command {
        CueCommand::ConnectColumn { column } => (
            OscMessage::int(address::column_connect(*column), address::CONNECT),
            Vec::new(),
        ),
        CueCommand::DisconnectColumn { column } => (
            OscMessage::int(address::column_disconnect(*column), address::CONNECT),
            Vec::new(),
        ),
        CueCommand::PlayClip { layer, clip } => (
            OscMessage::int(address::clip_select(*layer, *clip), address::CONNECT),
            vec![
                OscMessage::int(
                    address::clip_play_direction(*layer, *clip),
                    address::PLAY_FORWARD,
                ),
                OscMessage::int(
                    address::selected_clip_play_direction(),
                    address::PLAY_FORWARD,
                ),
                OscMessage::int(address::clip_connect(*layer, *clip), address::CONNECT),
            ],
        ),
    }
}

/// Sends one cue's command, retrying the primary message within the policy
/// bounds. Never panics; exhaustion is an ordinary error the orchestrator
/// hands to the failure sink.
pub struct Dispatcher {
    sender: OscSender,
    policy: RetryPolicy,
}

impl Dispatcher {
    pub fn new(sender: OscSender, policy: RetryPolicy) -> Self {
        Self { sender, policy }
    }

    pub async fn dispatch(&self, command: &CueCommand) -> Result<()> {
        let (primary, aux) = wire_plan(command);

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match self.sender.send(&primary).await {
                Ok(()) => {
                    info!(message = %primary, attempt = attempts, "cue sent");
                    break;
                }
                Err(e) if self.policy.should_retry(attempts) => {
                    warn!(
                        message = %primary,
                        attempt = attempts,
                        max = self.policy.max_attempts,
                        "send failed, retrying: {e}"
                    );
                    tokio::time::sleep(self.policy.delay).await;
                }
                Err(e) => {
                    return Err(EngineError::RetryExhausted { attempts, last: e });
                }
            }
        }

        if !aux.is_empty() {
            tokio::time::sleep(SETTLE).await;
            for message in &aux {
                // Auxiliary messages are independent of the retry budget.
                if let Err(e) = self.sender.send(message).await {
                    warn!(message = %message, "auxiliary send failed: {e}");
                }
            }
        }
        Ok(())
    }
}
