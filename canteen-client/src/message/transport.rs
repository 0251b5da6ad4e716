use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::message::MessageError;
use shared::message::PushMessage;

/// Largest payload accepted from the feed
pub const MAX_PAYLOAD_LEN: usize = 1024 * 1024;

/// Transport abstraction for the real-time event feed
///
/// Frame layout:
///
/// ```text
/// [name_len: u8][name: utf-8][request_id: 16 bytes][payload_len: u32 LE][payload]
/// ```
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn read_message(&self) -> Result<PushMessage, MessageError>;
    async fn write_message(&self, msg: &PushMessage) -> Result<(), MessageError>;
}

/// TCP Transport Implementation
#[derive(Debug, Clone)]
pub struct TcpTransport {
    reader: Arc<Mutex<OwnedReadHalf>>,
    writer: Arc<Mutex<OwnedWriteHalf>>,
}

impl TcpTransport {
    pub async fn connect(addr: &str) -> Result<Self, MessageError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| MessageError::Connection(format!("{}: {}", addr, e)))?;
        Ok(Self::from_stream(stream))
    }

    pub fn from_stream(stream: TcpStream) -> Self {
        let (reader, writer) = stream.into_split();
        Self {
            reader: Arc::new(Mutex::new(reader)),
            writer: Arc::new(Mutex::new(writer)),
        }
    }
}

/// Encode one frame
pub fn encode_frame(msg: &PushMessage) -> Result<Vec<u8>, MessageError> {
    let name = msg.event.as_bytes();
    let name_len = u8::try_from(name.len())
        .map_err(|_| MessageError::InvalidMessage("Event name too long".into()))?;
    if msg.payload.len() > MAX_PAYLOAD_LEN {
        return Err(MessageError::InvalidMessage("Payload too large".into()));
    }

    let mut data = Vec::with_capacity(1 + name.len() + 16 + 4 + msg.payload.len());
    data.push(name_len);
    data.extend_from_slice(name);
    data.extend_from_slice(msg.request_id.as_bytes());
    data.extend_from_slice(&(msg.payload.len() as u32).to_le_bytes());
    data.extend_from_slice(&msg.payload);
    Ok(data)
}

#[async_trait]
impl Transport for TcpTransport {
    async fn read_message(&self) -> Result<PushMessage, MessageError> {
        let mut reader = self.reader.lock().await;

        // Read event name (length-prefixed)
        let mut len_buf = [0u8; 1];
        reader
            .read_exact(&mut len_buf)
            .await
            .map_err(MessageError::Io)?;
        let mut name_buf = vec![0u8; len_buf[0] as usize];
        reader
            .read_exact(&mut name_buf)
            .await
            .map_err(MessageError::Io)?;
        let event = String::from_utf8(name_buf)
            .map_err(|_| MessageError::InvalidMessage("Event name is not UTF-8".into()))?;

        // Read Request ID (16 bytes)
        let mut uuid_buf = [0u8; 16];
        reader
            .read_exact(&mut uuid_buf)
            .await
            .map_err(MessageError::Io)?;
        let request_id = Uuid::from_bytes(uuid_buf);

        // Read payload length (4 bytes)
        let mut payload_len = [0u8; 4];
        reader
            .read_exact(&mut payload_len)
            .await
            .map_err(MessageError::Io)?;
        let len = u32::from_le_bytes(payload_len) as usize;
        if len > MAX_PAYLOAD_LEN {
            return Err(MessageError::InvalidMessage(format!(
                "Payload too large: {} bytes",
                len
            )));
        }

        // Read payload
        let mut payload = vec![0u8; len];
        reader
            .read_exact(&mut payload)
            .await
            .map_err(MessageError::Io)?;

        Ok(PushMessage {
            request_id,
            event,
            payload,
        })
    }

    async fn write_message(&self, msg: &PushMessage) -> Result<(), MessageError> {
        let data = encode_frame(msg)?;
        let mut writer = self.writer.lock().await;
        writer.write_all(&data).await.map_err(MessageError::Io)?;
        Ok(())
    }
}
