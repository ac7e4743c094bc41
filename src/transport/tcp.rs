use std::io::ErrorKind;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration, Instant};

use crate::protocol::Message;
use crate::transport::Transport;

/// Default timeout for a single send or receive.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Frames larger than this are refused in both directions.
const MAX_MESSAGE_SIZE: u32 = 64 * 1024;

/// Default idle time after which the connection is considered dead.
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(900);

/// Length-prefixed bincode frames over TCP: a 4-byte big-endian length
/// followed by the serialized [`Message`].
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    max_message_size: u32,
    idle_timeout: Duration,
    last_activity: Instant,
}

fn map_io(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof | ErrorKind::BrokenPipe => anyhow::anyhow!("Connection closed by peer"),
        ErrorKind::ConnectionReset => anyhow::anyhow!("Connection reset by peer"),
        _ => anyhow::anyhow!("I/O error: {}", e),
    }
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, DEFAULT_TIMEOUT, MAX_MESSAGE_SIZE, DEFAULT_IDLE_TIMEOUT)
    }

    /// Human moves can take a while, so timeouts are generous by default;
    /// tests and AI-only games may want tighter ones.
    pub fn with_config(
        stream: TcpStream,
        timeout_duration: Duration,
        max_message_size: u32,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            stream,
            timeout_duration,
            max_message_size,
            idle_timeout,
            last_activity: Instant::now(),
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(Self::new(stream))
    }

    fn check_idle(&self) -> anyhow::Result<()> {
        if self.last_activity.elapsed() > self.idle_timeout {
            return Err(anyhow::anyhow!("Connection idle timeout exceeded"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        self.check_idle()?;
        let data = bincode::serialize(&msg)
            .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
        if data.len() as u64 > self.max_message_size as u64 {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                data.len(),
                self.max_message_size
            ));
        }

        let stream = &mut self.stream;
        let send_op = async {
            stream.write_all(&(data.len() as u32).to_be_bytes()).await.map_err(map_io)?;
            stream.write_all(&data).await.map_err(map_io)?;
            stream.flush().await.map_err(map_io)
        };
        timeout(self.timeout_duration, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.timeout_duration))??;
        self.last_activity = Instant::now();
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        self.check_idle()?;
        let max = self.max_message_size;
        let stream = &mut self.stream;
        let recv_op = async {
            let mut len_buf = [0u8; 4];
            stream.read_exact(&mut len_buf).await.map_err(map_io)?;
            let len = u32::from_be_bytes(len_buf);
            if len == 0 {
                return Err(anyhow::anyhow!("Invalid message length: 0"));
            }
            if len > max {
                return Err(anyhow::anyhow!("Message too large: {} bytes (max: {})", len, max));
            }
            let mut buf = vec![0u8; len as usize];
            stream.read_exact(&mut buf).await.map_err(map_io)?;
            bincode::deserialize::<Message>(&buf)
                .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))
        };
        let msg = timeout(self.timeout_duration, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", self.timeout_duration))??;
        self.last_activity = Instant::now();
        Ok(msg)
    }
}
