//! Connection handling
//!
//! Manages individual client connections, parsing RESP commands
//! and sending responses.

use crate::dispatch::Dispatcher;
use crate::protocol::{encode_to, parse_frame, RespValue, MAX_FRAME_SIZE};
use anyhow::bail;
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Connection handler
///
/// Generic over the stream so it runs on a `TcpStream` as well as on
/// in-memory streams in tests.
pub struct Connection<S> {
    /// Client stream
    stream: S,

    /// Read buffer
    read_buffer: BytesMut,

    /// Write buffer
    write_buffer: BytesMut,

    /// Buffered bytes allowed for a frame that is still incomplete
    max_frame_size: usize,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Create a new connection handler
    pub fn new(stream: S) -> Self {
        Self::with_max_frame_size(stream, MAX_FRAME_SIZE)
    }

    /// Create a connection handler that gives up on frames larger than `max_frame_size`
    pub fn with_max_frame_size(stream: S, max_frame_size: usize) -> Self {
        Connection {
            stream,
            read_buffer: BytesMut::with_capacity(4096),
            write_buffer: BytesMut::with_capacity(4096),
            max_frame_size,
        }
    }

    /// Handle the connection
    ///
    /// Reads commands from the client, dispatches them, and sends responses in order.
    /// Returns once the client disconnects or sends a frame that cannot be decoded.
    pub async fn handle(&mut self, dispatcher: &Dispatcher) -> anyhow::Result<()> {
        loop {
            // Answer every complete frame already buffered
            loop {
                match parse_frame(&mut self.read_buffer) {
                    Ok(Some(value)) => {
                        debug!("Parsed command: {}", value);

                        let response = dispatcher.dispatch(value);

                        debug!("Response: {}", response);

                        self.send_response(&response).await?;
                    }
                    Ok(None) if self.read_buffer.len() > self.max_frame_size => {
                        return self.close_with_protocol_error("frame too large").await;
                    }
                    Ok(None) => {
                        // Need more data
                        break;
                    }
                    Err(e) => {
                        // The stream cannot be resynchronised: report and close
                        return self.close_with_protocol_error(e).await;
                    }
                }
            }

            // Read data from the socket
            let n = self.stream.read_buf(&mut self.read_buffer).await?;

            // Connection closed
            if n == 0 {
                if self.read_buffer.is_empty() {
                    return Ok(());
                }
                bail!("connection reset by peer");
            }

            debug!("Read {} bytes", n);
        }
    }

    async fn close_with_protocol_error(
        &mut self,
        reason: impl std::fmt::Display,
    ) -> anyhow::Result<()> {
        warn!("Protocol error: {}", reason);
        let error_response = RespValue::simple_error(format!("ERR protocol error: {}", reason));
        self.send_response(&error_response).await
    }

    /// Send a response to the client
    async fn send_response(&mut self, response: &RespValue) -> anyhow::Result<()> {
        self.write_buffer.clear();
        encode_to(&mut self.write_buffer, response);

        self.stream.write_all(&self.write_buffer).await?;
        self.stream.flush().await?;

        Ok(())
    }
}
