use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single payload. A 9x9 state message is a few kilobytes.
pub const MAX_FRAME_LEN: usize = 1 << 20;

const PREFIX_LEN: usize = 4;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("connection error: {0}")]
    Io(#[from] io::Error),

    #[error("connection closed inside a frame ({expected} bytes expected)")]
    Truncated { expected: usize },

    #[error("frame of {0} bytes exceeds the {MAX_FRAME_LEN}-byte limit")]
    TooLarge(usize),

    #[error("frame payload is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("frame payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn truncated(expected: usize) -> impl FnOnce(io::Error) -> FrameError {
    move |err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            FrameError::Truncated { expected }
        } else {
            FrameError::Io(err)
        }
    }
}

/// Reads one length-prefixed JSON message. `Ok(None)` means the peer closed
/// the connection cleanly between frames.
pub async fn read_message<R, T>(reader: &mut R) -> Result<Option<T>, FrameError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut prefix = [0u8; PREFIX_LEN];
    let first = reader.read(&mut prefix).await?;
    if first == 0 {
        return Ok(None);
    }
    if let Some(rest) = prefix.get_mut(first..) {
        reader
            .read_exact(rest)
            .await
            .map_err(truncated(PREFIX_LEN))?;
    }

    let len = usize::try_from(u32::from_be_bytes(prefix)).unwrap_or(usize::MAX);
    if len > MAX_FRAME_LEN {
        return Err(FrameError::TooLarge(len));
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await.map_err(truncated(len))?;

    let text = std::str::from_utf8(&payload)?;
    Ok(Some(serde_json::from_str(text)?))
}

pub async fn write_message<W, T>(writer: &mut W, message: &T) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin,
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_vec(message)?;
    let len = u32::try_from(payload.len())
        .ok()
        .filter(|_| payload.len() <= MAX_FRAME_LEN)
        .ok_or(FrameError::TooLarge(payload.len()))?;

    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}
