//! `Content-Length` framing of JSON-RPC messages.

use serde_json::Value as JsonValue;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{OracleError, Result};

/// Writes one framed message.
pub async fn write_message<W>(writer: &mut W, message: &JsonValue) -> Result<()>
where
	W: AsyncWrite + Unpin,
{
	let json = serde_json::to_string(message)?;
	let msg = format!("Content-Length: {}\r\n\r\n{}", json.len(), json);
	writer.write_all(msg.as_bytes()).await?;
	writer.flush().await?;
	Ok(())
}

/// Reads one framed message; `None` on a clean EOF before any header.
///
/// `buf` is scratch space for header lines, reused across calls.
pub async fn read_message<R>(reader: &mut R, buf: &mut String) -> Result<Option<JsonValue>>
where
	R: AsyncBufRead + Unpin,
{
	let mut content_length: Option<usize> = None;
	let mut saw_header = false;
	loop {
		buf.clear();
		let bytes_read = reader.read_line(buf).await?;
		if bytes_read == 0 {
			return if saw_header { Err(OracleError::Exited) } else { Ok(None) };
		}
		saw_header = true;

		let line = buf.trim();
		if line.is_empty() {
			break;
		}

		if let Some(len_str) = line.strip_prefix("Content-Length: ") {
			content_length = len_str.parse().ok();
		}
	}

	let length = content_length.ok_or_else(|| OracleError::Protocol("missing Content-Length".into()))?;

	let mut body = vec![0u8; length];
	reader.read_exact(&mut body).await?;

	let json: JsonValue = serde_json::from_slice(&body)?;
	Ok(Some(json))
}
