//! Incremental server-sent events decoder.
//!
//! Bytes are buffered until a blank line closes an event, so multi-byte
//! UTF-8 sequences split across network reads are decoded intact.

/// Splits a byte stream into the `data` payloads of its events.
#[derive(Debug, Default)]
pub struct SseDecoder {
  buffer: Vec<u8>,
}

impl SseDecoder {
  /// Creates an empty decoder.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Feeds `bytes` and returns the payloads of every event completed by them.
  pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
    self.buffer.extend_from_slice(bytes);

    let mut payloads = Vec::new();
    while let Some((end, separator_len)) = next_boundary(&self.buffer) {
      let event: Vec<u8> = self.buffer.drain(..end + separator_len).take(end).collect();
      if let Some(data) = event_data(&event) {
        payloads.push(data);
      }
    }
    payloads
  }

  /// Flushes a trailing event that was not terminated by a blank line.
  pub fn finish(self) -> Option<String> {
    event_data(&self.buffer)
  }
}

/// Position and length of the earliest event separator.
fn next_boundary(buffer: &[u8]) -> Option<(usize, usize)> {
  let lf = find(buffer, b"\n\n").map(|idx| (idx, 2));
  let crlf = find(buffer, b"\r\n\r\n").map(|idx| (idx, 4));

  match (lf, crlf) {
    (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
    (a, b) => a.or(b),
  }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
  haystack.windows(needle.len()).position(|window| window == needle)
}

/// Joins the `data:` lines of one event; `None` when the event carries none.
fn event_data(event: &[u8]) -> Option<String> {
  let text = String::from_utf8_lossy(event);

  let lines: Vec<&str> = text
    .split('\n')
    .map(|line| line.trim_end_matches('\r'))
    .filter_map(|line| line.strip_prefix("data:"))
    .map(|value| value.strip_prefix(' ').unwrap_or(value))
    .collect();

  if lines.is_empty() { None } else { Some(lines.join("\n")) }
}
