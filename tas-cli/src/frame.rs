//! A minimal `Frame` standing in for whatever a host framework's packet
//! type looks like, used only by this demo driver and its tests.

use tas_core::Frame;

#[derive(Debug, Clone)]
pub struct DemoFrame {
    pub arrival: i64,
    pub size_bytes: u64,
    pub tag: Option<u8>,
}

impl Frame for DemoFrame {
    fn size_bytes(&self) -> Option<u64> {
        Some(self.size_bytes)
    }

    fn priority_tag(&self) -> Option<u8> {
        self.tag
    }

    fn set_priority_tag(&mut self, priority: u8) {
        self.tag = Some(priority);
    }
}

/// One line of the frame trace file: `<arrival_ns> <size_bytes> [priority_tag]`.
pub fn parse_trace_line(line: &str) -> Option<DemoFrame> {
    let mut parts = line.split_whitespace();
    let arrival = parts.next()?.parse().ok()?;
    let size_bytes = parts.next()?.parse().ok()?;
    let tag = match parts.next() {
        Some(token) => Some(token.parse().ok()?),
        None => None,
    };
    Some(DemoFrame { arrival, size_bytes, tag })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_without_tag() {
        let frame = parse_trace_line("1000 64").unwrap();
        assert_eq!(frame.arrival, 1000);
        assert_eq!(frame.size_bytes, 64);
        assert_eq!(frame.tag, None);
    }

    #[test]
    fn parses_line_with_tag() {
        let frame = parse_trace_line("1000 64 5").unwrap();
        assert_eq!(frame.tag, Some(5));
    }

    #[test]
    fn rejects_malformed_line() {
        assert!(parse_trace_line("not-a-number 64").is_none());
    }
}
