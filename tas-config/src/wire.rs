//! Textual wire format for a [`Schedule`](tas_core::Schedule): the
//! attribute-injection codec, `<duration> <g0> … <g7> <start_offset>
//! <stop_offset>` per window, windows whitespace-separated, terminated by
//! a single `0`.
//!
//! Grounded in ns-3's `operator<<`/`operator>>` pair for `SchudlePlan`.
//! Two bugs in that pair are not reproduced here:
//! - the serializer skips the last window in the plan (its loop runs
//!   `0..size-1`) — this implementation writes every window;
//! - the parser's `while (is.peek())` never advances its read position and
//!   indexes into a vector it just cleared — an infinite loop / immediate
//!   out-of-bounds access in the original. This implementation reads
//!   token-by-token to EOF or the sentinel `0`, whichever comes first.

use tas_core::{GateMask, Nanos, Schedule, Window, TOTAL_QOS_TAGS};

use crate::error::WireError;

/// Serialize `schedule` to the wire format, including the terminating `0`.
pub fn serialize(schedule: &Schedule) -> String {
    let mut out = String::new();
    for window in schedule.windows() {
        out.push_str(&window.duration.to_string());
        for gate in window.gate_mask {
            out.push(' ');
            out.push(if gate { '1' } else { '0' });
        }
        out.push(' ');
        out.push_str(&window.start_offset.to_string());
        out.push(' ');
        out.push_str(&window.stop_offset.to_string());
        out.push(' ');
    }
    out.push('0');
    out
}

/// Parse the wire format into a [`Schedule`]. Reads windows until the
/// sentinel `0` token or end of input, whichever comes first; rejects an
/// empty result, since a schedule must have at least one window.
pub fn parse(input: &str) -> Result<Schedule, WireError> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let mut cursor = 0usize;
    let mut windows = Vec::new();

    loop {
        let Some(&first) = tokens.get(cursor) else {
            break;
        };
        let duration = parse_i64(first, cursor)?;
        if duration == 0 {
            break;
        }
        cursor += 1;

        let mut gate_mask: GateMask = [false; TOTAL_QOS_TAGS];
        for gate in gate_mask.iter_mut() {
            let token = require_token(&tokens, cursor)?;
            let value = parse_i64(token, cursor)?;
            *gate = match value {
                0 => false,
                1 => true,
                other => return Err(WireError::InvalidGateValue { token_index: cursor, value: other }),
            };
            cursor += 1;
        }

        let start_offset: Nanos = parse_i64(require_token(&tokens, cursor)?, cursor)?;
        cursor += 1;
        let stop_offset: Nanos = parse_i64(require_token(&tokens, cursor)?, cursor)?;
        cursor += 1;

        windows.push(Window::new(duration, gate_mask, start_offset, stop_offset)?);
    }

    if windows.is_empty() {
        return Err(WireError::EmptySchedule);
    }

    Ok(Schedule::new(windows))
}

fn require_token<'a>(tokens: &[&'a str], index: usize) -> Result<&'a str, WireError> {
    tokens.get(index).copied().ok_or(WireError::UnexpectedEof)
}

fn parse_i64(token: &str, token_index: usize) -> Result<i64, WireError> {
    token.parse::<i64>().map_err(|source| WireError::NotAnInteger {
        token_index,
        token: token.to_string(),
        source,
    })
}
