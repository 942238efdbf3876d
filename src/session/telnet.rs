//! Telnet option negotiation filter
//!
//! Controllers reached over a raw TCP terminal port open with telnet option
//! negotiation. The filter strips every `IAC` sequence from the byte stream
//! and refuses every option the remote offers or requests, which leaves the
//! session in plain NVT mode.

const IAC: u8 = 255;
const DONT: u8 = 254;
const DO: u8 = 253;
const WONT: u8 = 252;
const WILL: u8 = 251;
const SB: u8 = 250;
const SE: u8 = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Data,
    Iac,
    Negotiate(u8),
    Subnegotiation,
    SubnegotiationIac,
}

/// Incremental telnet filter, safe to feed with arbitrary packet boundaries
#[derive(Debug, Default)]
pub struct TelnetFilter {
    state: State,
}

/// Result of feeding one chunk of received bytes through the filter
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Filtered {
    /// Payload bytes with negotiation removed
    pub data: Vec<u8>,
    /// Negotiation replies to send back to the remote
    pub reply: Vec<u8>,
}

impl TelnetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter one chunk of received bytes
    pub fn feed(&mut self, input: &[u8]) -> Filtered {
        let mut out = Filtered::default();

        for &byte in input {
            self.state = match (self.state, byte) {
                (State::Data, IAC) => State::Iac,
                (State::Data, b) => {
                    out.data.push(b);
                    State::Data
                }
                (State::Iac, IAC) => {
                    out.data.push(IAC);
                    State::Data
                }
                (State::Iac, cmd @ (DO | DONT | WILL | WONT)) => State::Negotiate(cmd),
                (State::Iac, SB) => State::Subnegotiation,
                // NOP, GA and the other two-byte commands carry no payload
                (State::Iac, _) => State::Data,
                (State::Negotiate(cmd), option) => {
                    match cmd {
                        DO => out.reply.extend_from_slice(&[IAC, WONT, option]),
                        WILL => out.reply.extend_from_slice(&[IAC, DONT, option]),
                        _ => {}
                    }
                    State::Data
                }
                (State::Subnegotiation, IAC) => State::SubnegotiationIac,
                (State::Subnegotiation, _) => State::Subnegotiation,
                (State::SubnegotiationIac, SE) => State::Data,
                (State::SubnegotiationIac, _) => State::Subnegotiation,
            };
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        let mut filter = TelnetFilter::new();
        let out = filter.feed(b"Password: ");

        assert_eq!(out.data, b"Password: ");
        assert!(out.reply.is_empty());
    }

    #[test]
    fn test_options_are_refused() {
        let mut filter = TelnetFilter::new();
        // DO ECHO, WILL SUPPRESS-GO-AHEAD, DONT LINEMODE
        let out = filter.feed(&[IAC, DO, 1, IAC, WILL, 3, IAC, DONT, 34, b'o', b'k']);

        assert_eq!(out.data, b"ok");
        assert_eq!(out.reply, vec![IAC, WONT, 1, IAC, DONT, 3]);
    }

    #[test]
    fn test_sequence_split_across_reads() {
        let mut filter = TelnetFilter::new();

        let first = filter.feed(&[b'a', IAC]);
        let second = filter.feed(&[DO]);
        let third = filter.feed(&[24, b'b']);

        assert_eq!(first.data, b"a");
        assert!(second.data.is_empty());
        assert!(second.reply.is_empty());
        assert_eq!(third.data, b"b");
        assert_eq!(third.reply, vec![IAC, WONT, 24]);
    }

    #[test]
    fn test_subnegotiation_is_dropped() {
        let mut filter = TelnetFilter::new();
        let out = filter.feed(&[b'x', IAC, SB, 24, 1, IAC, SE, b'y']);

        assert_eq!(out.data, b"xy");
        assert!(out.reply.is_empty());
    }

    #[test]
    fn test_escaped_iac_is_literal() {
        let mut filter = TelnetFilter::new();
        let out = filter.feed(&[IAC, IAC]);

        assert_eq!(out.data, vec![IAC]);
    }
}
