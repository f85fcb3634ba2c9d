//! The four-byte command protocol.
//!
//! A request is whatever one socket read delivers. The first four bytes name
//! the operation; anything after them is that operation's payload. Replies
//! are raw bytes written straight back on the same connection — there is no
//! length prefix, delimiter, or other framing on the wire.

use crate::store::JointStore;

/// Command code for reading the joint-name table.
pub const GET_NAMES: &[u8; 4] = b"getn";
/// Command code for reading the current angle frame.
pub const GET_ANGLES: &[u8; 4] = b"getj";
/// Command code for replacing the angle frame.
pub const SET_ANGLES: &[u8; 4] = b"setj";

/// Reply sent when a `setj` frame is accepted.
pub const REPLY_ACCEPTED: &[u8] = b"succeed";
/// Reply sent when a `setj` frame has the wrong length.
pub const REPLY_REJECTED: &[u8] = b"failed";

/// One classified inbound message.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'m> {
    /// `getn`: enumerate joint names. Trailing request bytes are ignored.
    GetNames,
    /// `getj`: read the current angle frame. Trailing request bytes are
    /// ignored.
    GetAngles,
    /// `setj`: replace the angle frame with the payload.
    SetAngles { payload: &'m [u8] },
    /// A message shorter than four bytes, echoed back unchanged. This is a
    /// compatibility behavior inherited from the original deployment, not an
    /// error path; peers may use it as a cheap liveness probe.
    Echo { raw: &'m [u8] },
    /// A four-byte code this protocol does not define.
    Unknown,
}

impl<'m> Command<'m> {
    /// Classifies one inbound message. Command codes are case-sensitive
    /// ASCII.
    pub fn parse(message: &'m [u8]) -> Self {
        if message.len() < GET_NAMES.len() {
            return Command::Echo { raw: message };
        }
        let (code, payload) = message.split_at(GET_NAMES.len());
        if code == GET_NAMES {
            Command::GetNames
        } else if code == GET_ANGLES {
            Command::GetAngles
        } else if code == SET_ANGLES {
            Command::SetAngles { payload }
        } else {
            Command::Unknown
        }
    }
}

/// Executes one inbound message against the store and produces the reply.
///
/// `setj` is all-or-nothing: a payload whose length differs from the store's
/// frame length leaves the state untouched and answers `failed`. The angle
/// bytes themselves are never inspected.
///
/// Returns `None` only for unrecognized four-byte codes. The original wire
/// contract defines no reply for those, so the connection stays silent
/// rather than inventing traffic peers never expected.
pub fn dispatch(message: &[u8], store: &JointStore) -> Option<Vec<u8>> {
    match Command::parse(message) {
        Command::GetNames => Some(store.names().join(" ").into_bytes()),
        Command::GetAngles => Some(store.angles()),
        Command::SetAngles { payload } => {
            if payload.len() == store.frame_len() {
                store.set_angles(payload.to_vec());
                Some(REPLY_ACCEPTED.to_vec())
            } else {
                Some(REPLY_REJECTED.to_vec())
            }
        }
        Command::Echo { raw } => Some(raw.to_vec()),
        Command::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> JointStore {
        JointStore::new(vec!["A".to_string(), "B".to_string()])
    }

    #[test]
    fn parses_known_commands() {
        assert!(matches!(Command::parse(b"getn"), Command::GetNames));
        assert!(matches!(Command::parse(b"getj"), Command::GetAngles));
        assert!(matches!(
            Command::parse(b"setj\x01\x02"),
            Command::SetAngles { payload } if payload == b"\x01\x02"
        ));
    }

    #[test]
    fn trailing_bytes_after_read_commands_are_ignored() {
        assert!(matches!(Command::parse(b"getn extra"), Command::GetNames));
        assert!(matches!(Command::parse(b"getjXYZ"), Command::GetAngles));
    }

    #[test]
    fn short_messages_become_echo() {
        assert!(matches!(Command::parse(b"ge"), Command::Echo { raw } if raw == b"ge"));
        assert!(matches!(Command::parse(b""), Command::Echo { raw } if raw.is_empty()));
    }

    #[test]
    fn unknown_codes_are_flagged() {
        assert!(matches!(Command::parse(b"stop"), Command::Unknown));
        // Codes are case-sensitive.
        assert!(matches!(Command::parse(b"GETN"), Command::Unknown));
    }

    #[test]
    fn getn_joins_names_with_single_spaces() {
        let store = test_store();
        assert_eq!(dispatch(b"getn", &store), Some(b"A B".to_vec()));
    }

    #[test]
    fn getj_returns_zeroed_frame_after_startup() {
        let store = test_store();
        assert_eq!(dispatch(b"getj", &store), Some(vec![0u8; 8]));
    }

    #[test]
    fn setj_with_exact_frame_replaces_state() {
        let store = test_store();
        let reply = dispatch(b"setj\x01\x02\x03\x04\x05\x06\x07\x08", &store);
        assert_eq!(reply, Some(REPLY_ACCEPTED.to_vec()));
        assert_eq!(store.angles(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn setj_with_wrong_length_leaves_state_untouched() {
        let store = test_store();
        dispatch(b"setj\x01\x02\x03\x04\x05\x06\x07\x08", &store);

        let reply = dispatch(b"setj\x09\x09\x09\x09", &store);
        assert_eq!(reply, Some(REPLY_REJECTED.to_vec()));
        assert_eq!(store.angles(), vec![1, 2, 3, 4, 5, 6, 7, 8]);

        let reply = dispatch(b"setj", &store);
        assert_eq!(reply, Some(REPLY_REJECTED.to_vec()));
        assert_eq!(store.angles(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn short_message_is_echoed_unchanged() {
        let store = test_store();
        assert_eq!(dispatch(b"\xaa\xbb", &store), Some(vec![0xaa, 0xbb]));
    }

    #[test]
    fn unknown_code_yields_no_reply() {
        let store = test_store();
        assert_eq!(dispatch(b"quit", &store), None);
    }
}
