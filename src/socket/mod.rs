mod events;

use serde_json::Value;
use thiserror::Error;

pub use events::{AnswerUpdatePayload, CommentUpdatePayload, ServerEvent};

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("malformed frame: {0}")]
    Malformed(&'static str),
    #[error("unknown event {0}")]
    UnknownEvent(String),
    #[error("invalid event payload: {0}")]
    Payload(#[from] serde_json::Error),
}

// engine.io packet types
const EIO_MESSAGE: u8 = b'4';
// socket.io packet types
const SIO_EVENT: u8 = b'2';

/// Decodes one socket.io (v4) text frame such as
/// `42["voteUpdate",{"qid":"1","upVotes":[],"downVotes":[]}]`.
///
/// Packets that carry no event (ping, pong, connect, acks, ...) yield `None`.
pub fn decode_frame(frame: &str) -> Result<Option<ServerEvent>, SocketError> {
    let bytes = frame.as_bytes();
    let Some(&engine_type) = bytes.first() else {
        return Err(SocketError::Malformed("empty frame"));
    };
    if !(b'0'..=b'6').contains(&engine_type) {
        return Err(SocketError::Malformed("unknown engine.io packet type"));
    }
    if engine_type != EIO_MESSAGE {
        return Ok(None);
    }
    match bytes.get(1).copied() {
        Some(SIO_EVENT) => {}
        Some(b'0'..=b'6') => return Ok(None),
        Some(_) => return Err(SocketError::Malformed("unknown socket.io packet type")),
        None => return Err(SocketError::Malformed("missing socket.io packet type")),
    }

    let mut rest = &frame[2..];
    if rest.starts_with('/') {
        let comma = rest
            .find(',')
            .ok_or(SocketError::Malformed("unterminated namespace"))?;
        rest = &rest[comma + 1..];
    }
    // ack id
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());

    let args: Vec<Value> = serde_json::from_str(rest)?;
    let mut args = args.into_iter();
    let name = match args.next() {
        Some(Value::String(name)) => name,
        _ => return Err(SocketError::Malformed("event name must be a string")),
    };
    let payload = args.next().unwrap_or(Value::Null);
    let event = ServerEvent::from_parts(&name, payload)?;
    tracing::debug!(event = event.name(), "decoded server event");
    Ok(Some(event))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::models::VoteData;

    fn question_json(id: &str) -> Value {
        json!({
            "_id": id,
            "title": "t",
            "text": "x",
            "askedBy": "alice",
            "askDateTime": "2024-03-05T10:00:00.000Z",
            "views": ["bob"]
        })
    }

    #[rstest]
    fn decodes_vote_update() {
        let event = decode_frame(r#"42["voteUpdate",{"qid":"q1","upVotes":["a"],"downVotes":[]}]"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            event,
            ServerEvent::VoteUpdate(VoteData {
                qid: "q1".to_owned(),
                up_votes: vec!["a".to_owned()],
                down_votes: vec![],
            })
        );
    }

    #[rstest]
    fn decodes_namespaced_frame_with_ack_id() {
        let frame = format!(r#"42/forum,17["viewsUpdate",{}]"#, question_json("q9"));
        let event = decode_frame(&frame).unwrap().unwrap();
        assert!(matches!(event, ServerEvent::ViewsUpdate(q) if q.has_id("q9")));
    }

    #[rstest]
    fn comment_update_is_tagged_by_type() {
        let frame = format!(
            r#"42["commentUpdate",{{"type":"question","result":{}}}]"#,
            question_json("q1")
        );
        let event = decode_frame(&frame).unwrap().unwrap();
        assert!(matches!(
            event,
            ServerEvent::CommentUpdate(CommentUpdatePayload::Question(q)) if q.has_id("q1")
        ));
    }

    #[rstest]
    #[case("2")]
    #[case("3")]
    #[case("40")]
    #[case(r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#)]
    #[case("43[]")]
    fn control_packets_carry_no_event(#[case] frame: &str) {
        assert!(decode_frame(frame).unwrap().is_none());
    }

    #[rstest]
    #[case("")]
    #[case("9")]
    #[case("4")]
    #[case("42/forum")]
    #[case("42[1,2]")]
    #[case("42not json")]
    fn malformed_frames_are_rejected(#[case] frame: &str) {
        assert!(decode_frame(frame).is_err());
    }

    #[rstest]
    fn unknown_event_is_reported_by_name() {
        let err = decode_frame(r#"42["tagUpdate",{}]"#).unwrap_err();
        assert_eq!(err.to_string(), "unknown event tagUpdate");
    }

    #[rstest]
    fn payload_of_wrong_shape_is_rejected() {
        let err = decode_frame(r#"42["answerUpdate",{"qid":"q1"}]"#).unwrap_err();
        assert!(matches!(err, SocketError::Payload(_)));
    }
}
