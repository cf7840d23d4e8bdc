use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

/// Event name used by clients to submit their score.
pub const EVENT_SCORES: &str = "scores";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
/// Name/score pair submitted by a client. Nothing here is validated.
pub struct ScoreSubmission {
    /// Player name as typed.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Score as typed; any format is accepted.
    #[serde(default, deserialize_with = "lenient_string")]
    pub score: String,
}

impl ScoreSubmission {
    /// Build a submission from any `scores` payload. Objects are read field by
    /// field; a missing, `null` or non-object payload yields an empty submission.
    pub fn from_payload(data: Value) -> serde_json::Result<Self> {
        match data {
            Value::Object(_) => serde_json::from_value(data),
            _ => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
/// One entry of the broadcast board, keyed by the owning connection.
pub struct PlayerScore {
    /// Connection that submitted the record.
    pub id: String,
    /// Player name.
    pub name: String,
    /// Latest score of the player.
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
/// Sent once to a client right after its connection is registered.
pub struct ConnectedPayload {
    /// Identifier assigned to the receiving connection.
    pub id: String,
}

/// Errors raised while decoding an inbound WebSocket frame.
#[derive(Debug, Error)]
pub enum InboundError {
    /// Frame is not a JSON envelope, or its payload has the wrong shape.
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Envelope names an event the server does not handle.
    #[error("unknown event `{0}`")]
    UnknownEvent(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Messages sent by clients over the real-time channel.
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    /// Latest name/score of the sending client.
    #[serde(rename = "scores")]
    Scores(ScoreSubmission),
}

#[derive(Deserialize)]
struct RawEnvelope {
    event: String,
    #[serde(default)]
    data: Value,
}

impl ClientMessage {
    /// Decode a text frame of the form `{"event": ..., "data": ...}`.
    pub fn from_json_str(text: &str) -> Result<Self, InboundError> {
        let envelope: RawEnvelope = serde_json::from_str(text)?;
        match envelope.event.as_str() {
            EVENT_SCORES => Ok(Self::Scores(ScoreSubmission::from_payload(envelope.data)?)),
            _ => Err(InboundError::UnknownEvent(envelope.event)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
/// Messages pushed by the server to every connected client.
#[serde(tag = "event", content = "data")]
pub enum ServerMessage {
    /// Greeting carrying the connection id.
    #[serde(rename = "connected")]
    Connected(ConnectedPayload),
    /// Full board, in submission order.
    #[serde(rename = "playerScores")]
    PlayerScores(Vec<PlayerScore>),
}

/// Accept any JSON value where a string is expected: strings pass through,
/// `null` becomes empty and everything else keeps its JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scores_event() {
        let message =
            ClientMessage::from_json_str(r#"{"event":"scores","data":{"name":"Ann","score":"10"}}"#)
                .unwrap();
        assert_eq!(
            message,
            ClientMessage::Scores(ScoreSubmission {
                name: "Ann".into(),
                score: "10".into(),
            })
        );
    }

    #[test]
    fn missing_and_non_string_fields_are_kept_as_is() {
        let ClientMessage::Scores(submission) =
            ClientMessage::from_json_str(r#"{"event":"scores","data":{"score":42}}"#).unwrap();
        assert_eq!(submission.name, "");
        assert_eq!(submission.score, "42");

        let ClientMessage::Scores(submission) =
            ClientMessage::from_json_str(r#"{"event":"scores","data":{}}"#).unwrap();
        assert_eq!(submission, ScoreSubmission::default());
    }

    #[test]
    fn rejects_unknown_event() {
        let err = ClientMessage::from_json_str(r#"{"event":"chat","data":"hi"}"#).unwrap_err();
        assert!(matches!(err, InboundError::UnknownEvent(name) if name == "chat"));
    }

    #[test]
    fn rejects_non_json_frames() {
        assert!(matches!(
            ClientMessage::from_json_str("not json"),
            Err(InboundError::Malformed(_))
        ));
        assert!(matches!(
            ClientMessage::from_json_str(r#"{"data":{"name":"Ann"}}"#),
            Err(InboundError::Malformed(_))
        ));
    }

    #[test]
    fn missing_null_or_non_object_payload_is_an_empty_submission() {
        for frame in [
            r#"{"event":"scores"}"#,
            r#"{"event":"scores","data":null}"#,
            r#"{"event":"scores","data":"Ann"}"#,
            r#"{"event":"scores","data":[1,2]}"#,
        ] {
            let ClientMessage::Scores(submission) = ClientMessage::from_json_str(frame).unwrap();
            assert_eq!(submission, ScoreSubmission::default(), "frame: {frame}");
        }
    }

    #[test]
    fn client_message_uses_event_envelope() {
        let message = ClientMessage::Scores(ScoreSubmission {
            name: "Bo".into(),
            score: "7".into(),
        });
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"event": "scores", "data": {"name": "Bo", "score": "7"}})
        );
    }

    #[test]
    fn player_scores_envelope_shape() {
        let message = ServerMessage::PlayerScores(vec![PlayerScore {
            id: "abc".into(),
            name: "Ann".into(),
            score: "10".into(),
        }]);
        let text = serde_json::to_string(&message).unwrap();
        assert_eq!(
            text,
            r#"{"event":"playerScores","data":[{"id":"abc","name":"Ann","score":"10"}]}"#
        );

        let decoded: ServerMessage = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, message);
    }
}
