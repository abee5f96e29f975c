use crate::model::room::RoomId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single signaling message delivered to the members of a room.
///
/// On the wire this is an object with exactly one populated field, e.g.
/// `{"newOffer":"v=0..."}`. Decoding also accepts objects where the other
/// fields are present but `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "InteractionFields")]
pub enum Interaction {
    Joined(String),
    /// Payload is the id of the user that joined.
    NewPeer(String),
    NewOffer(String),
    NewAnswer(String),
    NewIceCandidate(String),
    /// Payload is the id of the finished room.
    Finished(String),
    /// Payload is the id of the user that left.
    Disconnected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Joined,
    NewPeer,
    NewOffer,
    NewAnswer,
    NewIceCandidate,
    Finished,
    Disconnected,
}

impl Interaction {
    pub fn new_peer(user: &UserId) -> Self {
        Self::NewPeer(user.to_string())
    }

    pub fn disconnected(user: &UserId) -> Self {
        Self::Disconnected(user.to_string())
    }

    pub fn finished(room: &RoomId) -> Self {
        Self::Finished(room.to_string())
    }

    pub fn kind(&self) -> InteractionKind {
        match self {
            Self::Joined(_) => InteractionKind::Joined,
            Self::NewPeer(_) => InteractionKind::NewPeer,
            Self::NewOffer(_) => InteractionKind::NewOffer,
            Self::NewAnswer(_) => InteractionKind::NewAnswer,
            Self::NewIceCandidate(_) => InteractionKind::NewIceCandidate,
            Self::Finished(_) => InteractionKind::Finished,
            Self::Disconnected(_) => InteractionKind::Disconnected,
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            Self::Joined(p)
            | Self::NewPeer(p)
            | Self::NewOffer(p)
            | Self::NewAnswer(p)
            | Self::NewIceCandidate(p)
            | Self::Finished(p)
            | Self::Disconnected(p) => p,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("interaction has no populated field")]
    Empty,
    #[error("interaction has {0} populated fields, expected exactly one")]
    Ambiguous(usize),
}

/// Nullable-field shape used for decoding. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InteractionFields {
    joined: Option<String>,
    new_peer: Option<String>,
    new_offer: Option<String>,
    new_answer: Option<String>,
    new_ice_candidate: Option<String>,
    finished: Option<String>,
    disconnected: Option<String>,
}

impl TryFrom<InteractionFields> for Interaction {
    type Error = WireError;

    fn try_from(fields: InteractionFields) -> Result<Self, Self::Error> {
        let candidates = [
            fields.joined.map(Interaction::Joined),
            fields.new_peer.map(Interaction::NewPeer),
            fields.new_offer.map(Interaction::NewOffer),
            fields.new_answer.map(Interaction::NewAnswer),
            fields.new_ice_candidate.map(Interaction::NewIceCandidate),
            fields.finished.map(Interaction::Finished),
            fields.disconnected.map(Interaction::Disconnected),
        ];

        let mut populated = candidates.into_iter().flatten();
        let Some(first) = populated.next() else {
            return Err(WireError::Empty);
        };

        let extra = populated.count();
        if extra > 0 {
            return Err(WireError::Ambiguous(extra + 1));
        }

        Ok(first)
    }
}
