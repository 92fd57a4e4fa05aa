use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::model::vote::VoteWait};

/// Voting and vote credit rule violations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VoteError {
    #[error("You are banned from voting right now! Contact support if you think this is a mistake")]
    VoteBanned,

    /// The entity cannot receive votes; the message says why.
    #[error("{0}")]
    NotVotable(String),

    #[error("This entity does not support {0}")]
    UnsupportedDirection(&'static str),

    /// Still inside the cooldown window of the previous vote.
    #[error("Please wait {0} before voting again")]
    Cooldown(VoteWait),

    /// The previous vote added several votes at once and the cooldown is still active.
    #[error("Your last vote was a double vote, calm down?: {0}")]
    DoubleVoteCooldown(VoteWait),

    /// The entity accepts a single vote per user and this user already cast it.
    #[error("You have already voted for this entity")]
    AlreadyVoted,

    #[error("This entity does not support vote credits")]
    CreditsNotSupported,

    #[error("No vote credits to redeem")]
    NothingToRedeem,
}

/// `VoteBanned` → 403 Forbidden, everything else → 400 Bad Request.
impl IntoResponse for VoteError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::VoteBanned => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
