//! Query string parameters shared by the controllers.

use serde::Deserialize;

fn first_page() -> u64 {
    1
}

fn default_upvote() -> bool {
    true
}

/// `?page=N`, one-based, defaulting to the first page.
#[derive(Deserialize, Debug)]
pub struct PageParam {
    #[serde(default = "first_page")]
    pub page: u64,
}

/// `?upvote=true|false`, defaulting to an upvote.
#[derive(Deserialize, Debug)]
pub struct VoteParam {
    #[serde(default = "default_upvote")]
    pub upvote: bool,
}

/// `?notif_id=`
#[derive(Deserialize, Debug)]
pub struct NotifIdParam {
    pub notif_id: String,
}

/// `?target_type=&vanity=`
#[derive(Deserialize, Debug)]
pub struct VanityParam {
    pub target_type: String,
    pub vanity: String,
}
