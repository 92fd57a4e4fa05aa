pub use super::api_session::Entity as ApiSession;
pub use super::bot::Entity as Bot;
pub use super::entity_vote::Entity as EntityVote;
pub use super::entity_vote_redeem_log::Entity as EntityVoteRedeemLog;
pub use super::pack::Entity as Pack;
pub use super::server::Entity as Server;
pub use super::staff_member::Entity as StaffMember;
pub use super::staff_position::Entity as StaffPosition;
pub use super::team::Entity as Team;
pub use super::team_member::Entity as TeamMember;
pub use super::user::Entity as User;
pub use super::user_notification::Entity as UserNotification;
pub use super::user_reminder::Entity as UserReminder;
pub use super::vanity::Entity as Vanity;
pub use super::vote_credit_tier::Entity as VoteCreditTier;
pub use super::webhook::Entity as Webhook;
pub use super::webhook_log::Entity as WebhookLog;
