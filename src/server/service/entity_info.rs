//! Display data for votable entities.

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::server::{
    config::Config,
    data::listing::ListingRepository,
    error::{permission::PermissionError, vote::VoteError, AppError},
    model::{auth::TargetType, vote::EntityInfo},
};

pub struct EntityInfoService<'a, C: ConnectionTrait> {
    db: &'a C,
    config: &'a Config,
}

impl<'a, C: ConnectionTrait> EntityInfoService<'a, C> {
    pub fn new(db: &'a C, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Resolves the name, links and avatar of an entity that can receive votes.
    ///
    /// Blogs have no table of their own; their name is the identifier.
    ///
    /// # Arguments
    /// - `target_type` - Type of the entity
    /// - `target_id` - Identifier of the entity
    ///
    /// # Returns
    /// - `Ok(EntityInfo)` - The entity exists and may be voted for
    /// - `Err(AppError::NotFound)` - No such entity
    /// - `Err(AppError::VoteErr(VoteError::NotVotable))` - Vote banned, or a bot that is not approved
    /// - `Err(AppError::PermissionErr(InvalidTargetType))` - Users cannot be voted for
    pub async fn resolve(
        &self,
        target_type: TargetType,
        target_id: &str,
    ) -> Result<EntityInfo, AppError> {
        let repo = ListingRepository::new(self.db);

        let name = match target_type {
            TargetType::Bot | TargetType::Server => {
                let listing = repo
                    .find(target_type, target_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("{} not found", target_type)))?;

                if listing.vote_banned {
                    return Err(VoteError::NotVotable(format!(
                        "{} is vote banned and cannot be voted for right now",
                        target_type
                    ))
                    .into());
                }

                if target_type == TargetType::Bot && !listing.is_listed() {
                    return Err(VoteError::NotVotable(
                        "bot is not approved or certified and cannot be voted for right now"
                            .to_string(),
                    )
                    .into());
                }

                listing.name
            }
            TargetType::Team => {
                let team = match Uuid::parse_str(target_id) {
                    Ok(team_id) => repo.find_team(team_id).await?,
                    Err(_) => None,
                }
                .ok_or_else(|| AppError::NotFound("team not found".to_string()))?;

                if team.vote_banned {
                    return Err(VoteError::NotVotable(
                        "team is vote banned and cannot be voted for right now".to_string(),
                    )
                    .into());
                }

                team.name
            }
            TargetType::Pack => {
                repo.find_pack(target_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("pack not found".to_string()))?
                    .name
            }
            TargetType::Blog => target_id.to_string(),
            TargetType::User => {
                return Err(PermissionError::InvalidTargetType(target_type.to_string()).into())
            }
        };

        let url = format!("{}/{}/{}", self.config.frontend_url, target_type, target_id);

        Ok(EntityInfo {
            name,
            vote_url: format!("{}/vote", url),
            url,
            avatar: format!(
                "{}/avatars/{}s/{}.webp",
                self.config.cdn_url, target_type, target_id
            ),
        })
    }
}
