use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::session::{CreateSessionParams, Session};

pub struct SessionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SessionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new API session.
    ///
    /// # Arguments
    /// - `params` - Target, name, type, scope, limits and absolute expiry
    /// - `token` - The generated session token
    /// - `now` - Creation timestamp
    ///
    /// # Returns
    /// - `Ok(Session)` - The stored session, without its token
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        params: CreateSessionParams,
        token: String,
        now: DateTime<Utc>,
    ) -> Result<Session, DbErr> {
        let session = entity::api_session::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(params.name),
            session_type: ActiveValue::Set(params.session_type),
            scope: ActiveValue::Set(params.scope),
            target_type: ActiveValue::Set(params.target_type),
            target_id: ActiveValue::Set(params.target_id),
            perm_limits: ActiveValue::Set(params.perm_limits.into()),
            token: ActiveValue::Set(token),
            expiry: ActiveValue::Set(params.expiry),
            created_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Session::from_entity(session))
    }

    /// Finds a session by token, including expired ones.
    ///
    /// Expiry is checked by the caller so expired rows remain visible for auditing.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<Session>, DbErr> {
        Ok(entity::prelude::ApiSession::find()
            .filter(entity::api_session::Column::Token.eq(token))
            .one(self.db)
            .await?
            .map(Session::from_entity))
    }

    /// Lists all sessions of a target, newest first.
    pub async fn get_by_target(
        &self,
        target_type: &str,
        target_id: &str,
    ) -> Result<Vec<Session>, DbErr> {
        let sessions = entity::prelude::ApiSession::find()
            .filter(entity::api_session::Column::TargetType.eq(target_type))
            .filter(entity::api_session::Column::TargetId.eq(target_id))
            .order_by_desc(entity::api_session::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(sessions.into_iter().map(Session::from_entity).collect())
    }

    /// Deletes a session belonging to a target.
    ///
    /// # Returns
    /// - `Ok(true)` - The session was deleted
    /// - `Ok(false)` - No session of that target had this ID
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(
        &self,
        target_type: &str,
        target_id: &str,
        session_id: Uuid,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::ApiSession::delete_many()
            .filter(entity::api_session::Column::Id.eq(session_id))
            .filter(entity::api_session::Column::TargetType.eq(target_type))
            .filter(entity::api_session::Column::TargetId.eq(target_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
