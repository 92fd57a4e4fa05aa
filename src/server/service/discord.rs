//! Outbound Discord messages.
//!
//! The API never talks to the gateway; it only posts embeds to log channels and sends
//! direct messages through the REST client. `DiscordSink` is the seam services depend
//! on so that they can be exercised without Discord.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::{
    all::{ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage, Timestamp, UserId},
    http::Http,
};

use crate::server::error::AppError;

/// Embed colour used for vote logs.
pub const VOTE_LOG_COLOR: u32 = 0x8A6BFD;

/// Embed colour used for premium notices.
pub const PREMIUM_COLOR: u32 = 0xE74C3C;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A single-embed Discord message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscordEmbed {
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
}

impl DiscordEmbed {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            ..Default::default()
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    fn build(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .title(&self.title)
            .description(&self.description)
            .color(self.color)
            .timestamp(Timestamp::now());

        if let Some(url) = &self.url {
            embed = embed.url(url);
        }

        if let Some(thumbnail) = &self.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }

        for field in &self.fields {
            embed = embed.field(&field.name, &field.value, field.inline);
        }

        if let Some(footer) = &self.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }

        embed
    }
}

#[async_trait]
pub trait DiscordSink: Send + Sync {
    /// Posts an embed to a channel.
    async fn send_channel(&self, channel_id: u64, embed: DiscordEmbed) -> Result<(), AppError>;

    /// Sends an embed to a user's DM channel.
    async fn send_dm(&self, user_id: &str, embed: DiscordEmbed) -> Result<(), AppError>;
}

/// `DiscordSink` backed by the serenity REST client.
pub struct SerenityDiscordSink {
    http: Arc<Http>,
}

impl SerenityDiscordSink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl DiscordSink for SerenityDiscordSink {
    async fn send_channel(&self, channel_id: u64, embed: DiscordEmbed) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(embed.build()))
            .await?;

        Ok(())
    }

    async fn send_dm(&self, user_id: &str, embed: DiscordEmbed) -> Result<(), AppError> {
        let user_id = user_id
            .parse::<u64>()
            .map_err(|e| AppError::InternalError(format!("Invalid user ID {}: {}", user_id, e)))?;

        let channel = UserId::new(user_id).create_dm_channel(&self.http).await?;
        channel
            .send_message(&self.http, CreateMessage::new().embed(embed.build()))
            .await?;

        Ok(())
    }
}
