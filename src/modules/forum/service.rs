use schoolhub_core::AppError;
use schoolhub_models::{CreateCommentDto, UpdateCommentDto};
use tracing::instrument;

use crate::api::ApiClient;

pub struct ForumService;

impl ForumService {
    pub const POSTS_PATH: &'static str = "/api/forum/posts/";

    pub fn comments_path(post_id: &str) -> String {
        format!("{}{}/comments/", Self::POSTS_PATH, post_id)
    }

    pub fn comment_path(comment_id: &str) -> String {
        format!("/api/forum/comments/{}/", comment_id)
    }

    #[instrument(skip(client, token, dto), fields(parent = ?dto.parent))]
    pub async fn add_comment(
        client: &ApiClient,
        token: Option<&str>,
        post_id: &str,
        dto: &CreateCommentDto,
    ) -> Result<(), AppError> {
        client.post(&Self::comments_path(post_id), token, dto).await?;
        Ok(())
    }

    #[instrument(skip(client, token, dto))]
    pub async fn update_comment(
        client: &ApiClient,
        token: Option<&str>,
        comment_id: &str,
        dto: &UpdateCommentDto,
    ) -> Result<(), AppError> {
        client.patch(&Self::comment_path(comment_id), token, dto).await?;
        Ok(())
    }

    #[instrument(skip(client, token))]
    pub async fn delete_comment(
        client: &ApiClient,
        token: Option<&str>,
        comment_id: &str,
    ) -> Result<(), AppError> {
        client.delete(&Self::comment_path(comment_id), token).await?;
        Ok(())
    }
}
