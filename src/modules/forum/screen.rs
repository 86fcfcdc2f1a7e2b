use anyhow::anyhow;
use chrono::{DateTime, Utc};
use schoolhub_core::AppError;
use schoolhub_models::{Comment, CreateCommentDto, ForumPost, UpdateCommentDto};

use super::service::ForumService;
use super::tree::{CommentNode, build_comment_tree, find_node, render_tree};
use crate::fetch::{FetchCycle, FetchState, UseFetch};
use crate::modules::require_role;
use crate::mutation::Mutation;
use crate::navigation::Route;
use crate::state::AppState;

/// Interaction events of a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForumEvent {
    OpenReply(String),
    CloseReply,
    ToggleReply(String),
}

/// UI state of a thread: at most one reply box is open, keyed by comment id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForumView {
    open_reply: Option<String>,
}

impl ForumView {
    pub fn apply(&mut self, event: ForumEvent) {
        match event {
            ForumEvent::OpenReply(id) => self.open_reply = Some(id),
            ForumEvent::CloseReply => self.open_reply = None,
            ForumEvent::ToggleReply(id) => {
                if self.open_reply.as_deref() == Some(id.as_str()) {
                    self.open_reply = None;
                } else {
                    self.open_reply = Some(id);
                }
            }
        }
    }

    pub fn open_reply(&self) -> Option<&str> {
        self.open_reply.as_deref()
    }

    pub fn is_reply_open(&self, comment_id: &str) -> bool {
        self.open_reply() == Some(comment_id)
    }
}

/// List of forum posts.
pub struct ForumScreen {
    posts: UseFetch<Vec<ForumPost>>,
}

impl ForumScreen {
    pub fn open(app: AppState) -> Result<Self, AppError> {
        require_role(&app, Route::Forum)?;
        Ok(Self {
            posts: app.fetch(ForumService::POSTS_PATH),
        })
    }

    pub fn load(&mut self) -> FetchCycle {
        self.posts.mount()
    }

    pub fn state(&self) -> FetchState<Vec<ForumPost>> {
        self.posts.state()
    }
}

/// Comments of one post, shown as a tree.
pub struct ThreadScreen {
    app: AppState,
    post_id: String,
    comments: UseFetch<Vec<Comment>>,
    view: ForumView,
    mutation: Mutation,
}

impl ThreadScreen {
    pub fn open(app: AppState, post_id: impl Into<String>) -> Result<Self, AppError> {
        require_role(&app, Route::Forum)?;
        let post_id = post_id.into();
        let comments = app.fetch(ForumService::comments_path(&post_id));
        Ok(Self {
            app,
            post_id,
            comments,
            view: ForumView::default(),
            mutation: Mutation::new(),
        })
    }

    pub fn load(&mut self) -> FetchCycle {
        self.comments.mount()
    }

    pub fn state(&self) -> FetchState<Vec<Comment>> {
        self.comments.state()
    }

    pub fn tree(&self) -> Vec<CommentNode> {
        self.comments.with_state(|state| build_comment_tree(&state.data))
    }

    pub fn render(&self, now: DateTime<Utc>) -> Vec<String> {
        render_tree(&self.tree(), &self.app.store.snapshot().username, now)
    }

    pub fn view(&self) -> &ForumView {
        &self.view
    }

    pub fn handle(&mut self, event: ForumEvent) {
        self.view.apply(event);
    }

    pub fn is_submitting(&self) -> bool {
        self.mutation.is_in_flight()
    }

    /// Posts a comment, or a reply when `parent` is set. A successful reply
    /// closes the reply box.
    pub async fn reply(&mut self, parent: Option<&str>, content: &str) -> Result<(), AppError> {
        let dto = CreateCommentDto {
            content: content.trim().to_string(),
            parent: parent.map(str::to_string),
        };
        let token = self.app.token();
        self.mutation
            .submit(
                &self.app,
                &dto,
                "Comment posted",
                ForumService::add_comment(&self.app.client, token.as_deref(), &self.post_id, &dto),
            )
            .await?;
        if parent.is_some() {
            self.view.apply(ForumEvent::CloseReply);
        }
        self.comments.refetch().await;
        Ok(())
    }

    pub async fn edit(&self, comment_id: &str, content: &str) -> Result<(), AppError> {
        self.require_author(comment_id)?;
        let dto = UpdateCommentDto {
            content: content.trim().to_string(),
        };
        let token = self.app.token();
        self.mutation
            .submit(
                &self.app,
                &dto,
                "Comment updated",
                ForumService::update_comment(&self.app.client, token.as_deref(), comment_id, &dto),
            )
            .await?;
        self.comments.refetch().await;
        Ok(())
    }

    pub async fn delete(&self, comment_id: &str) -> Result<(), AppError> {
        self.require_author(comment_id)?;
        let token = self.app.token();
        self.mutation
            .run(
                &self.app,
                "Comment deleted",
                ForumService::delete_comment(&self.app.client, token.as_deref(), comment_id),
            )
            .await?;
        self.comments.refetch().await;
        Ok(())
    }

    fn require_author(&self, comment_id: &str) -> Result<(), AppError> {
        let viewer = self.app.store.snapshot().username;
        let tree = self.tree();
        let node = find_node(&tree, comment_id).ok_or_else(|| {
            AppError::not_found(anyhow!("Comment {} not found", comment_id))
        })?;
        if !node.is_authored_by(&viewer) {
            return Err(AppError::forbidden(
                "You can only change your own comments".to_string(),
            ));
        }
        Ok(())
    }
}
