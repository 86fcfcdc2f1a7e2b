//! Comment threads as trees.
//!
//! The backend returns top-level comments with their replies nested inside
//! each comment. [`build_comment_tree`] turns that into display nodes without
//! reordering, deduplicating or dropping anything: the tree has exactly as
//! many nodes as the input, and every node has as many children as its
//! comment has replies. Rendering and interaction live on top of the tree
//! and never change its shape.

use chrono::{DateTime, NaiveDateTime, Utc};
use schoolhub_models::Comment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    /// Comment id, the target of reply, edit and delete.
    pub id: String,
    /// Display key: the comment's `created_at`.
    pub key: String,
    /// The comment itself, without its replies.
    pub comment: Comment,
    pub children: Vec<CommentNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Reply,
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTitle {
    pub author: String,
    pub posted: String,
    pub body: String,
    pub actions: Vec<CommentAction>,
}

pub fn build_comment_tree(comments: &[Comment]) -> Vec<CommentNode> {
    comments.iter().map(CommentNode::from_comment).collect()
}

/// Number of comments including every nested reply.
pub fn count_nodes(comments: &[Comment]) -> usize {
    comments
        .iter()
        .map(|comment| 1 + count_nodes(&comment.replies))
        .sum()
}

impl CommentNode {
    fn from_comment(comment: &Comment) -> Self {
        Self {
            id: comment.id.clone(),
            key: comment.created_at.clone(),
            comment: Comment {
                id: comment.id.clone(),
                content: comment.content.clone(),
                created_at: comment.created_at.clone(),
                created_by: comment.created_by.clone(),
                parent: comment.parent.clone(),
                replies: Vec::new(),
            },
            children: build_comment_tree(&comment.replies),
        }
    }

    /// Nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(CommentNode::node_count).sum::<usize>()
    }

    pub fn is_authored_by(&self, username: &str) -> bool {
        !username.is_empty() && self.comment.created_by.username == username
    }

    /// Header line data for the comment as seen by `viewer`.
    pub fn title(&self, viewer: &str, now: DateTime<Utc>) -> CommentTitle {
        let mut actions = vec![CommentAction::Reply];
        if self.is_authored_by(viewer) {
            actions.extend([CommentAction::Edit, CommentAction::Delete]);
        }
        CommentTitle {
            author: self.comment.created_by.username.clone(),
            posted: relative_time(&self.comment.created_at, now),
            body: self.comment.content.clone(),
            actions,
        }
    }
}

/// Depth-first lookup by comment id.
pub fn find_node<'a>(nodes: &'a [CommentNode], id: &str) -> Option<&'a CommentNode> {
    nodes.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find_node(&node.children, id)
        }
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// "just now", "5 minutes ago", "2 days ago" and so on. Unparseable
/// timestamps are shown as they are.
pub fn relative_time(created_at: &str, now: DateTime<Utc>) -> String {
    let Some(ts) = parse_timestamp(created_at) else {
        return created_at.to_string();
    };
    let seconds = (now - ts).num_seconds();
    match seconds {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => ago(s / 60, "minute"),
        s if s < 86_400 => ago(s / 3_600, "hour"),
        s if s < 30 * 86_400 => ago(s / 86_400, "day"),
        s if s < 365 * 86_400 => ago(s / (30 * 86_400), "month"),
        s => ago(s / (365 * 86_400), "year"),
    }
}

/// Indented text lines for a terminal, two spaces per level.
pub fn render_tree(nodes: &[CommentNode], viewer: &str, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::new();
    render_into(&mut lines, nodes, viewer, now, 0);
    lines
}

fn render_into(
    lines: &mut Vec<String>,
    nodes: &[CommentNode],
    viewer: &str,
    now: DateTime<Utc>,
    depth: usize,
) {
    for node in nodes {
        let title = node.title(viewer, now);
        let actions = title
            .actions
            .iter()
            .map(|action| match action {
                CommentAction::Reply => "[reply]",
                CommentAction::Edit => "[edit]",
                CommentAction::Delete => "[delete]",
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!(
            "{}#{} {} · {}: {} {}",
            "  ".repeat(depth),
            node.id,
            title.author,
            title.posted,
            title.body,
            actions
        ));
        render_into(lines, &node.children, viewer, now, depth + 1);
    }
}
