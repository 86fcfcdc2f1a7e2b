pub mod screen;
pub mod service;
pub mod tree;

pub use screen::{ForumEvent, ForumScreen, ForumView, ThreadScreen};
pub use service::ForumService;
pub use tree::{
    CommentAction, CommentNode, CommentTitle, build_comment_tree, count_nodes, find_node,
    relative_time, render_tree,
};
