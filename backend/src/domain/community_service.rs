//! Community feed domain logic.
//!
//! Posts, reactions, comments, pinning and poll voting. Reactions and
//! poll votes are anonymous counters, so repeat voting is allowed by
//! design of the feed, not an oversight.

use anyhow::Result;
use log::info;
use std::sync::{Arc, Mutex};

use crate::domain::commands::community::{
    AddCommentCommand, CreatePostCommand, FeedQuery, VotePollCommand,
};
use shared::{Comment, CommunityPost, PostAttachment, PostValidationError};

struct CommunityState {
    posts: Vec<CommunityPost>,
    next_post_id: u64,
    next_comment_id: u64,
}

/// Community service that handles the discussion feed
#[derive(Clone)]
pub struct CommunityService {
    state: Arc<Mutex<CommunityState>>,
}

impl CommunityService {
    /// Create a new CommunityService instance
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(CommunityState {
                posts: Vec::new(),
                next_post_id: 1,
                next_comment_id: 1,
            })),
        }
    }

    /// Publish a post after validating content and any poll attachment
    pub fn create_post(&self, command: CreatePostCommand) -> Result<CommunityPost> {
        if command.content.trim().is_empty() {
            return Err(PostValidationError::EmptyContent.into());
        }
        if let Some(PostAttachment::Poll { poll }) = &command.attachment {
            if poll.question.trim().is_empty() {
                return Err(PostValidationError::EmptyPollQuestion.into());
            }
            if poll.options.len() < 2 {
                return Err(PostValidationError::NotEnoughPollOptions.into());
            }
        }

        let mut state = self.lock_state();

        // Renumber poll options so ids are unique regardless of what
        // the form sent.
        let attachment = command.attachment.map(|a| match a {
            PostAttachment::Poll { mut poll } => {
                for (i, option) in poll.options.iter_mut().enumerate() {
                    option.id = (i + 1) as u64;
                    option.votes = 0;
                }
                PostAttachment::Poll { poll }
            }
            other => other,
        });

        let post = CommunityPost {
            id: state.next_post_id,
            author: command.author,
            author_avatar: command.author_avatar,
            topic: command.topic,
            time: "Agora".to_string(),
            content: command.content.trim().to_string(),
            likes: 0,
            dislikes: 0,
            comments: Vec::new(),
            pinned_comment_id: None,
            attachment,
        };
        state.next_post_id += 1;
        state.posts.push(post.clone());

        info!("💬 COMMUNITY: Created post id={} ({})", post.id, post.topic);
        Ok(post)
    }

    /// Feed listing, newest first; `None` topic is the "Todos" tab
    pub fn feed(&self, query: FeedQuery) -> Vec<CommunityPost> {
        let state = self.lock_state();
        let mut posts: Vec<CommunityPost> = state
            .posts
            .iter()
            .filter(|p| match query.topic {
                Some(topic) => p.topic == topic,
                None => true,
            })
            .cloned()
            .collect();
        posts.reverse();
        posts
    }

    /// Increment a post's like counter
    pub fn like_post(&self, post_id: u64) -> Result<u32> {
        let mut state = self.lock_state();
        let post = Self::find_post(&mut state, post_id)?;
        post.likes += 1;
        Ok(post.likes)
    }

    /// Increment a post's dislike counter
    pub fn dislike_post(&self, post_id: u64) -> Result<u32> {
        let mut state = self.lock_state();
        let post = Self::find_post(&mut state, post_id)?;
        post.dislikes += 1;
        Ok(post.dislikes)
    }

    /// Append a comment to a post
    pub fn add_comment(&self, command: AddCommentCommand) -> Result<Comment> {
        if command.content.trim().is_empty() {
            return Err(PostValidationError::EmptyContent.into());
        }

        let mut state = self.lock_state();
        let comment_id = state.next_comment_id;
        state.next_comment_id += 1;

        let post = Self::find_post(&mut state, command.post_id)?;
        let comment = Comment {
            id: comment_id,
            author: command.author,
            author_avatar: command.author_avatar,
            content: command.content.trim().to_string(),
            time: "Agora".to_string(),
        };
        post.comments.push(comment.clone());

        info!(
            "💬 COMMUNITY: Added comment id={} to post id={}",
            comment.id, command.post_id
        );
        Ok(comment)
    }

    /// Pin a comment; it must belong to the post
    pub fn pin_comment(&self, post_id: u64, comment_id: u64) -> Result<()> {
        let mut state = self.lock_state();
        let post = Self::find_post(&mut state, post_id)?;

        if !post.comments.iter().any(|c| c.id == comment_id) {
            return Err(anyhow::anyhow!(
                "Comment {} does not belong to post {}",
                comment_id,
                post_id
            ));
        }

        post.pinned_comment_id = Some(comment_id);
        info!("💬 COMMUNITY: Pinned comment id={} on post id={}", comment_id, post_id);
        Ok(())
    }

    /// Unpin whatever comment is pinned on a post
    pub fn unpin_comment(&self, post_id: u64) -> Result<()> {
        let mut state = self.lock_state();
        let post = Self::find_post(&mut state, post_id)?;
        post.pinned_comment_id = None;
        Ok(())
    }

    /// Register one vote on a poll option
    pub fn vote_poll(&self, command: VotePollCommand) -> Result<u32> {
        let mut state = self.lock_state();
        let post = Self::find_post(&mut state, command.post_id)?;

        let poll = match &mut post.attachment {
            Some(PostAttachment::Poll { poll }) => poll,
            _ => return Err(anyhow::anyhow!("Post {} has no poll", command.post_id)),
        };

        let option = poll
            .options
            .iter_mut()
            .find(|o| o.id == command.option_id)
            .ok_or_else(|| anyhow::anyhow!("Poll option not found: {}", command.option_id))?;

        option.votes += 1;
        Ok(option.votes)
    }

    fn find_post<'a>(
        state: &'a mut CommunityState,
        post_id: u64,
    ) -> Result<&'a mut CommunityPost> {
        state
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| anyhow::anyhow!("Post not found: {}", post_id))
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, CommunityState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for CommunityService {
    fn default() -> Self {
        Self::new()
    }
}
