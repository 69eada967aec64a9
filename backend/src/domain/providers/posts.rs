use std::sync::Arc;

use async_trait::async_trait;

use super::{EntityProvider, log_failure};
use crate::domain::ports::PostRepository;
use crate::domain::{Error, Post, PostId, UserId};

/// Reads posts, grouped by author.
#[derive(Clone)]
pub struct PostsProvider {
    repository: Arc<dyn PostRepository>,
}

impl PostsProvider {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EntityProvider for PostsProvider {
    type Id = PostId;
    type ForeignKey = UserId;
    type Entity = Post;

    async fn get_by_id(&self, id: &PostId) -> Result<Option<Post>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .inspect_err(|err| log_failure("posts", "get_by_id", err))
            .map_err(Error::from)
    }

    async fn list_all(&self) -> Result<Vec<Post>, Error> {
        self.repository
            .list_all()
            .await
            .inspect_err(|err| log_failure("posts", "list_all", err))
            .map_err(Error::from)
    }

    async fn list_by_foreign_keys(&self, keys: &[UserId]) -> Result<Vec<Post>, Error> {
        self.repository
            .list_by_author_ids(keys)
            .await
            .inspect_err(|err| log_failure("posts", "list_by_author_ids", err))
            .map_err(Error::from)
    }

    fn foreign_key(entity: &Post) -> UserId {
        *entity.author_id()
    }
}
