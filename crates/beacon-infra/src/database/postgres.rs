//! SeaORM-backed post repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DbConn, DbErr, EntityTrait, QueryOrder};
use uuid::Uuid;

use beacon_core::domain::Post;
use beacon_core::error::RepoError;
use beacon_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// Post repository backed by the configured SQL database.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_error(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, entry: Post) -> Result<Post, RepoError> {
        let active: post::ActiveModel = entry.into();
        let model = active.insert(&self.db).await.map_err(query_error)?;
        Ok(model.into())
    }

    async fn update(&self, entry: Post) -> Result<Post, RepoError> {
        let active: post::ActiveModel = entry.into();
        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => query_error(other),
        })?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
