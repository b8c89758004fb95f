use crate::database::{model::space::SpaceRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::SpaceId,
        list::{ListOptions, PaginatedList},
        space::{
            event::{CreateSpace, UpdateSpace},
            Space,
        },
    },
    repository::catalog::CatalogRepository,
};
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct SpaceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CatalogRepository<Space> for SpaceRepositoryImpl {
    async fn create(&self, event: CreateSpace) -> AppResult<Space> {
        let space_id = SpaceId::new();
        sqlx::query(
            r#"
                INSERT INTO spaces (space_id, space_name, capacity, location, space_type, is_active)
                VALUES ($1, $2, $3, $4, $5, $6);
            "#,
        )
        .bind(space_id)
        .bind(&event.space_name)
        .bind(event.capacity)
        .bind(&event.location)
        .bind(event.space_type.as_ref())
        .bind(event.is_active)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(Space {
            space_id,
            space_name: event.space_name,
            capacity: event.capacity,
            location: event.location,
            space_type: event.space_type,
            is_active: event.is_active,
        })
    }

    async fn find_all(&self) -> AppResult<Vec<Space>> {
        sqlx::query_as::<_, SpaceRow>(
            r#"
                SELECT space_id, space_name, capacity, location, space_type, is_active
                FROM spaces
                ORDER BY space_name ASC;
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Space::try_from)
        .collect()
    }

    async fn find_page(&self, options: ListOptions) -> AppResult<PaginatedList<Space>> {
        let ListOptions { limit, offset } = options;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM spaces;")
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        let items = sqlx::query_as::<_, SpaceRow>(
            r#"
                SELECT space_id, space_name, capacity, location, space_type, is_active
                FROM spaces
                ORDER BY space_name ASC
                LIMIT $1
                OFFSET $2;
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Space::try_from)
        .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items,
        })
    }

    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>> {
        sqlx::query_as::<_, SpaceRow>(
            r#"
                SELECT space_id, space_name, capacity, location, space_type, is_active
                FROM spaces
                WHERE space_id = $1;
            "#,
        )
        .bind(space_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Space::try_from)
        .transpose()
    }

    async fn update(&self, event: UpdateSpace) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE spaces
                SET
                    space_name = $1,
                    capacity = $2,
                    location = $3,
                    space_type = $4,
                    is_active = $5
                WHERE space_id = $6;
            "#,
        )
        .bind(&event.space_name)
        .bind(event.capacity)
        .bind(&event.location)
        .bind(event.space_type.as_ref())
        .bind(event.is_active)
        .bind(event.space_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "space ({}) was not found",
                event.space_id
            )));
        }
        Ok(())
    }

    async fn delete(&self, space_id: SpaceId) -> AppResult<()> {
        // reservations は ON DELETE CASCADE で一緒に消える
        let res = sqlx::query("DELETE FROM spaces WHERE space_id = $1;")
            .bind(space_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "space ({space_id}) was not found"
            )));
        }
        Ok(())
    }
}
