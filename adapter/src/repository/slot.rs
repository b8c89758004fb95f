use crate::database::{map_write_error, model::slot::SlotRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::SlotId,
        list::{ListOptions, PaginatedList},
        slot::{
            event::{CreateSlot, UpdateSlot},
            Slot,
        },
    },
    repository::catalog::CatalogRepository,
};
use shared::error::{AppError, AppResult};

const DUPLICATE_SLOT: &str = "a slot with that time range already exists";

#[derive(new)]
pub struct SlotRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CatalogRepository<Slot> for SlotRepositoryImpl {
    async fn create(&self, event: CreateSlot) -> AppResult<Slot> {
        let slot_id = SlotId::new();
        sqlx::query(
            r#"
                INSERT INTO slots (slot_id, start_time, end_time, description)
                VALUES ($1, $2, $3, $4);
            "#,
        )
        .bind(slot_id)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(&event.description)
        .execute(self.db.inner_ref())
        .await
        .map_err(map_write_error(DUPLICATE_SLOT))?;

        Ok(Slot {
            slot_id,
            start_time: event.start_time,
            end_time: event.end_time,
            description: event.description,
        })
    }

    async fn find_all(&self) -> AppResult<Vec<Slot>> {
        let rows = sqlx::query_as::<_, SlotRow>(
            r#"
                SELECT slot_id, start_time, end_time, description
                FROM slots
                ORDER BY start_time ASC, end_time ASC;
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Slot::from).collect())
    }

    async fn find_page(&self, options: ListOptions) -> AppResult<PaginatedList<Slot>> {
        let ListOptions { limit, offset } = options;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM slots;")
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        let rows = sqlx::query_as::<_, SlotRow>(
            r#"
                SELECT slot_id, start_time, end_time, description
                FROM slots
                ORDER BY start_time ASC, end_time ASC
                LIMIT $1
                OFFSET $2;
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items: rows.into_iter().map(Slot::from).collect(),
        })
    }

    async fn find_by_id(&self, slot_id: SlotId) -> AppResult<Option<Slot>> {
        let row = sqlx::query_as::<_, SlotRow>(
            r#"
                SELECT slot_id, start_time, end_time, description
                FROM slots
                WHERE slot_id = $1;
            "#,
        )
        .bind(slot_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Slot::from))
    }

    async fn update(&self, event: UpdateSlot) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE slots
                SET start_time = $1, end_time = $2, description = $3
                WHERE slot_id = $4;
            "#,
        )
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(&event.description)
        .bind(event.slot_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(map_write_error(DUPLICATE_SLOT))?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "slot ({}) was not found",
                event.slot_id
            )));
        }
        Ok(())
    }

    async fn delete(&self, slot_id: SlotId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM slots WHERE slot_id = $1;")
            .bind(slot_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "slot ({slot_id}) was not found"
            )));
        }
        Ok(())
    }
}
