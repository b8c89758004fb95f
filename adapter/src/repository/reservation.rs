use crate::database::{map_write_error, model::reservation::ReservationRow, ConnectionPool};
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::{
    model::{
        id::{ReservationId, SlotId, SpaceId},
        reservation::{
            event::{CreateReservation, UpdateReservation, UpdateReservationStatus},
            Reservation, ReservationFilter,
        },
    },
    repository::reservation::ReservationRepository,
};
use shared::error::{AppError, AppResult};

const DUPLICATE_RESERVATION: &str = "a reservation already exists for that space, date and slot";

// 予約 1 件を利用者・スペース・時間枠と結合して取り出す共通の SELECT 句
const SELECT_RESERVATION: &str = r#"
    SELECT
        r.reservation_id,
        r.reservation_date,
        r.purpose,
        r.status,
        r.created_at,
        u.user_id,
        u.user_name,
        u.email,
        s.space_id,
        s.space_name,
        sl.slot_id,
        sl.start_time,
        sl.end_time,
        sl.description AS slot_description
    FROM reservations AS r
    INNER JOIN users AS u ON r.user_id = u.user_id
    INNER JOIN spaces AS s ON r.space_id = s.space_id
    INNER JOIN slots AS sl ON r.slot_id = sl.slot_id
"#;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;

        // 事前チェックはメッセージを分かりやすくするためだけのもの。
        // 同時に登録された場合は一意制約違反として INSERT 側で弾かれる
        self.ensure_vacant(
            &mut tx,
            event.space_id,
            event.reservation_date,
            event.slot_id,
            None,
        )
        .await?;

        let reservation_id = ReservationId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO reservations
                (reservation_id, user_id, space_id, slot_id, reservation_date, purpose)
                VALUES ($1, $2, $3, $4, $5, $6);
            "#,
        )
        .bind(reservation_id)
        .bind(event.requested_by)
        .bind(event.space_id)
        .bind(event.slot_id)
        .bind(event.reservation_date)
        .bind(&event.purpose)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error(DUPLICATE_RESERVATION))?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    async fn update(&self, event: UpdateReservation) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.ensure_vacant(
            &mut tx,
            event.space_id,
            event.reservation_date,
            event.slot_id,
            Some(event.reservation_id),
        )
        .await?;

        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET
                    space_id = $1,
                    slot_id = $2,
                    reservation_date = $3,
                    purpose = $4
                WHERE reservation_id = $5;
            "#,
        )
        .bind(event.space_id)
        .bind(event.slot_id)
        .bind(event.reservation_date)
        .bind(&event.purpose)
        .bind(event.reservation_id)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error(DUPLICATE_RESERVATION))?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "reservation ({}) was not found",
                event.reservation_id
            )));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<()> {
        let res = sqlx::query("UPDATE reservations SET status = $1 WHERE reservation_id = $2;")
            .bind(event.status.as_ref())
            .bind(event.reservation_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "reservation ({}) was not found",
                event.reservation_id
            )));
        }
        Ok(())
    }

    async fn delete(&self, reservation_id: ReservationId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM reservations WHERE reservation_id = $1;")
            .bind(reservation_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "reservation ({reservation_id}) was not found"
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let sql = format!("{SELECT_RESERVATION} WHERE r.reservation_id = $1;");
        sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(reservation_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Reservation::try_from)
            .transpose()
    }

    async fn find_all(&self, filter: ReservationFilter) -> AppResult<Vec<Reservation>> {
        // 未指定の条件は NULL を渡して無効化する
        let sql = format!(
            r#"
                {SELECT_RESERVATION}
                WHERE ($1::date IS NULL OR r.reservation_date >= $1)
                  AND ($2::date IS NULL OR r.reservation_date <= $2)
                  AND ($3::uuid IS NULL OR r.space_id = $3)
                  AND ($4::text IS NULL OR r.status = $4)
                  AND ($5::uuid IS NULL OR r.user_id = $5)
                ORDER BY r.reservation_date DESC, r.created_at DESC;
            "#
        );
        sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(filter.date_from)
            .bind(filter.date_to)
            .bind(filter.space_id)
            .bind(filter.status.map(|s| s.as_ref().to_string()))
            .bind(filter.requested_by)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Reservation::try_from)
            .collect()
    }
}

impl ReservationRepositoryImpl {
    // create, update で使う。(スペース, 日付, 時間枠) がすでに埋まっていれば Conflict
    async fn ensure_vacant(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        space_id: SpaceId,
        reservation_date: NaiveDate,
        slot_id: SlotId,
        except: Option<ReservationId>,
    ) -> AppResult<()> {
        let occupied: Option<ReservationId> = sqlx::query_scalar(
            r#"
                SELECT reservation_id
                FROM reservations
                WHERE space_id = $1
                  AND reservation_date = $2
                  AND slot_id = $3
                  AND ($4::uuid IS NULL OR reservation_id <> $4)
                LIMIT 1;
            "#,
        )
        .bind(space_id)
        .bind(reservation_date)
        .bind(slot_id)
        .bind(except)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        match occupied {
            Some(_) => Err(AppError::Conflict(DUPLICATE_RESERVATION.into())),
            None => Ok(()),
        }
    }
}
