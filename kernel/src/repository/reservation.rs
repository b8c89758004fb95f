use crate::model::{
    id::ReservationId,
    reservation::{
        event::{CreateReservation, UpdateReservation, UpdateReservationStatus},
        Reservation, ReservationFilter,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // (スペース, 日付, 時間枠) の重複はストレージ側の一意制約で弾き、Conflict を返す
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    // 重複チェックは編集対象の予約自身を除外して行う
    async fn update(&self, event: UpdateReservation) -> AppResult<()>;
    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<()>;
    async fn delete(&self, reservation_id: ReservationId) -> AppResult<()>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    // 日付の降順、作成日時の降順で返す
    async fn find_all(&self, filter: ReservationFilter) -> AppResult<Vec<Reservation>>;
}
