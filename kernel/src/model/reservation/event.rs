use crate::model::{
    id::{ReservationId, SlotId, SpaceId, UserId},
    reservation::ReservationStatus,
};
use chrono::NaiveDate;
use derive_new::new;

#[derive(Debug, Clone, new)]
pub struct CreateReservation {
    pub requested_by: UserId,
    pub space_id: SpaceId,
    pub slot_id: SlotId,
    pub reservation_date: NaiveDate,
    pub purpose: Option<String>,
}

// 編集可能な項目は作成時と同じ。ステータスと作成日時は変更しない
#[derive(Debug, Clone, new)]
pub struct UpdateReservation {
    pub reservation_id: ReservationId,
    pub space_id: SpaceId,
    pub slot_id: SlotId,
    pub reservation_date: NaiveDate,
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, Copy, new)]
pub struct UpdateReservationStatus {
    pub reservation_id: ReservationId,
    pub status: ReservationStatus,
}
