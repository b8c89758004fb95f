use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use kernel::model::{
    id::{ReservationId, SlotId, SpaceId, UserId},
    reservation::{Reservation, ReservationSpace, ReservationStatus},
    slot::Slot,
    user::ReservationUser,
};
use shared::error::AppError;
use std::str::FromStr;

// reservations に users・spaces・slots を結合した 1 行
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub reservation_date: NaiveDate,
    pub purpose: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub user_id: UserId,
    pub user_name: String,
    pub email: Option<String>,
    pub space_id: SpaceId,
    pub space_name: String,
    pub slot_id: SlotId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_description: Option<String>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            reservation_date,
            purpose,
            status,
            created_at,
            user_id,
            user_name,
            email,
            space_id,
            space_name,
            slot_id,
            start_time,
            end_time,
            slot_description,
        } = value;
        Ok(Reservation {
            reservation_id,
            reservation_date,
            purpose,
            status: ReservationStatus::from_str(&status)
                .map_err(|e| AppError::ConversionEntityError(e.to_string()))?,
            created_at,
            requested_by: ReservationUser {
                user_id,
                user_name,
                email,
            },
            space: ReservationSpace {
                space_id,
                space_name,
            },
            slot: Slot {
                slot_id,
                start_time,
                end_time,
                description: slot_description,
            },
        })
    }
}
