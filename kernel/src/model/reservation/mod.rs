use crate::model::{
    id::{ReservationId, SlotId, SpaceId, UserId},
    slot::Slot,
    user::ReservationUser,
};
use chrono::{DateTime, NaiveDate, Utc};
use strum::{AsRefStr, EnumString};

pub mod event;

pub const PURPOSE_MAX_LENGTH: usize = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Confirm,
    Reject,
}

impl From<Decision> for ReservationStatus {
    fn from(value: Decision) -> Self {
        match value {
            Decision::Confirm => Self::Confirmed,
            Decision::Reject => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub reservation_date: NaiveDate,
    pub purpose: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub requested_by: ReservationUser,
    pub space: ReservationSpace,
    pub slot: Slot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationSpace {
    pub space_id: SpaceId,
    pub space_name: String,
}

// 利用者が入力する予約内容。申請者は常に呼び出し元の利用者になる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationCandidate {
    pub space_id: SpaceId,
    pub slot_id: SlotId,
    pub reservation_date: NaiveDate,
    pub purpose: Option<String>,
}

// 各条件は省略時は絞り込みなし、指定時は AND で結合される
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub space_id: Option<SpaceId>,
    pub status: Option<ReservationStatus>,
    pub requested_by: Option<UserId>,
}

impl ReservationFilter {
    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.date_from
            .map_or(true, |from| reservation.reservation_date >= from)
            && self
                .date_to
                .map_or(true, |to| reservation.reservation_date <= to)
            && self
                .space_id
                .map_or(true, |id| reservation.space.space_id == id)
            && self.status.map_or(true, |s| reservation.status == s)
            && self
                .requested_by
                .map_or(true, |id| reservation.requested_by.user_id == id)
    }
}

/// 一覧表示の並び順（日付の降順、同日内は作成日時の降順）に並べ替える
pub fn sort_for_listing(reservations: &mut [Reservation]) {
    reservations.sort_by(|a, b| {
        b.reservation_date
            .cmp(&a.reservation_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_through_storage_names() {
        assert_eq!(ReservationStatus::Confirmed.as_ref(), "CONFIRMED");
        assert_eq!(
            ReservationStatus::from_str("REJECTED").unwrap(),
            ReservationStatus::Rejected
        );
        assert!(ReservationStatus::from_str("CANCELLED").is_err());
    }

    #[test]
    fn decisions_map_to_terminal_states() {
        assert_eq!(
            ReservationStatus::from(Decision::Confirm),
            ReservationStatus::Confirmed
        );
        assert_eq!(
            ReservationStatus::from(Decision::Reject),
            ReservationStatus::Rejected
        );
    }

    #[test]
    fn new_reservations_start_pending() {
        assert_eq!(ReservationStatus::default(), ReservationStatus::Pending);
    }
}
