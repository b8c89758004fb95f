use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{ReservationId, SlotId, SpaceId, UserId},
    reservation::{
        Decision, Reservation, ReservationCandidate, ReservationFilter, ReservationSpace,
        ReservationStatus,
    },
    user::ReservationUser,
};
use serde::{de::IntoDeserializer, Deserialize, Deserializer, Serialize};

use super::slot::SlotResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatusName {
    Pending,
    Confirmed,
    Rejected,
}

impl From<ReservationStatus> for ReservationStatusName {
    fn from(value: ReservationStatus) -> Self {
        match value {
            ReservationStatus::Pending => Self::Pending,
            ReservationStatus::Confirmed => Self::Confirmed,
            ReservationStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<ReservationStatusName> for ReservationStatus {
    fn from(value: ReservationStatusName) -> Self {
        match value {
            ReservationStatusName::Pending => Self::Pending,
            ReservationStatusName::Confirmed => Self::Confirmed,
            ReservationStatusName::Rejected => Self::Rejected,
        }
    }
}

// 予約の作成・編集で共通の入力
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[garde(skip)]
    pub space_id: SpaceId,
    #[garde(skip)]
    pub slot_id: SlotId,
    #[garde(skip)]
    pub reservation_date: NaiveDate,
    #[garde(length(chars, max = 250))]
    pub purpose: Option<String>,
}

impl From<ReservationRequest> for ReservationCandidate {
    fn from(value: ReservationRequest) -> Self {
        let ReservationRequest {
            space_id,
            slot_id,
            reservation_date,
            purpose,
        } = value;
        ReservationCandidate {
            space_id,
            slot_id,
            reservation_date,
            // 空の目的は未入力として扱う
            purpose: purpose.filter(|p| !p.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionName {
    Confirm,
    Reject,
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decision: DecisionName,
}

impl From<DecisionRequest> for Decision {
    fn from(value: DecisionRequest) -> Self {
        match value.decision {
            DecisionName::Confirm => Decision::Confirm,
            DecisionName::Reject => Decision::Reject,
        }
    }
}

// 絞り込みフォームは未入力の項目も空文字で送ってくる。空の項目は条件なしとして扱う
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub space_id: Option<SpaceId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<ReservationStatusName>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub requested_by: Option<UserId>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            T::deserialize(raw.trim().to_string().into_deserializer()).map(Some)
        }
        _ => Ok(None),
    }
}

impl From<ReservationListQuery> for ReservationFilter {
    fn from(value: ReservationListQuery) -> Self {
        let ReservationListQuery {
            date_from,
            date_to,
            space_id,
            status,
            requested_by,
        } = value;
        ReservationFilter {
            date_from,
            date_to,
            space_id,
            status: status.map(ReservationStatus::from),
            requested_by,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUserResponse {
    pub id: UserId,
    pub user_name: String,
}

impl From<ReservationUser> for ReservationUserResponse {
    fn from(value: ReservationUser) -> Self {
        Self {
            id: value.user_id,
            user_name: value.user_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSpaceResponse {
    pub id: SpaceId,
    pub space_name: String,
}

impl From<ReservationSpace> for ReservationSpaceResponse {
    fn from(value: ReservationSpace) -> Self {
        Self {
            id: value.space_id,
            space_name: value.space_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub reservation_date: NaiveDate,
    pub purpose: Option<String>,
    pub status: ReservationStatusName,
    pub created_at: DateTime<Utc>,
    pub requested_by: ReservationUserResponse,
    pub space: ReservationSpaceResponse,
    pub slot: SlotResponse,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            reservation_date,
            purpose,
            status,
            created_at,
            requested_by,
            space,
            slot,
        } = value;
        Self {
            id: reservation_id,
            reservation_date,
            purpose,
            status: status.into(),
            created_at,
            requested_by: requested_by.into(),
            space: space.into(),
            slot: slot.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, new)]
pub struct ReminderResponse {
    pub sent: bool,
}

#[derive(Debug, Serialize, new)]
pub struct RemindersResponse {
    pub sent: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::Uri};

    #[test]
    fn list_query_maps_status_names() {
        let query: ReservationListQuery =
            serde_json::from_str(r#"{"status": "CONFIRMED", "dateFrom": "2025-06-01"}"#).unwrap();
        let filter = ReservationFilter::from(query);
        assert_eq!(filter.status, Some(ReservationStatus::Confirmed));
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(filter.date_to, None);
        assert_eq!(filter.requested_by, None);
    }

    #[test]
    fn blank_list_filters_mean_no_restriction() {
        let uri: Uri = "/api/v1/reports/export?dateFrom=&dateTo=&spaceId=&status=%20&requestedBy="
            .parse()
            .unwrap();
        let Query(query) = Query::<ReservationListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(ReservationFilter::from(query), ReservationFilter::default());
    }

    #[test]
    fn filled_list_filters_still_parse_from_the_query_string() {
        let space_id = SpaceId::new();
        let uri: Uri = format!(
            "/api/v1/reservations?dateFrom=2025-06-01&dateTo=&spaceId={space_id}&status=PENDING"
        )
        .parse()
        .unwrap();
        let Query(query) = Query::<ReservationListQuery>::try_from_uri(&uri).unwrap();
        let filter = ReservationFilter::from(query);
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(filter.date_to, None);
        assert_eq!(filter.space_id, Some(space_id));
        assert_eq!(filter.status, Some(ReservationStatus::Pending));

        let bad: Uri = "/api/v1/reservations?dateFrom=yesterday".parse().unwrap();
        assert!(Query::<ReservationListQuery>::try_from_uri(&bad).is_err());
    }

    #[test]
    fn decisions_are_upper_case() {
        let req: DecisionRequest = serde_json::from_str(r#"{"decision": "REJECT"}"#).unwrap();
        assert_eq!(Decision::from(req), Decision::Reject);
        assert!(serde_json::from_str::<DecisionRequest>(r#"{"decision": "maybe"}"#).is_err());
    }

    #[test]
    fn blank_purpose_is_dropped() {
        let req: ReservationRequest = serde_json::from_str(&format!(
            r#"{{"spaceId": "{}", "slotId": "{}", "reservationDate": "2025-06-10", "purpose": "  "}}"#,
            SpaceId::new(),
            SlotId::new()
        ))
        .unwrap();
        assert!(req.validate(&()).is_ok());
        assert_eq!(ReservationCandidate::from(req).purpose, None);
    }

    #[test]
    fn overlong_purpose_is_rejected() {
        let req = ReservationRequest {
            space_id: SpaceId::new(),
            slot_id: SlotId::new(),
            reservation_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            purpose: Some("x".repeat(251)),
        };
        assert!(req.validate(&()).is_err());
    }
}
