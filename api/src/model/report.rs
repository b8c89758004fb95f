use chrono::{DateTime, NaiveDate, Utc};
use kernel::{
    model::id::ReservationId,
    report::{
        CalendarEvent, Dashboard, ExportRow, FilteredReport, MonthlyCount, SpaceCount,
        SpaceUtilization, WeeklyCount,
    },
};
use serde::Serialize;

use super::{
    reservation::{ReservationResponse, ReservationStatusName},
    space::SpaceResponse,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredReportResponse {
    pub reservations: Vec<ReservationResponse>,
    pub spaces: Vec<SpaceResponse>,
}

impl From<FilteredReport> for FilteredReportResponse {
    fn from(value: FilteredReport) -> Self {
        Self {
            reservations: value
                .reservations
                .into_iter()
                .map(ReservationResponse::from)
                .collect(),
            spaces: value.spaces.into_iter().map(SpaceResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRowResponse {
    pub id: ReservationId,
    pub requested_by: String,
    pub space_name: String,
    pub reservation_date: NaiveDate,
    pub slot: String,
    pub status: ReservationStatusName,
    pub created_at: DateTime<Utc>,
}

impl From<ExportRow> for ExportRowResponse {
    fn from(value: ExportRow) -> Self {
        let ExportRow {
            reservation_id,
            requested_by,
            space_name,
            reservation_date,
            slot,
            status,
            created_at,
        } = value;
        Self {
            id: reservation_id,
            requested_by,
            space_name,
            reservation_date,
            slot,
            status: status.into(),
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub rows: Vec<ExportRowResponse>,
}

impl From<Vec<ExportRow>> for ExportResponse {
    fn from(value: Vec<ExportRow>) -> Self {
        Self {
            rows: value.into_iter().map(ExportRowResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalendarEventResponse {
    pub title: String,
    pub start: NaiveDate,
    pub color: &'static str,
}

impl From<CalendarEvent> for CalendarEventResponse {
    fn from(value: CalendarEvent) -> Self {
        let CalendarEvent {
            title,
            start,
            color,
        } = value;
        Self {
            title,
            start,
            color,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MonthlyCountResponse {
    pub month: String,
    pub count: usize,
}

impl From<MonthlyCount> for MonthlyCountResponse {
    fn from(value: MonthlyCount) -> Self {
        Self {
            month: value.month,
            count: value.count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WeeklyCountResponse {
    pub week: u32,
    pub count: usize,
}

impl From<WeeklyCount> for WeeklyCountResponse {
    fn from(value: WeeklyCount) -> Self {
        Self {
            week: value.week,
            count: value.count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceCountResponse {
    pub space_name: String,
    pub count: usize,
}

impl From<SpaceCount> for SpaceCountResponse {
    fn from(value: SpaceCount) -> Self {
        Self {
            space_name: value.space_name,
            count: value.count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceUtilizationResponse {
    pub space_name: String,
    pub percentage: f64,
}

impl From<SpaceUtilization> for SpaceUtilizationResponse {
    fn from(value: SpaceUtilization) -> Self {
        Self {
            space_name: value.space_name,
            percentage: value.percentage,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_spaces: usize,
    pub total_reservations: usize,
    pub recent_reservations: Vec<ReservationResponse>,
    pub by_month: Vec<MonthlyCountResponse>,
    pub by_week: Vec<WeeklyCountResponse>,
    pub top_spaces: Vec<SpaceCountResponse>,
    pub utilization: Vec<SpaceUtilizationResponse>,
}

fn convert<S, T: From<S>>(items: Vec<S>) -> Vec<T> {
    items.into_iter().map(T::from).collect()
}

impl From<Dashboard> for DashboardResponse {
    fn from(value: Dashboard) -> Self {
        let Dashboard {
            total_spaces,
            total_reservations,
            recent_reservations,
            by_month,
            by_week,
            top_spaces,
            utilization,
        } = value;
        Self {
            total_spaces,
            total_reservations,
            recent_reservations: convert(recent_reservations),
            by_month: convert(by_month),
            by_week: convert(by_week),
            top_spaces: convert(top_spaces),
            utilization: convert(utilization),
        }
    }
}
