//! Read-only projections over the reservation store: filtered reports, export rows,
//! the calendar and dashboard aggregates.

use crate::{
    model::{
        id::ReservationId,
        reservation::{Reservation, ReservationFilter, ReservationStatus},
        slot::Slot,
        space::Space,
        user::User,
    },
    repository::{catalog::CatalogRepository, reservation::ReservationRepository},
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use shared::error::AppResult;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};

/// 管理者以外に見せるカレンダーのタイトル
pub const OCCUPIED_MARKER: &str = "Occupied";
pub const ADMIN_EVENT_COLOR: &str = "#007bff";
pub const OCCUPIED_EVENT_COLOR: &str = "#dc3545";

pub const RECENT_RESERVATIONS: usize = 8;
pub const TOP_SPACES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub reservation_id: ReservationId,
    pub requested_by: String,
    pub space_name: String,
    pub reservation_date: NaiveDate,
    pub slot: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Reservation> for ExportRow {
    fn from(value: &Reservation) -> Self {
        Self {
            reservation_id: value.reservation_id,
            requested_by: value.requested_by.user_name.clone(),
            space_name: value.space.space_name.clone(),
            reservation_date: value.reservation_date,
            slot: value.slot.label(),
            status: value.status,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDate,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCount {
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyCount {
    pub week: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceCount {
    pub space_name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpaceUtilization {
    pub space_name: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub total_spaces: usize,
    pub total_reservations: usize,
    pub recent_reservations: Vec<Reservation>,
    pub by_month: Vec<MonthlyCount>,
    pub by_week: Vec<WeeklyCount>,
    pub top_spaces: Vec<SpaceCount>,
    pub utilization: Vec<SpaceUtilization>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilteredReport {
    pub reservations: Vec<Reservation>,
    pub spaces: Vec<Space>,
}

#[derive(Clone)]
pub struct ReportSlicer {
    reservations: Arc<dyn ReservationRepository>,
    spaces: Arc<dyn CatalogRepository<Space>>,
    slots: Arc<dyn CatalogRepository<Slot>>,
}

impl ReportSlicer {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        spaces: Arc<dyn CatalogRepository<Space>>,
        slots: Arc<dyn CatalogRepository<Slot>>,
    ) -> Self {
        Self {
            reservations,
            spaces,
            slots,
        }
    }

    pub async fn filtered(
        &self,
        identity: &User,
        filter: ReservationFilter,
    ) -> AppResult<FilteredReport> {
        identity.ensure_administrative("view reservation reports")?;
        let reservations = self.reservations.find_all(filter).await?;
        let spaces = self.spaces.find_all().await?;
        Ok(FilteredReport {
            reservations,
            spaces,
        })
    }

    pub async fn export_rows(
        &self,
        identity: &User,
        filter: ReservationFilter,
    ) -> AppResult<Vec<ExportRow>> {
        identity.ensure_administrative("export reservations")?;
        let reservations = self.reservations.find_all(filter).await?;
        Ok(reservations.iter().map(ExportRow::from).collect())
    }

    // カレンダーは一般利用者にも公開するが、誰が何を予約したかは伏せる
    pub async fn calendar(&self, identity: &User) -> AppResult<Vec<CalendarEvent>> {
        let confirmed = self
            .reservations
            .find_all(ReservationFilter {
                status: Some(ReservationStatus::Confirmed),
                ..Default::default()
            })
            .await?;
        Ok(calendar_events(&confirmed, identity.is_administrative()))
    }

    pub async fn dashboard(&self, identity: &User) -> AppResult<Dashboard> {
        identity.ensure_administrative("view the dashboard")?;
        let reservations = self
            .reservations
            .find_all(ReservationFilter::default())
            .await?;
        let spaces = self.spaces.find_all().await?;
        let slot_count = self.slots.find_all().await?.len();

        Ok(Dashboard {
            total_spaces: spaces.len(),
            total_reservations: reservations.len(),
            recent_reservations: recent(&reservations, RECENT_RESERVATIONS),
            by_month: count_by_month(&reservations),
            by_week: count_confirmed_by_iso_week(&reservations),
            top_spaces: top_spaces(&spaces, &reservations, TOP_SPACES),
            utilization: utilization(&spaces, &reservations, slot_count),
        })
    }
}

pub fn calendar_events(confirmed: &[Reservation], administrative: bool) -> Vec<CalendarEvent> {
    confirmed
        .iter()
        .filter(|r| r.status == ReservationStatus::Confirmed)
        .map(|r| {
            if administrative {
                CalendarEvent {
                    title: format!("{} - {}", r.space.space_name, r.requested_by.user_name),
                    start: r.reservation_date,
                    color: ADMIN_EVENT_COLOR,
                }
            } else {
                CalendarEvent {
                    title: OCCUPIED_MARKER.to_string(),
                    start: r.reservation_date,
                    color: OCCUPIED_EVENT_COLOR,
                }
            }
        })
        .collect()
}

pub fn recent(reservations: &[Reservation], n: usize) -> Vec<Reservation> {
    let mut sorted = reservations.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(n);
    sorted
}

/// 予約日の月ごとの件数（全ステータス、古い月から順に）
pub fn count_by_month(reservations: &[Reservation]) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for r in reservations {
        *counts
            .entry((r.reservation_date.year(), r.reservation_date.month()))
            .or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((year, month), count)| MonthlyCount {
            month: format!("{year:04}-{month:02}"),
            count,
        })
        .collect()
}

/// 確定済み予約の ISO 週番号ごとの件数。年をまたいでも週番号だけで集計する
pub fn count_confirmed_by_iso_week(reservations: &[Reservation]) -> Vec<WeeklyCount> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for r in reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Confirmed)
    {
        *counts.entry(r.reservation_date.iso_week().week()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(week, count)| WeeklyCount { week, count })
        .collect()
}

/// 予約件数の多いスペース上位 n 件。予約のないスペースも 0 件として候補に含める
pub fn top_spaces(spaces: &[Space], reservations: &[Reservation], n: usize) -> Vec<SpaceCount> {
    let mut counts: HashMap<_, usize> = HashMap::new();
    for r in reservations {
        *counts.entry(r.space.space_id).or_default() += 1;
    }
    let mut ranked: Vec<SpaceCount> = spaces
        .iter()
        .map(|s| SpaceCount {
            space_name: s.space_name.clone(),
            count: counts.get(&s.space_id).copied().unwrap_or_default(),
        })
        .collect();
    // 同数の場合は名前順を保つ
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}

/// スペースごとの利用率（%、小数第 1 位で丸め）。
///
/// 分母は「時間枠の総数 × 予約が存在する日付の数」で、実際にその日にどの枠が
/// 利用可能だったかは考慮しない概算値。分母が 0 の場合は 1 として扱う。
pub fn utilization(
    spaces: &[Space],
    reservations: &[Reservation],
    slot_count: usize,
) -> Vec<SpaceUtilization> {
    let distinct_dates: BTreeSet<NaiveDate> =
        reservations.iter().map(|r| r.reservation_date).collect();
    let capacity = match slot_count * distinct_dates.len() {
        0 => 1,
        n => n,
    };

    spaces
        .iter()
        .map(|s| {
            let confirmed = reservations
                .iter()
                .filter(|r| {
                    r.space.space_id == s.space_id && r.status == ReservationStatus::Confirmed
                })
                .count();
            let percentage = confirmed as f64 / capacity as f64 * 100.0;
            SpaceUtilization {
                space_name: s.space_name.clone(),
                percentage: (percentage * 10.0).round() / 10.0,
            }
        })
        .collect()
}
