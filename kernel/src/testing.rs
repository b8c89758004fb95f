// カーネル内のテスト専用の、メモリ上で動くリポジトリと通知の実装
use crate::{
    model::{
        id::{ReservationId, SlotId, SpaceId, UserId},
        list::{ListOptions, PaginatedList},
        reservation::{
            event::{CreateReservation, UpdateReservation, UpdateReservationStatus},
            sort_for_listing, Reservation, ReservationFilter, ReservationSpace,
            ReservationStatus,
        },
        role::Role,
        slot::{
            event::{CreateSlot, UpdateSlot},
            Slot,
        },
        space::{
            event::{CreateSpace, UpdateSpace},
            Space, SpaceType,
        },
        user::{ReservationUser, User},
    },
    notification::{Notification, NotificationSender},
    repository::{
        catalog::{CatalogEntity, CatalogRepository},
        reservation::ReservationRepository,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use shared::error::{AppError, AppResult};
use std::sync::{Arc, Mutex};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn user(name: &str, role: Role) -> User {
    User {
        user_id: UserId::new(),
        user_name: name.into(),
        email: Some(format!("{name}@example.com")),
        role,
        is_staff: false,
    }
}

pub fn space(name: &str) -> Space {
    Space {
        space_id: SpaceId::new(),
        space_name: name.into(),
        capacity: 30,
        location: None,
        space_type: SpaceType::Classroom,
        is_active: true,
    }
}

pub fn slot(start: NaiveTime, end: NaiveTime) -> Slot {
    Slot {
        slot_id: SlotId::new(),
        start_time: start,
        end_time: end,
        description: None,
    }
}

/// 集計処理のテストで使う、リポジトリを通さずに組み立てた予約
pub fn reservation(
    requester: &User,
    space: &Space,
    slot: &Slot,
    reservation_date: NaiveDate,
    status: ReservationStatus,
) -> Reservation {
    Reservation {
        reservation_id: ReservationId::new(),
        reservation_date,
        purpose: None,
        status,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        requested_by: ReservationUser::from(requester),
        space: ReservationSpace {
            space_id: space.space_id,
            space_name: space.space_name.clone(),
        },
        slot: slot.clone(),
    }
}

struct Row {
    reservation_id: ReservationId,
    user_id: UserId,
    space_id: SpaceId,
    slot_id: SlotId,
    reservation_date: NaiveDate,
    purpose: Option<String>,
    status: ReservationStatus,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    users: Vec<ReservationUser>,
    spaces: Vec<Space>,
    slots: Vec<Slot>,
    rows: Vec<Row>,
    ticks: i64,
}

impl State {
    fn ensure_referents(&self, user_id: Option<UserId>, space_id: SpaceId, slot_id: SlotId) -> AppResult<()> {
        if let Some(user_id) = user_id {
            if !self.users.iter().any(|u| u.user_id == user_id) {
                return Err(AppError::EntityNotFound(format!("user ({user_id}) was not found")));
            }
        }
        if !self.spaces.iter().any(|s| s.space_id == space_id) {
            return Err(AppError::EntityNotFound(format!("space ({space_id}) was not found")));
        }
        if !self.slots.iter().any(|s| s.slot_id == slot_id) {
            return Err(AppError::EntityNotFound(format!("slot ({slot_id}) was not found")));
        }
        Ok(())
    }

    fn occupied(
        &self,
        space_id: SpaceId,
        reservation_date: NaiveDate,
        slot_id: SlotId,
        except: Option<ReservationId>,
    ) -> bool {
        self.rows.iter().any(|r| {
            Some(r.reservation_id) != except
                && r.space_id == space_id
                && r.reservation_date == reservation_date
                && r.slot_id == slot_id
        })
    }

    fn materialize(&self, row: &Row) -> Option<Reservation> {
        let requested_by = self.users.iter().find(|u| u.user_id == row.user_id)?.clone();
        let space = self.spaces.iter().find(|s| s.space_id == row.space_id)?;
        let slot = self.slots.iter().find(|s| s.slot_id == row.slot_id)?.clone();
        Some(Reservation {
            reservation_id: row.reservation_id,
            reservation_date: row.reservation_date,
            purpose: row.purpose.clone(),
            status: row.status,
            created_at: row.created_at,
            requested_by,
            space: ReservationSpace {
                space_id: space.space_id,
                space_name: space.space_name.clone(),
            },
            slot,
        })
    }
}

/// 一意制約をロック内のチェックで再現する予約ストア
#[derive(Default)]
pub struct InMemoryReservations {
    state: Mutex<State>,
}

impl InMemoryReservations {
    pub fn with_catalog(users: &[&User], spaces: &[&Space], slots: &[&Slot]) -> Arc<Self> {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            state.users = users.iter().map(|u| ReservationUser::from(*u)).collect();
            state.spaces = spaces.iter().map(|s| (*s).clone()).collect();
            state.slots = slots.iter().map(|s| (*s).clone()).collect();
        }
        Arc::new(store)
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservations {
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        let mut state = self.state.lock().unwrap();
        state.ensure_referents(Some(event.requested_by), event.space_id, event.slot_id)?;
        if state.occupied(event.space_id, event.reservation_date, event.slot_id, None) {
            return Err(AppError::Conflict(
                "a reservation already exists for that space, date and slot".into(),
            ));
        }
        state.ticks += 1;
        let created_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
            + Duration::seconds(state.ticks);
        let reservation_id = ReservationId::new();
        state.rows.push(Row {
            reservation_id,
            user_id: event.requested_by,
            space_id: event.space_id,
            slot_id: event.slot_id,
            reservation_date: event.reservation_date,
            purpose: event.purpose,
            status: ReservationStatus::default(),
            created_at,
        });
        Ok(reservation_id)
    }

    async fn update(&self, event: UpdateReservation) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        state.ensure_referents(None, event.space_id, event.slot_id)?;
        if state.occupied(
            event.space_id,
            event.reservation_date,
            event.slot_id,
            Some(event.reservation_id),
        ) {
            return Err(AppError::Conflict(
                "a reservation already exists for that space, date and slot".into(),
            ));
        }
        let row = state
            .rows
            .iter_mut()
            .find(|r| r.reservation_id == event.reservation_id)
            .ok_or_else(|| AppError::EntityNotFound("reservation was not found".into()))?;
        row.space_id = event.space_id;
        row.slot_id = event.slot_id;
        row.reservation_date = event.reservation_date;
        row.purpose = event.purpose;
        Ok(())
    }

    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let row = state
            .rows
            .iter_mut()
            .find(|r| r.reservation_id == event.reservation_id)
            .ok_or_else(|| AppError::EntityNotFound("reservation was not found".into()))?;
        row.status = event.status;
        Ok(())
    }

    async fn delete(&self, reservation_id: ReservationId) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.rows.len();
        state.rows.retain(|r| r.reservation_id != reservation_id);
        if state.rows.len() == before {
            return Err(AppError::EntityNotFound("reservation was not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .rows
            .iter()
            .find(|r| r.reservation_id == reservation_id)
            .and_then(|r| state.materialize(r)))
    }

    async fn find_all(&self, filter: ReservationFilter) -> AppResult<Vec<Reservation>> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<Reservation> = state
            .rows
            .iter()
            .filter_map(|r| state.materialize(r))
            .filter(|r| filter.matches(r))
            .collect();
        sort_for_listing(&mut items);
        Ok(items)
    }
}

pub struct InMemoryCatalog<E> {
    items: Mutex<Vec<E>>,
}

impl<E: CatalogEntity + Clone> InMemoryCatalog<E> {
    pub fn new(items: Vec<E>) -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(items),
        })
    }

    fn all(&self) -> Vec<E> {
        self.items.lock().unwrap().clone()
    }

    fn page(&self, options: ListOptions) -> PaginatedList<E> {
        let items = self.all();
        let total = items.len() as i64;
        PaginatedList {
            total,
            limit: options.limit,
            offset: options.offset,
            items: items
                .into_iter()
                .skip(options.offset as usize)
                .take(options.limit as usize)
                .collect(),
        }
    }

    fn get(&self, id: E::Id) -> Option<E> {
        self.all().into_iter().find(|e| e.id() == id)
    }

    fn remove(&self, id: E::Id) -> AppResult<()> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|e| e.id() != id);
        if items.len() == before {
            return Err(AppError::EntityNotFound(format!("{} ({id}) was not found", E::KIND)));
        }
        Ok(())
    }

    fn replace(&self, id: E::Id, value: E) -> AppResult<()> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| AppError::EntityNotFound(format!("{} ({id}) was not found", E::KIND)))?;
        *item = value;
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository<Space> for InMemoryCatalog<Space> {
    async fn create(&self, event: CreateSpace) -> AppResult<Space> {
        let space = Space {
            space_id: SpaceId::new(),
            space_name: event.space_name,
            capacity: event.capacity,
            location: event.location,
            space_type: event.space_type,
            is_active: event.is_active,
        };
        let mut items = self.items.lock().unwrap();
        items.push(space.clone());
        items.sort_by(|a, b| a.space_name.cmp(&b.space_name));
        Ok(space)
    }

    async fn find_all(&self) -> AppResult<Vec<Space>> {
        Ok(self.all())
    }

    async fn find_page(&self, options: ListOptions) -> AppResult<PaginatedList<Space>> {
        Ok(self.page(options))
    }

    async fn find_by_id(&self, id: SpaceId) -> AppResult<Option<Space>> {
        Ok(self.get(id))
    }

    async fn update(&self, event: UpdateSpace) -> AppResult<()> {
        self.replace(
            event.space_id,
            Space {
                space_id: event.space_id,
                space_name: event.space_name,
                capacity: event.capacity,
                location: event.location,
                space_type: event.space_type,
                is_active: event.is_active,
            },
        )
    }

    async fn delete(&self, id: SpaceId) -> AppResult<()> {
        self.remove(id)
    }
}

#[async_trait]
impl CatalogRepository<Slot> for InMemoryCatalog<Slot> {
    async fn create(&self, event: CreateSlot) -> AppResult<Slot> {
        let mut items = self.items.lock().unwrap();
        if items
            .iter()
            .any(|s| s.start_time == event.start_time && s.end_time == event.end_time)
        {
            return Err(AppError::Conflict("a slot with that time range already exists".into()));
        }
        let slot = Slot {
            slot_id: SlotId::new(),
            start_time: event.start_time,
            end_time: event.end_time,
            description: event.description,
        };
        items.push(slot.clone());
        items.sort_by_key(|s| s.start_time);
        Ok(slot)
    }

    async fn find_all(&self) -> AppResult<Vec<Slot>> {
        Ok(self.all())
    }

    async fn find_page(&self, options: ListOptions) -> AppResult<PaginatedList<Slot>> {
        Ok(self.page(options))
    }

    async fn find_by_id(&self, id: SlotId) -> AppResult<Option<Slot>> {
        Ok(self.get(id))
    }

    async fn update(&self, event: UpdateSlot) -> AppResult<()> {
        self.replace(
            event.slot_id,
            Slot {
                slot_id: event.slot_id,
                start_time: event.start_time,
                end_time: event.end_time,
                description: event.description,
            },
        )
    }

    async fn delete(&self, id: SlotId) -> AppResult<()> {
        self.remove(id)
    }
}

/// 送信内容を記録する通知。指定したアドレス宛ての送信は失敗させる
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    failing_recipient: Option<String>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_for(recipient: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::default(),
            failing_recipient: Some(recipient.into()),
        })
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for RecordingNotifier {
    async fn send(&self, notification: Notification) -> AppResult<()> {
        if self.failing_recipient.as_deref() == Some(notification.recipient_email.as_str()) {
            return Err(AppError::ExternalServiceError("mailbox unavailable".into()));
        }
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}
