use crate::model::{
    id::{SlotId, SpaceId},
    list::{ListOptions, PaginatedList},
    slot::{
        event::{CreateSlot, UpdateSlot},
        Slot,
    },
    space::{
        event::{CreateSpace, UpdateSpace},
        Space,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;
use std::fmt::Display;

/// 予約の参照先となるカタログ（スペース・時間枠）のエンティティ
pub trait CatalogEntity: Send + Sync + 'static {
    type Id: Copy + Display + PartialEq + Send + Sync + 'static;
    type Create: Send + 'static;
    type Update: Send + 'static;

    const KIND: &'static str;

    fn id(&self) -> Self::Id;
}

impl CatalogEntity for Space {
    type Id = SpaceId;
    type Create = CreateSpace;
    type Update = UpdateSpace;

    const KIND: &'static str = "space";

    fn id(&self) -> SpaceId {
        self.space_id
    }
}

impl CatalogEntity for Slot {
    type Id = SlotId;
    type Create = CreateSlot;
    type Update = UpdateSlot;

    const KIND: &'static str = "slot";

    fn id(&self) -> SlotId {
        self.slot_id
    }
}

#[async_trait]
pub trait CatalogRepository<E: CatalogEntity>: Send + Sync {
    async fn create(&self, event: E::Create) -> AppResult<E>;
    // ページングなしの全件取得（スペースは名前順、時間枠は開始時刻順）
    async fn find_all(&self) -> AppResult<Vec<E>>;
    async fn find_page(&self, options: ListOptions) -> AppResult<PaginatedList<E>>;
    async fn find_by_id(&self, id: E::Id) -> AppResult<Option<E>>;
    async fn update(&self, event: E::Update) -> AppResult<()>;
    // 参照している予約もカスケードで削除される
    async fn delete(&self, id: E::Id) -> AppResult<()>;
}
