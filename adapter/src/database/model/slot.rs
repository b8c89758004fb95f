use chrono::NaiveTime;
use kernel::model::{id::SlotId, slot::Slot};

#[derive(sqlx::FromRow)]
pub struct SlotRow {
    pub slot_id: SlotId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: Option<String>,
}

impl From<SlotRow> for Slot {
    fn from(value: SlotRow) -> Self {
        let SlotRow {
            slot_id,
            start_time,
            end_time,
            description,
        } = value;
        Slot {
            slot_id,
            start_time,
            end_time,
            description,
        }
    }
}
