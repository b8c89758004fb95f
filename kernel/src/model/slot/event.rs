use crate::model::id::SlotId;
use chrono::NaiveTime;

pub struct CreateSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct UpdateSlot {
    pub slot_id: SlotId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: Option<String>,
}
