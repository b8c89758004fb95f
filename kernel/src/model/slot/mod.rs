pub mod event;

use crate::model::id::SlotId;
use chrono::NaiveTime;

// 開始 < 終了 の検証は行わない。(開始, 終了) の組の一意性のみがストレージ側で保証される
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub slot_id: SlotId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: Option<String>,
}

impl Slot {
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}
