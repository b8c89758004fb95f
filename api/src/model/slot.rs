use chrono::NaiveTime;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::SlotId,
    slot::{
        event::{CreateSlot, UpdateSlot},
        Slot,
    },
};
use serde::{Deserialize, Serialize};

// 開始と終了の前後関係は検証しない
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    #[garde(skip)]
    pub start_time: NaiveTime,
    #[garde(skip)]
    pub end_time: NaiveTime,
    #[garde(length(chars, max = 200))]
    pub description: Option<String>,
}

impl From<SlotRequest> for CreateSlot {
    fn from(value: SlotRequest) -> Self {
        let SlotRequest {
            start_time,
            end_time,
            description,
        } = value;
        CreateSlot {
            start_time,
            end_time,
            description,
        }
    }
}

#[derive(new)]
pub struct SlotRequestWithIds(SlotId, SlotRequest);

impl From<SlotRequestWithIds> for UpdateSlot {
    fn from(value: SlotRequestWithIds) -> Self {
        let SlotRequestWithIds(
            slot_id,
            SlotRequest {
                start_time,
                end_time,
                description,
            },
        ) = value;
        UpdateSlot {
            slot_id,
            start_time,
            end_time,
            description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
    pub id: SlotId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub label: String,
    pub description: Option<String>,
}

impl From<Slot> for SlotResponse {
    fn from(value: Slot) -> Self {
        let label = value.label();
        let Slot {
            slot_id,
            start_time,
            end_time,
            description,
        } = value;
        Self {
            id: slot_id,
            start_time,
            end_time,
            label,
            description,
        }
    }
}
