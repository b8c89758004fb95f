pub mod event;

use crate::model::id::SpaceId;
use strum::{AsRefStr, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceType {
    Classroom,
    Lab,
    Room,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub space_id: SpaceId,
    pub space_name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub space_type: SpaceType,
    pub is_active: bool,
}
