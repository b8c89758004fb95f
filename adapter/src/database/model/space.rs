use kernel::model::{
    id::SpaceId,
    space::{Space, SpaceType},
};
use shared::error::AppError;
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct SpaceRow {
    pub space_id: SpaceId,
    pub space_name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub space_type: String,
    pub is_active: bool,
}

impl TryFrom<SpaceRow> for Space {
    type Error = AppError;

    fn try_from(value: SpaceRow) -> Result<Self, Self::Error> {
        let SpaceRow {
            space_id,
            space_name,
            capacity,
            location,
            space_type,
            is_active,
        } = value;
        Ok(Space {
            space_id,
            space_name,
            capacity,
            location,
            space_type: SpaceType::from_str(&space_type)
                .map_err(|e| AppError::ConversionEntityError(e.to_string()))?,
            is_active,
        })
    }
}
