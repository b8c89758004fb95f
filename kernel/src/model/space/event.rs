use crate::model::{id::SpaceId, space::SpaceType};

pub struct CreateSpace {
    pub space_name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub space_type: SpaceType,
    pub is_active: bool,
}

#[derive(Debug)]
pub struct UpdateSpace {
    pub space_id: SpaceId,
    pub space_name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub space_type: SpaceType,
    pub is_active: bool,
}
