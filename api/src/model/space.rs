use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::SpaceId,
    space::{
        event::{CreateSpace, UpdateSpace},
        Space, SpaceType,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceTypeName {
    Classroom,
    Lab,
    Room,
}

impl From<SpaceTypeName> for SpaceType {
    fn from(value: SpaceTypeName) -> Self {
        match value {
            SpaceTypeName::Classroom => Self::Classroom,
            SpaceTypeName::Lab => Self::Lab,
            SpaceTypeName::Room => Self::Room,
        }
    }
}

impl From<SpaceType> for SpaceTypeName {
    fn from(value: SpaceType) -> Self {
        match value {
            SpaceType::Classroom => Self::Classroom,
            SpaceType::Lab => Self::Lab,
            SpaceType::Room => Self::Room,
        }
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceRequest {
    #[garde(length(chars, min = 1, max = 100))]
    pub space_name: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(length(chars, max = 200))]
    pub location: Option<String>,
    #[garde(skip)]
    pub space_type: SpaceTypeName,
    #[garde(skip)]
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl From<CreateSpaceRequest> for CreateSpace {
    fn from(value: CreateSpaceRequest) -> Self {
        let CreateSpaceRequest {
            space_name,
            capacity,
            location,
            space_type,
            is_active,
        } = value;
        CreateSpace {
            space_name,
            capacity,
            location,
            space_type: space_type.into(),
            is_active,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpaceRequest {
    #[garde(length(chars, min = 1, max = 100))]
    pub space_name: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(length(chars, max = 200))]
    pub location: Option<String>,
    #[garde(skip)]
    pub space_type: SpaceTypeName,
    #[garde(skip)]
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(new)]
pub struct UpdateSpaceRequestWithIds(SpaceId, UpdateSpaceRequest);

impl From<UpdateSpaceRequestWithIds> for UpdateSpace {
    fn from(value: UpdateSpaceRequestWithIds) -> Self {
        let UpdateSpaceRequestWithIds(
            space_id,
            UpdateSpaceRequest {
                space_name,
                capacity,
                location,
                space_type,
                is_active,
            },
        ) = value;
        UpdateSpace {
            space_id,
            space_name,
            capacity,
            location,
            space_type: space_type.into(),
            is_active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceResponse {
    pub id: SpaceId,
    pub space_name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub space_type: SpaceTypeName,
    pub is_active: bool,
}

impl From<Space> for SpaceResponse {
    fn from(value: Space) -> Self {
        let Space {
            space_id,
            space_name,
            capacity,
            location,
            space_type,
            is_active,
        } = value;
        Self {
            id: space_id,
            space_name,
            capacity,
            location,
            space_type: space_type.into(),
            is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_spaces_are_active_unless_stated() {
        let req: CreateSpaceRequest = serde_json::from_str(
            r#"{"spaceName": "Lab A", "capacity": 20, "spaceType": "LAB"}"#,
        )
        .unwrap();
        assert!(req.validate(&()).is_ok());
        let event = CreateSpace::from(req);
        assert!(event.is_active);
        assert_eq!(event.space_type, SpaceType::Lab);
        assert_eq!(event.location, None);
    }

    #[test]
    fn capacity_must_be_positive() {
        let req: CreateSpaceRequest = serde_json::from_str(
            r#"{"spaceName": "Lab A", "capacity": 0, "spaceType": "LAB"}"#,
        )
        .unwrap();
        assert!(req.validate(&()).is_err());
    }
}
