use crate::{
    model::{
        list::{ListOptions, PaginatedList},
        user::User,
    },
    repository::catalog::{CatalogEntity, CatalogRepository},
};
use shared::error::{AppError, AppResult};
use std::sync::Arc;

/// スペースと時間枠で共通の CRUD。参照は誰でも可能、変更は管理者のみ
pub struct CatalogService<E: CatalogEntity> {
    repository: Arc<dyn CatalogRepository<E>>,
}

impl<E: CatalogEntity> Clone for CatalogService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

impl<E: CatalogEntity> CatalogService<E> {
    pub fn new(repository: Arc<dyn CatalogRepository<E>>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, identity: &User, event: E::Create) -> AppResult<E> {
        identity.ensure_administrative(&format!("create a {}", E::KIND))?;
        let created = self.repository.create(event).await?;
        tracing::info!(kind = E::KIND, id = %created.id(), created_by = %identity.user_name, "catalog entry created");
        Ok(created)
    }

    pub async fn list(&self, options: ListOptions) -> AppResult<PaginatedList<E>> {
        self.repository.find_page(options).await
    }

    pub async fn find_all(&self) -> AppResult<Vec<E>> {
        self.repository.find_all().await
    }

    pub async fn get(&self, id: E::Id) -> AppResult<E> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("{} ({id}) was not found", E::KIND)))
    }

    pub async fn update(&self, identity: &User, id: E::Id, event: E::Update) -> AppResult<()> {
        identity.ensure_administrative(&format!("update a {}", E::KIND))?;
        self.repository.update(event).await?;
        tracing::info!(kind = E::KIND, id = %id, updated_by = %identity.user_name, "catalog entry updated");
        Ok(())
    }

    pub async fn delete(&self, identity: &User, id: E::Id) -> AppResult<()> {
        identity.ensure_administrative(&format!("delete a {}", E::KIND))?;
        self.repository.delete(id).await?;
        tracing::info!(kind = E::KIND, id = %id, deleted_by = %identity.user_name, "catalog entry deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{
            role::Role,
            slot::{event::CreateSlot, Slot},
            space::{
                event::{CreateSpace, UpdateSpace},
                Space, SpaceType,
            },
        },
        testing::{space, time, user, InMemoryCatalog},
    };

    fn create_space(name: &str) -> CreateSpace {
        CreateSpace {
            space_name: name.into(),
            capacity: 20,
            location: Some("Building A, 2nd floor".into()),
            space_type: SpaceType::Lab,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn administrators_manage_spaces() {
        let service = CatalogService::<Space>::new(InMemoryCatalog::new(vec![]));
        let admin = user("root", Role::Admin);

        let created = service.create(&admin, create_space("Lab B")).await.unwrap();
        service.create(&admin, create_space("Aula 1")).await.unwrap();

        let page = service.list(ListOptions::default()).await.unwrap();
        assert_eq!(page.total, 2);
        let names: Vec<_> = page.items.iter().map(|s| s.space_name.as_str()).collect();
        assert_eq!(names, vec!["Aula 1", "Lab B"]);

        service
            .update(
                &admin,
                created.space_id,
                UpdateSpace {
                    space_id: created.space_id,
                    space_name: "Lab B".into(),
                    capacity: 25,
                    location: None,
                    space_type: SpaceType::Lab,
                    is_active: false,
                },
            )
            .await
            .unwrap();
        let fetched = service.get(created.space_id).await.unwrap();
        assert_eq!(fetched.capacity, 25);
        assert!(!fetched.is_active);

        service.delete(&admin, created.space_id).await.unwrap();
        assert!(matches!(
            service.get(created.space_id).await,
            Err(AppError::EntityNotFound(_))
        ));
    }

    #[tokio::test]
    async fn ordinary_users_cannot_change_the_catalog() {
        let existing = space("Room 101");
        let service = CatalogService::<Space>::new(InMemoryCatalog::new(vec![existing.clone()]));
        let alice = user("alice", Role::User);

        assert!(matches!(
            service.create(&alice, create_space("Mine")).await,
            Err(AppError::ForbiddenOperation(_))
        ));
        assert!(matches!(
            service.delete(&alice, existing.space_id).await,
            Err(AppError::ForbiddenOperation(_))
        ));
        // 参照は許可される
        assert_eq!(service.get(existing.space_id).await.unwrap(), existing);
    }

    #[tokio::test]
    async fn duplicate_slot_ranges_conflict_but_inverted_ranges_are_accepted() {
        let service = CatalogService::<Slot>::new(InMemoryCatalog::new(vec![]));
        let admin = user("root", Role::Admin);
        let morning = || CreateSlot {
            start_time: time(8, 0),
            end_time: time(10, 0),
            description: Some("Morning shift".into()),
        };

        service.create(&admin, morning()).await.unwrap();
        assert!(matches!(
            service.create(&admin, morning()).await,
            Err(AppError::Conflict(_))
        ));

        // 開始 > 終了 でも検証しない
        service
            .create(
                &admin,
                CreateSlot {
                    start_time: time(18, 0),
                    end_time: time(16, 0),
                    description: None,
                },
            )
            .await
            .unwrap();

        let starts: Vec<_> = service
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.start_time)
            .collect();
        assert_eq!(starts, vec![time(8, 0), time(18, 0)]);
    }
}
