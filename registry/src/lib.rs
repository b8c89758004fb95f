use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    notification::{GmailNotificationSender, LogNotificationSender},
    redis::RedisClient,
    repository::{
        auth::AuthRepositoryImpl, health::HealthCheckRepositoryImpl,
        reservation::ReservationRepositoryImpl, slot::SlotRepositoryImpl,
        space::SpaceRepositoryImpl, user::UserRepositoryImpl,
    },
};
use kernel::{
    admission::AdmissionEngine,
    catalog::CatalogService,
    clock::{Clock, SystemClock},
    model::{slot::Slot, space::Space},
    notification::NotificationSender,
    reminder::ReminderBatch,
    report::ReportSlicer,
    repository::{
        auth::AuthRepository, catalog::CatalogRepository, health::HealthCheckRepository,
        reservation::ReservationRepository, user::UserRepository,
    },
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    admission_engine: AdmissionEngine,
    space_service: CatalogService<Space>,
    slot_service: CatalogService<Slot>,
    report_slicer: ReportSlicer,
    reminder_batch: ReminderBatch,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        redis_client: Arc<RedisClient>,
        notifier: Arc<dyn NotificationSender>,
        app_config: &AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let reservation_repository: Arc<dyn ReservationRepository> =
            Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let space_repository: Arc<dyn CatalogRepository<Space>> =
            Arc::new(SpaceRepositoryImpl::new(pool.clone()));
        let slot_repository: Arc<dyn CatalogRepository<Slot>> =
            Arc::new(SlotRepositoryImpl::new(pool.clone()));
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        Self {
            health_check_repository,
            auth_repository,
            user_repository,
            admission_engine: AdmissionEngine::new(
                reservation_repository.clone(),
                notifier.clone(),
                clock.clone(),
            ),
            space_service: CatalogService::new(space_repository.clone()),
            slot_service: CatalogService::new(slot_repository.clone()),
            report_slicer: ReportSlicer::new(
                reservation_repository.clone(),
                space_repository,
                slot_repository,
            ),
            reminder_batch: ReminderBatch::new(reservation_repository, notifier, clock),
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn admission_engine(&self) -> &AdmissionEngine {
        &self.admission_engine
    }

    pub fn space_service(&self) -> &CatalogService<Space> {
        &self.space_service
    }

    pub fn slot_service(&self) -> &CatalogService<Slot> {
        &self.slot_service
    }

    pub fn report_slicer(&self) -> &ReportSlicer {
        &self.report_slicer
    }

    pub fn reminder_batch(&self) -> &ReminderBatch {
        &self.reminder_batch
    }
}

/// Gmail の設定があれば Gmail 経由、なければログ出力のみの送信手段を返す
pub async fn build_notifier(app_config: &AppConfig) -> anyhow::Result<Arc<dyn NotificationSender>> {
    match &app_config.gmail {
        Some(gmail) => {
            let sender = GmailNotificationSender::connect(gmail).await?;
            tracing::info!("mail notifications are delivered through Gmail");
            Ok(Arc::new(sender))
        }
        None => {
            tracing::warn!("Gmail is not configured; notifications are only logged");
            Ok(Arc::new(LogNotificationSender))
        }
    }
}
