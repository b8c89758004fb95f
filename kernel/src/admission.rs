use crate::{
    clock::Clock,
    model::{
        id::ReservationId,
        reservation::{
            event::{CreateReservation, UpdateReservation, UpdateReservationStatus},
            Decision, Reservation, ReservationCandidate, ReservationFilter, ReservationStatus,
            PURPOSE_MAX_LENGTH,
        },
        user::User,
    },
    notification::{Notification, NotificationSender},
    repository::reservation::ReservationRepository,
};
use shared::error::{AppError, AppResult};
use std::sync::Arc;

/// 予約の作成・決定・編集・取消を、権限とビジネスルールの検証を通してから実行する。
///
/// 状態遷移は `PENDING -> CONFIRMED | REJECTED` だが、決定時に現在の状態は確認しない。
/// 後から行った決定がそのまま上書きされる。
#[derive(Clone)]
pub struct AdmissionEngine {
    reservations: Arc<dyn ReservationRepository>,
    notifier: Arc<dyn NotificationSender>,
    clock: Arc<dyn Clock>,
}

impl AdmissionEngine {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        notifier: Arc<dyn NotificationSender>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reservations,
            notifier,
            clock,
        }
    }

    pub async fn request_reservation(
        &self,
        identity: &User,
        candidate: ReservationCandidate,
    ) -> AppResult<Reservation> {
        // 日付の検証は重複チェック（ストア側）より先に行う
        self.validate(&candidate)?;

        let ReservationCandidate {
            space_id,
            slot_id,
            reservation_date,
            purpose,
        } = candidate;
        let reservation_id = self
            .reservations
            .create(CreateReservation::new(
                identity.user_id,
                space_id,
                slot_id,
                reservation_date,
                purpose,
            ))
            .await?;
        let reservation = self.load(reservation_id).await?;

        tracing::info!(
            reservation_id = %reservation_id,
            requested_by = %identity.user_name,
            date = %reservation.reservation_date,
            "reservation requested"
        );

        self.notify_pending(&reservation).await;

        Ok(reservation)
    }

    pub async fn decide(
        &self,
        identity: &User,
        reservation_id: ReservationId,
        decision: Decision,
    ) -> AppResult<Reservation> {
        identity.ensure_administrative("decide on reservations")?;

        let mut reservation = self.load(reservation_id).await?;
        let status = ReservationStatus::from(decision);
        self.reservations
            .update_status(UpdateReservationStatus::new(reservation_id, status))
            .await?;

        tracing::info!(
            reservation_id = %reservation_id,
            decided_by = %identity.user_name,
            previous = reservation.status.as_ref(),
            status = status.as_ref(),
            "reservation decided"
        );

        reservation.status = status;
        Ok(reservation)
    }

    pub async fn edit_reservation(
        &self,
        identity: &User,
        reservation_id: ReservationId,
        fields: ReservationCandidate,
    ) -> AppResult<Reservation> {
        let reservation = self.load(reservation_id).await?;
        authorize_owner_or_admin(identity, &reservation, "edit")?;
        self.validate(&fields)?;

        let ReservationCandidate {
            space_id,
            slot_id,
            reservation_date,
            purpose,
        } = fields;
        self.reservations
            .update(UpdateReservation::new(
                reservation_id,
                space_id,
                slot_id,
                reservation_date,
                purpose,
            ))
            .await?;

        tracing::info!(
            reservation_id = %reservation_id,
            edited_by = %identity.user_name,
            "reservation edited"
        );

        self.load(reservation_id).await
    }

    pub async fn cancel_reservation(
        &self,
        identity: &User,
        reservation_id: ReservationId,
    ) -> AppResult<()> {
        let reservation = self.load(reservation_id).await?;
        authorize_owner_or_admin(identity, &reservation, "cancel")?;

        self.reservations.delete(reservation_id).await?;

        tracing::info!(
            reservation_id = %reservation_id,
            cancelled_by = %identity.user_name,
            "reservation cancelled"
        );
        Ok(())
    }

    pub async fn get_reservation(
        &self,
        identity: &User,
        reservation_id: ReservationId,
    ) -> AppResult<Reservation> {
        let reservation = self.load(reservation_id).await?;
        authorize_owner_or_admin(identity, &reservation, "view")?;
        Ok(reservation)
    }

    // 管理者以外は自分の予約だけに絞り込む
    pub async fn list_reservations(
        &self,
        identity: &User,
        mut filter: ReservationFilter,
    ) -> AppResult<Vec<Reservation>> {
        if !identity.is_administrative() {
            filter.requested_by = Some(identity.user_id);
        }
        self.reservations.find_all(filter).await
    }

    fn validate(&self, candidate: &ReservationCandidate) -> AppResult<()> {
        if candidate.reservation_date < self.clock.today() {
            return Err(AppError::ValidationError(
                "reservations cannot be made for past dates".into(),
            ));
        }
        if let Some(purpose) = &candidate.purpose {
            if purpose.chars().count() > PURPOSE_MAX_LENGTH {
                return Err(AppError::ValidationError(format!(
                    "purpose must be at most {PURPOSE_MAX_LENGTH} characters"
                )));
            }
        }
        Ok(())
    }

    async fn load(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("reservation ({reservation_id}) was not found"))
            })
    }

    // 通知の失敗は予約の成否に影響させない
    async fn notify_pending(&self, reservation: &Reservation) {
        let Some(email) = reservation
            .requested_by
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
        else {
            return;
        };
        let notification = Notification {
            recipient_email: email.to_string(),
            subject: "Reservation request received".into(),
            body: format!(
                "Your reservation request for {} on {} in slot {} was received and is pending confirmation.",
                reservation.space.space_name,
                reservation.reservation_date,
                reservation.slot.label(),
            ),
        };
        if let Err(e) = self.notifier.send(notification).await {
            tracing::warn!(
                reservation_id = %reservation.reservation_id,
                error.message = %e,
                "failed to send the pending notification"
            );
        }
    }
}

fn authorize_owner_or_admin(identity: &User, reservation: &Reservation, action: &str) -> AppResult<()> {
    if identity.is_administrative() || identity.owns(&reservation.requested_by) {
        Ok(())
    } else {
        Err(AppError::ForbiddenOperation(format!(
            "you are not allowed to {action} this reservation"
        )))
    }
}
