use crate::{
    clock::Clock,
    model::{
        id::ReservationId,
        reservation::{Reservation, ReservationFilter, ReservationStatus},
        user::User,
    },
    notification::{Notification, NotificationSender},
    repository::reservation::ReservationRepository,
};
use shared::error::{AppError, AppResult};
use std::sync::Arc;

pub const REMINDER_SUBJECT: &str = "Reservation reminder";

/// 予約者にメールアドレスがない場合は `None`
pub fn reminder_for(reservation: &Reservation) -> Option<Notification> {
    let recipient = reservation
        .requested_by
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())?;
    Some(Notification {
        recipient_email: recipient.to_string(),
        subject: REMINDER_SUBJECT.to_string(),
        body: format!(
            "Remember your reservation for {} on {} in slot {}.",
            reservation.space.space_name,
            reservation.reservation_date,
            reservation.slot.label()
        ),
    })
}

/// 翌日の確定済み予約にリマインドを送る
#[derive(Clone)]
pub struct ReminderBatch {
    reservations: Arc<dyn ReservationRepository>,
    notifier: Arc<dyn NotificationSender>,
    clock: Arc<dyn Clock>,
}

impl ReminderBatch {
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

    /// 送信に成功した件数を返す。個別の送信失敗は警告ログのみで処理を続ける
    pub async fn run(&self) -> AppResult<usize> {
        let today = self.clock.today();
        let Some(tomorrow) = today.succ_opt() else {
            return Ok(0);
        };
        let targets = self
            .reservations
            .find_all(ReservationFilter {
                date_from: Some(tomorrow),
                date_to: Some(tomorrow),
                status: Some(ReservationStatus::Confirmed),
                ..Default::default()
            })
            .await?;

        let mut sent = 0;
        for reservation in &targets {
            let Some(notification) = reminder_for(reservation) else {
                continue;
            };
            match self.notifier.send(notification).await {
                Ok(()) => sent += 1,
                Err(e) => tracing::warn!(
                    reservation_id = %reservation.reservation_id,
                    error.message = %e,
                    "failed to send reservation reminder"
                ),
            }
        }
        tracing::info!(%tomorrow, candidates = targets.len(), sent, "reminder batch finished");
        Ok(sent)
    }

    pub async fn trigger(&self, identity: &User) -> AppResult<usize> {
        identity.ensure_administrative("trigger reservation reminders")?;
        self.run().await
    }

    /// 1 件だけ手動でリマインドを送る。送信失敗はそのまま返す
    pub async fn send_reminder(
        &self,
        identity: &User,
        reservation_id: ReservationId,
    ) -> AppResult<bool> {
        identity.ensure_administrative("send reservation reminders")?;
        let reservation = self
            .reservations
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("reservation ({reservation_id}) was not found"))
            })?;
        let Some(notification) = reminder_for(&reservation) else {
            return Ok(false);
        };
        self.notifier.send(notification).await?;
        tracing::info!(%reservation_id, sent_by = %identity.user_name, "reservation reminder sent");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        admission::AdmissionEngine,
        clock::FixedClock,
        model::{
            id::{SlotId, SpaceId},
            reservation::{Decision, ReservationCandidate},
            role::Role,
        },
        testing::{
            date, reservation, slot, space, time, user, InMemoryReservations, RecordingNotifier,
        },
    };
    use chrono::NaiveDate;

    #[test]
    fn reminder_message_names_space_date_and_slot() {
        let alice = user("alice", Role::User);
        let r = reservation(
            &alice,
            &space("Room 101"),
            &slot(time(8, 0), time(10, 0)),
            date(2025, 6, 10),
            ReservationStatus::Confirmed,
        );
        let n = reminder_for(&r).unwrap();
        assert_eq!(n.recipient_email, "alice@example.com");
        assert_eq!(n.subject, "Reservation reminder");
        assert_eq!(
            n.body,
            "Remember your reservation for Room 101 on 2025-06-10 in slot 08:00 - 10:00."
        );
    }

    #[test]
    fn no_reminder_without_an_email() {
        let mut alice = user("alice", Role::User);
        alice.email = Some("   ".into());
        let r = reservation(
            &alice,
            &space("Room 101"),
            &slot(time(8, 0), time(10, 0)),
            date(2025, 6, 10),
            ReservationStatus::Confirmed,
        );
        assert!(reminder_for(&r).is_none());
        alice.email = None;
        assert!(reminder_for(&reservation(
            &alice,
            &space("Room 101"),
            &slot(time(8, 0), time(10, 0)),
            date(2025, 6, 10),
            ReservationStatus::Confirmed,
        ))
        .is_none());
    }

    struct Fixture {
        alice: User,
        carol: User,
        admin: User,
        store: Arc<InMemoryReservations>,
        engine: AdmissionEngine,
    }

    async fn book(
        engine: &AdmissionEngine,
        who: &User,
        space_id: SpaceId,
        slot_id: SlotId,
        day: NaiveDate,
    ) -> Reservation {
        engine
            .request_reservation(
                who,
                ReservationCandidate {
                    space_id,
                    slot_id,
                    reservation_date: day,
                    purpose: None,
                },
            )
            .await
            .unwrap()
    }

    // 予約は 2025-06-08 時点で作成する。6/10 の 2 件は確定と却下、6/11 の 2 件は保留
    async fn fixture() -> Fixture {
        let alice = user("alice", Role::User);
        let bob = user("bob", Role::User);
        let mut carol = user("carol", Role::User);
        carol.email = None;
        let admin = user("root", Role::Admin);
        let room = space("Room 101");
        let lab = space("Lab A");
        let morning = slot(time(8, 0), time(10, 0));
        let store = InMemoryReservations::with_catalog(
            &[&alice, &bob, &carol, &admin],
            &[&room, &lab],
            &[&morning],
        );
        let engine = AdmissionEngine::new(
            store.clone(),
            RecordingNotifier::new(),
            Arc::new(FixedClock::new(date(2025, 6, 8))),
        );

        let confirmed = book(&engine, &alice, room.space_id, morning.slot_id, date(2025, 6, 10)).await;
        let rejected = book(&engine, &bob, lab.space_id, morning.slot_id, date(2025, 6, 10)).await;
        book(&engine, &bob, room.space_id, morning.slot_id, date(2025, 6, 11)).await;
        book(&engine, &carol, lab.space_id, morning.slot_id, date(2025, 6, 11)).await;

        engine
            .decide(&admin, confirmed.reservation_id, Decision::Confirm)
            .await
            .unwrap();
        engine
            .decide(&admin, rejected.reservation_id, Decision::Reject)
            .await
            .unwrap();

        Fixture {
            alice,
            carol,
            admin,
            store,
            engine,
        }
    }

    fn batch_on(
        store: &Arc<InMemoryReservations>,
        notifier: Arc<RecordingNotifier>,
        today: NaiveDate,
    ) -> ReminderBatch {
        ReminderBatch::new(store.clone(), notifier, Arc::new(FixedClock::new(today)))
    }

    #[tokio::test]
    async fn reminds_only_tomorrows_confirmed_reservations() {
        let f = fixture().await;
        let notifier = RecordingNotifier::new();
        let batch = batch_on(&f.store, notifier.clone(), date(2025, 6, 9));

        assert_eq!(batch.run().await.unwrap(), 1);
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient_email, "alice@example.com");

        // 6/11 分は未確定のみ
        let later = batch_on(&f.store, RecordingNotifier::new(), date(2025, 6, 10));
        assert_eq!(later.run().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_sends_are_not_counted_and_do_not_abort() {
        let f = fixture().await;
        let batch = batch_on(
            &f.store,
            RecordingNotifier::failing_for("alice@example.com"),
            date(2025, 6, 9),
        );
        assert_eq!(batch.run().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn requesters_without_email_are_skipped() {
        let f = fixture().await;
        let carols = f
            .engine
            .list_reservations(&f.carol, ReservationFilter::default())
            .await
            .unwrap();
        for r in &carols {
            f.engine
                .decide(&f.admin, r.reservation_id, Decision::Confirm)
                .await
                .unwrap();
        }
        let notifier = RecordingNotifier::new();
        let batch = batch_on(&f.store, notifier.clone(), date(2025, 6, 10));
        assert_eq!(batch.run().await.unwrap(), 0);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn only_administrators_trigger_reminders() {
        let f = fixture().await;
        let batch = batch_on(&f.store, RecordingNotifier::new(), date(2025, 6, 9));
        assert!(matches!(
            batch.trigger(&f.alice).await,
            Err(AppError::ForbiddenOperation(_))
        ));
        assert_eq!(batch.trigger(&f.admin).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn manual_reminder_reports_whether_mail_went_out() {
        let f = fixture().await;
        let notifier = RecordingNotifier::new();
        let batch = batch_on(&f.store, notifier.clone(), date(2025, 6, 1));

        let alices = f
            .engine
            .list_reservations(&f.alice, ReservationFilter::default())
            .await
            .unwrap();
        let carols = f
            .engine
            .list_reservations(&f.carol, ReservationFilter::default())
            .await
            .unwrap();

        assert!(batch
            .send_reminder(&f.admin, alices[0].reservation_id)
            .await
            .unwrap());
        assert!(!batch
            .send_reminder(&f.admin, carols[0].reservation_id)
            .await
            .unwrap());
        assert_eq!(notifier.sent().len(), 1);

        assert!(matches!(
            batch.send_reminder(&f.alice, alices[0].reservation_id).await,
            Err(AppError::ForbiddenOperation(_))
        ));
        assert!(matches!(
            batch.send_reminder(&f.admin, ReservationId::new()).await,
            Err(AppError::EntityNotFound(_))
        ));
    }

    #[tokio::test]
    async fn manual_reminder_surfaces_send_failures() {
        let f = fixture().await;
        let batch = batch_on(
            &f.store,
            RecordingNotifier::failing_for("alice@example.com"),
            date(2025, 6, 1),
        );
        let alices = f
            .engine
            .list_reservations(&f.alice, ReservationFilter::default())
            .await
            .unwrap();
        assert!(matches!(
            batch.send_reminder(&f.admin, alices[0].reservation_id).await,
            Err(AppError::ExternalServiceError(_))
        ));
    }
}
