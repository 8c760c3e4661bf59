//! Subscription gate
//!
//! Effective tenant access is derived from `is_active`, `plan_type` and
//! `subscription_end` at check time, never stored. Admin actions mutate
//! those fields and broadcast the updated tenant snapshot.

use shared::models::{PlanType, Restaurant, SubscriptionAction};
use shared::util::now_millis;
use shared::{AppError, AppResult, BroadcastEvent, ErrorCode};

use crate::db::Storage;
use crate::live::BroadcastHub;

const DAY_MS: i64 = 86_400_000;
const YEAR_MS: i64 = 365 * DAY_MS;
const TRIAL_EXTENSION_MS: i64 = 30 * DAY_MS;

/// Effective access status of a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    /// Access denied: suspended, or the paid/trial window has passed
    Expired,
    /// Active trial with whole days remaining (ceiling, capped at 30)
    Trial { days_left: i64 },
    /// Paid access, or a trial with no end date set yet
    Active,
}

fn status_at(restaurant: &Restaurant, now_ms: i64) -> SubscriptionStatus {
    if !restaurant.is_active {
        return SubscriptionStatus::Expired;
    }
    if let Some(end) = restaurant.subscription_end {
        if now_ms > end {
            return SubscriptionStatus::Expired;
        }
        if restaurant.plan_type == PlanType::Trial {
            let days_left = ((end - now_ms) as u64).div_ceil(DAY_MS as u64) as i64;
            return SubscriptionStatus::Trial {
                days_left: days_left.clamp(0, 30),
            };
        }
    }
    SubscriptionStatus::Active
}

/// Calendar month arithmetic: end-of-month dates clamp
/// (Jan 31 + 1 month = Feb 29), they do not spill into March.
fn one_month_after(now_ms: i64) -> i64 {
    chrono::DateTime::from_timestamp_millis(now_ms)
        .and_then(|dt| dt.checked_add_months(chrono::Months::new(1)))
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(now_ms + 30 * DAY_MS)
}

/// Computes effective access and applies admin actions
#[derive(Clone)]
pub struct SubscriptionService {
    storage: Storage,
    hub: BroadcastHub,
}

impl SubscriptionService {
    pub fn new(storage: Storage, hub: BroadcastHub) -> Self {
        Self { storage, hub }
    }

    /// Effective status of a tenant right now
    pub fn status_of(&self, restaurant: &Restaurant) -> SubscriptionStatus {
        status_at(restaurant, now_millis())
    }

    /// Load the tenant and deny expired access.
    ///
    /// Consumed before order placement and menu mutation; renders as 403
    /// at the HTTP edge.
    pub fn ensure_access(&self, tenant_id: &str) -> AppResult<Restaurant> {
        let restaurant = self
            .storage
            .get_restaurant(tenant_id)?
            .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound).with_detail("id", tenant_id))?;

        if self.status_of(&restaurant) == SubscriptionStatus::Expired {
            return Err(AppError::forbidden_tenant(tenant_id));
        }
        Ok(restaurant)
    }

    /// Apply an admin action, persist, and broadcast the updated tenant.
    ///
    /// Actions are idempotent: re-applying moves the window forward from
    /// the new `now` but never corrupts state.
    pub fn apply(&self, tenant_id: &str, action: SubscriptionAction) -> AppResult<Restaurant> {
        let now = now_millis();
        let updated = self.storage.update_restaurant(tenant_id, |r| {
            match action {
                SubscriptionAction::Activate => {
                    r.is_active = true;
                    r.subscription_end = Some(now + YEAR_MS);
                }
                SubscriptionAction::Suspend => {
                    r.is_active = false;
                }
                SubscriptionAction::ExtendTrial => {
                    r.subscription_end = Some(now + TRIAL_EXTENSION_MS);
                }
                SubscriptionAction::ExpireTrial => {
                    r.is_active = false;
                    r.plan_type = PlanType::Expired;
                    r.subscription_end = Some(now - 1_000);
                }
            }
            r.updated_at = now;
        })?;

        tracing::info!(
            tenant_id = %tenant_id,
            action = ?action,
            "Applied subscription action"
        );
        self.hub
            .publish(&BroadcastEvent::SubscriptionUpdate(updated.clone()));
        Ok(updated)
    }

    /// Switch the tenant's plan and grant one calendar month of access.
    ///
    /// The plan value is taken as sent; no plan validation happens
    /// here.
    pub fn upgrade(&self, tenant_id: &str, plan: PlanType) -> AppResult<Restaurant> {
        let now = now_millis();
        let end = one_month_after(now);
        let updated = self.storage.update_restaurant(tenant_id, |r| {
            r.plan_type = plan;
            r.subscription_end = Some(end);
            r.is_active = true;
            r.updated_at = now;
        })?;

        tracing::info!(
            tenant_id = %tenant_id,
            plan = plan.as_str(),
            "Upgraded subscription plan"
        );
        self.hub
            .publish(&BroadcastEvent::SubscriptionUpdate(updated.clone()));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sample_restaurant;

    const NOW: i64 = 1_714_988_112_345;

    fn service() -> (SubscriptionService, Storage, BroadcastHub) {
        let storage = Storage::open_in_memory().unwrap();
        let hub = BroadcastHub::new();
        let service = SubscriptionService::new(storage.clone(), hub.clone());
        (service, storage, hub)
    }

    #[test]
    fn inactive_tenant_is_expired_regardless_of_dates() {
        let mut restaurant = sample_restaurant("r1", "tandoor-palace");
        restaurant.is_active = false;
        restaurant.subscription_end = Some(NOW + 10 * DAY_MS);

        assert_eq!(status_at(&restaurant, NOW), SubscriptionStatus::Expired);
    }

    #[test]
    fn past_end_date_is_expired_even_while_active() {
        let mut restaurant = sample_restaurant("r1", "tandoor-palace");
        restaurant.subscription_end = Some(NOW - 1_000);

        assert_eq!(status_at(&restaurant, NOW), SubscriptionStatus::Expired);
    }

    #[test]
    fn trial_reports_whole_days_left() {
        let mut restaurant = sample_restaurant("r1", "tandoor-palace");
        restaurant.subscription_end = Some(NOW + 5 * DAY_MS);
        assert_eq!(
            status_at(&restaurant, NOW),
            SubscriptionStatus::Trial { days_left: 5 }
        );

        // Partial days round up.
        restaurant.subscription_end = Some(NOW + 4 * DAY_MS + 1);
        assert_eq!(
            status_at(&restaurant, NOW),
            SubscriptionStatus::Trial { days_left: 5 }
        );

        // Expiring this instant is still a trial, with zero days.
        restaurant.subscription_end = Some(NOW);
        assert_eq!(
            status_at(&restaurant, NOW),
            SubscriptionStatus::Trial { days_left: 0 }
        );

        // A far-future end date caps the counter.
        restaurant.subscription_end = Some(NOW + 90 * DAY_MS);
        assert_eq!(
            status_at(&restaurant, NOW),
            SubscriptionStatus::Trial { days_left: 30 }
        );
    }

    #[test]
    fn open_ended_trial_and_paid_plan_are_active() {
        // Onboarding leaves subscription_end unset.
        let restaurant = sample_restaurant("r1", "tandoor-palace");
        assert_eq!(status_at(&restaurant, NOW), SubscriptionStatus::Active);

        let mut premium = sample_restaurant("r2", "spice-route");
        premium.plan_type = PlanType::Premium;
        premium.subscription_end = Some(NOW + 200 * DAY_MS);
        assert_eq!(status_at(&premium, NOW), SubscriptionStatus::Active);
    }

    #[test]
    fn one_month_clamps_at_month_end() {
        // 2024-01-31T00:00Z + 1 month = 2024-02-29T00:00Z (leap year)
        assert_eq!(one_month_after(1_706_659_200_000), 1_709_164_800_000);
        // 2024-05-06T00:00Z + 1 month = 2024-06-06T00:00Z
        assert_eq!(one_month_after(1_714_953_600_000), 1_717_632_000_000);
    }

    #[test]
    fn activate_grants_a_year_from_any_state() {
        let (service, storage, _hub) = service();
        let mut restaurant = sample_restaurant("r1", "tandoor-palace");
        restaurant.is_active = false;
        restaurant.plan_type = PlanType::Expired;
        restaurant.subscription_end = Some(1_000);
        storage.insert_restaurant(&restaurant).unwrap();

        let before = now_millis();
        let updated = service.apply("r1", SubscriptionAction::Activate).unwrap();
        let after = now_millis();

        assert!(updated.is_active);
        let end = updated.subscription_end.unwrap();
        assert!(end >= before + YEAR_MS && end <= after + YEAR_MS);
        assert_eq!(service.status_of(&updated), SubscriptionStatus::Active);
    }

    #[test]
    fn suspend_keeps_the_paid_until_date() {
        let (service, storage, _hub) = service();
        let mut restaurant = sample_restaurant("r1", "tandoor-palace");
        restaurant.subscription_end = Some(NOW + 10 * DAY_MS);
        storage.insert_restaurant(&restaurant).unwrap();

        let updated = service.apply("r1", SubscriptionAction::Suspend).unwrap();

        assert!(!updated.is_active);
        assert_eq!(updated.subscription_end, Some(NOW + 10 * DAY_MS));
    }

    #[test]
    fn extend_trial_moves_the_window_thirty_days_out() {
        let (service, storage, _hub) = service();
        storage
            .insert_restaurant(&sample_restaurant("r1", "tandoor-palace"))
            .unwrap();

        let before = now_millis();
        let updated = service.apply("r1", SubscriptionAction::ExtendTrial).unwrap();
        let after = now_millis();

        let end = updated.subscription_end.unwrap();
        assert!(end >= before + TRIAL_EXTENSION_MS && end <= after + TRIAL_EXTENSION_MS);
        assert!(matches!(
            service.status_of(&updated),
            SubscriptionStatus::Trial { days_left: 30 }
        ));
    }

    #[test]
    fn expire_trial_cuts_access_immediately() {
        let (service, storage, _hub) = service();
        storage
            .insert_restaurant(&sample_restaurant("r1", "tandoor-palace"))
            .unwrap();

        let updated = service.apply("r1", SubscriptionAction::ExpireTrial).unwrap();

        assert!(!updated.is_active);
        assert_eq!(updated.plan_type, PlanType::Expired);
        assert!(updated.subscription_end.unwrap() < now_millis());
        assert_eq!(service.status_of(&updated), SubscriptionStatus::Expired);
    }

    #[test]
    fn upgrade_sets_plan_and_reactivates() {
        let (service, storage, _hub) = service();
        let mut restaurant = sample_restaurant("r1", "tandoor-palace");
        restaurant.is_active = false;
        storage.insert_restaurant(&restaurant).unwrap();

        let before = now_millis();
        let updated = service.upgrade("r1", PlanType::Premium).unwrap();

        assert!(updated.is_active);
        assert_eq!(updated.plan_type, PlanType::Premium);
        // One calendar month is at least 28 days out.
        assert!(updated.subscription_end.unwrap() >= before + 28 * DAY_MS);
    }

    #[test]
    fn ensure_access_gates_by_derived_status() {
        let (service, storage, _hub) = service();
        storage
            .insert_restaurant(&sample_restaurant("r1", "tandoor-palace"))
            .unwrap();

        assert!(service.ensure_access("r1").is_ok());

        let err = service.ensure_access("ghost").unwrap_err();
        assert_eq!(err.code, ErrorCode::TenantNotFound);

        service.apply("r1", SubscriptionAction::ExpireTrial).unwrap();
        let err = service.ensure_access("r1").unwrap_err();
        assert_eq!(err.code, ErrorCode::SubscriptionExpired);

        service.apply("r1", SubscriptionAction::Activate).unwrap();
        assert!(service.ensure_access("r1").is_ok());
    }

    #[tokio::test]
    async fn actions_broadcast_the_updated_tenant() {
        let (service, storage, hub) = service();
        storage
            .insert_restaurant(&sample_restaurant("r1", "tandoor-palace"))
            .unwrap();

        let (_id, mut rx) = hub.register();
        service.apply("r1", SubscriptionAction::Suspend).unwrap();

        let frame = rx.recv().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["type"], "SUBSCRIPTION_UPDATE");
        assert_eq!(value["data"]["id"], "r1");
        assert_eq!(value["data"]["is_active"], false);
    }
}
