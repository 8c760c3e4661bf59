//! Daily stats aggregation
//!
//! Derived read-model over the order store for the dashboard. Reads are
//! snapshot-consistent within one call and may trail concurrent writes.

use std::collections::HashMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::AppResult;

use crate::db::Storage;
use crate::orders::money::format_money;
use crate::utils::time::{day_end_millis, day_start_millis};

/// Fixed estimate shown on the dashboard; not derived from measured
/// PENDING -> READY durations.
pub const AVG_PREP_TIME_MINUTES: u32 = 12;

/// One menu item's summed quantity across the day
#[derive(Debug, Clone, Serialize)]
pub struct PopularItem {
    pub name: String,
    pub count: i64,
}

/// Aggregate for one tenant and one business day
#[derive(Debug, Clone, Serialize)]
pub struct DailyStats {
    pub order_count: u64,
    /// Money string with two fraction digits, "0.00" on an empty day
    pub revenue: String,
    pub avg_prep_time_minutes: u32,
    pub popular_items: Vec<PopularItem>,
}

#[derive(Clone)]
pub struct StatsService {
    storage: Storage,
    timezone: Tz,
}

impl StatsService {
    pub fn new(storage: Storage, timezone: Tz) -> Self {
        Self { storage, timezone }
    }

    /// Aggregate one business day of a tenant's orders.
    ///
    /// Window is `[day 00:00, day+1 00:00)` in the business timezone.
    /// An unparsable stored total is skipped with a warn log; the order
    /// still counts toward `order_count`.
    pub fn daily_stats(
        &self,
        tenant_id: &str,
        day: NaiveDate,
        top_n: usize,
    ) -> AppResult<DailyStats> {
        let start = day_start_millis(day, self.timezone);
        let end = day_end_millis(day, self.timezone);
        let orders = self.storage.orders_created_between(tenant_id, start, end)?;

        let mut revenue = Decimal::ZERO;
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut tallies: Vec<PopularItem> = Vec::new();

        for order in &orders {
            match order.total.parse::<Decimal>() {
                Ok(total) => revenue += total,
                Err(_) => {
                    tracing::warn!(
                        order_id = %order.id,
                        total = %order.total,
                        "Skipping unparsable order total"
                    );
                }
            }

            for item in &order.items {
                if let Some(&at) = index.get(&item.name) {
                    tallies[at].count += i64::from(item.quantity);
                } else {
                    index.insert(item.name.clone(), tallies.len());
                    tallies.push(PopularItem {
                        name: item.name.clone(),
                        count: i64::from(item.quantity),
                    });
                }
            }
        }

        // Stable sort: equal counts keep first-seen order.
        tallies.sort_by(|a, b| b.count.cmp(&a.count));
        tallies.truncate(top_n);

        Ok(DailyStats {
            order_count: orders.len() as u64,
            revenue: format_money(revenue),
            avg_prep_time_minutes: AVG_PREP_TIME_MINUTES,
            popular_items: tallies,
        })
    }
}
