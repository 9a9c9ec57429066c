//! Daily request quota
//!
//! Counts successful API requests per calendar day and answers whether
//! another one may be made. Reads never fail: a missing or corrupt counter
//! is zero. Recording is best-effort and only logs on failure.
//!
//! There is no atomic check-and-increment. Two overlapping increments both
//! read the same count and the second write wins, so usage can be
//! under-counted under concurrent callers.

use crate::config::{
    DAILY_LIMIT, DATE_FORMAT, LAST_RESET_DATE_KEY, NEAR_LIMIT_PERCENT, REQUEST_COUNT_KEY,
};
use crate::error::Result;
use crate::storage::KeyValueStore;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::sync::Arc;

/// Source of the current calendar day
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the machine
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// How close today's usage is to the limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageLevel {
    Normal,
    NearLimit,
    AtLimit,
}

/// Snapshot of today's usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaStatus {
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
    /// Capped at 100
    pub percent_used: u32,
    pub level: UsageLevel,
}

impl QuotaStatus {
    pub fn new(used: u32, limit: u32) -> Self {
        let percent_used = if limit == 0 {
            100
        } else {
            (u64::from(used) * 100 / u64::from(limit)).min(100) as u32
        };

        let level = if percent_used >= 100 {
            UsageLevel::AtLimit
        } else if percent_used >= NEAR_LIMIT_PERCENT {
            UsageLevel::NearLimit
        } else {
            UsageLevel::Normal
        };

        Self {
            used,
            limit,
            remaining: limit.saturating_sub(used),
            percent_used,
            level,
        }
    }
}

/// Per-day request counter over the key-value store
#[derive(Clone)]
pub struct QuotaTracker {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    limit: u32,
}

impl QuotaTracker {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            limit: DAILY_LIMIT,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Requests recorded today, after handling a day change
    pub async fn get_today_count(&self) -> u32 {
        self.reconcile_day_rollover().await;

        match self.store.get(REQUEST_COUNT_KEY).await {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Stored request count {:?} is not a number, treating as 0", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                tracing::error!("Error getting request count: {}", e);
                0
            }
        }
    }

    pub async fn can_make_request(&self) -> bool {
        self.get_today_count().await < self.limit
    }

    /// Record one request. Failures are logged, never returned.
    pub async fn increment_count(&self) {
        let next = self.get_today_count().await.saturating_add(1);

        if let Err(e) = self.store.set(REQUEST_COUNT_KEY, &next.to_string()).await {
            tracing::error!("Error incrementing request count: {}", e);
            return;
        }

        tracing::debug!("Request count is now {}/{}", next, self.limit);
    }

    /// Zero the counter and stamp today's date, logging any failure
    pub async fn reset_count(&self) {
        if let Err(e) = self.try_reset_count().await {
            tracing::error!("Error resetting request count: {}", e);
        }
    }

    /// Zero the counter and stamp today's date, returning any failure
    pub async fn try_reset_count(&self) -> Result<()> {
        let today = self.clock.today();

        // Counter first, so a failed date write still triggers a reset next read
        self.store.set(REQUEST_COUNT_KEY, "0").await?;
        self.store
            .set(LAST_RESET_DATE_KEY, &today.format(DATE_FORMAT).to_string())
            .await?;

        tracing::info!("Request count reset for {}", today);
        Ok(())
    }

    /// Reset when the stored reset date is missing, unreadable, or not today
    pub async fn reconcile_day_rollover(&self) {
        let stored = match self.store.get(LAST_RESET_DATE_KEY).await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Error checking reset date: {}", e);
                return;
            }
        };

        // Unparsable dates compare unequal to today
        let today = self.clock.today();
        let last_reset = stored
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok());

        if last_reset != Some(today) {
            tracing::debug!("Day rollover: last reset {:?}, today {}", stored, today);
            self.reset_count().await;
        }
    }

    pub async fn status(&self) -> QuotaStatus {
        QuotaStatus::new(self.get_today_count().await, self.limit)
    }
}
