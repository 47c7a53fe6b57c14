//! Order lifecycle projector.
//!
//! Pure derivations over order records and wall-clock time: elapsed age,
//! the green-yellow-red urgency ramp, the active/completed partition, and
//! the windowed visible set (every active order plus the 10 most recent
//! completed ones). Every view goes through this one module instead of
//! carrying its own copy of the arithmetic.
//!
//! Stateless and I/O-free: callers supply the order list, the menu index,
//! and `now`, and re-invoke on their own polling cadence.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::entities::menu_items;
use crate::models::order::{OrderLineItem, OrderSummary};

/// Minutes after which the urgency ramp saturates at pure red.
pub const URGENCY_HORIZON_MINUTES: i64 = 30;

/// How many completed orders the visible set retains, newest first.
pub const COMPLETED_HISTORY_LIMIT: usize = 10;

/// Elapsed age of an order, truncated to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAge {
    pub total_minutes: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl OrderAge {
    /// Age of an order placed at `order_time`, as seen at `now`. Negative
    /// elapsed time (clock skew between store and caller) clamps to zero.
    pub fn of(order_time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total_minutes = (now - order_time).num_minutes().max(0);
        Self {
            total_minutes,
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
        }
    }

    /// Human display form: "2h 5m", or "7m" under an hour.
    pub fn display(&self) -> String {
        if self.hours > 0 {
            format!("{}h {}m", self.hours, self.minutes)
        } else {
            format!("{}m", self.minutes)
        }
    }
}

/// An sRGB color, displayed and serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Advisory wait-time color for an order: green at 0 minutes, yellow at
/// half the horizon (15 minutes), red at the horizon and beyond.
///
/// Has no effect on ordering or partitioning.
pub fn urgency_color(order_time: DateTime<Utc>, now: DateTime<Utc>) -> Rgb {
    let age = OrderAge::of(order_time, now);
    let t = (age.total_minutes as f64 / URGENCY_HORIZON_MINUTES as f64).min(1.0);
    if t <= 0.5 {
        // Green to yellow: red channel rises while green holds at 255
        Rgb {
            r: (255.0 * t * 2.0).round() as u8,
            g: 255,
            b: 0,
        }
    } else {
        // Yellow to red: green channel falls while red holds at 255
        Rgb {
            r: 255,
            g: (255.0 * (1.0 - (t - 0.5) * 2.0)).round() as u8,
            b: 0,
        }
    }
}

/// Split orders into (active, completed) by the active flag. Total and
/// disjoint: every input order lands in exactly one side, input order
/// preserved within each.
pub fn partition(orders: &[OrderSummary]) -> (Vec<OrderSummary>, Vec<OrderSummary>) {
    orders.iter().cloned().partition(|o| o.is_active)
}

/// The windowed view staff browse: all active orders newest-first, followed
/// by the [`COMPLETED_HISTORY_LIMIT`] most recent completed orders
/// newest-first. A recency cap to bound the queue display, not pagination;
/// older completed orders are simply not served.
pub fn visible_set(orders: &[OrderSummary]) -> Vec<OrderSummary> {
    let (mut active, mut completed) = partition(orders);
    active.sort_by(|a, b| b.order_time.cmp(&a.order_time));
    completed.sort_by(|a, b| b.order_time.cmp(&a.order_time));
    completed.truncate(COMPLETED_HISTORY_LIMIT);
    active.extend(completed);
    active
}

/// Menu-item name to price lookup, built fresh per valuation pass.
#[derive(Debug, Default)]
pub struct MenuIndex {
    prices: HashMap<String, Decimal>,
}

impl MenuIndex {
    pub fn from_menu(items: &[menu_items::Model]) -> Self {
        Self {
            prices: items
                .iter()
                .map(|m| (m.name.clone(), m.price))
                .collect(),
        }
    }

    pub fn price(&self, name: &str) -> Option<Decimal> {
        self.prices.get(name).copied()
    }
}

/// Value of an order against the current menu, rounded to 2 decimal places.
///
/// Line items whose menu item no longer exists contribute zero instead of
/// failing, so historical orders keep rendering a (partial) value after
/// menu edits.
pub fn order_value(items: &[OrderLineItem], menu: &MenuIndex) -> Decimal {
    items
        .iter()
        .map(|item| {
            menu.price(&item.menu_item).unwrap_or(Decimal::ZERO) * Decimal::from(item.quantity)
        })
        .sum::<Decimal>()
        .round_dp(2)
}
