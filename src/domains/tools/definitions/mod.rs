//! Tool definitions module.
//!
//! One file per Housecall Pro business domain. Each exposes a
//! `register(&HousecallClient) -> ToolSet` function; [`DOMAINS`] lists them in
//! the order the registry merges them.

pub mod common;
pub mod customers;
pub mod dispatch;
pub mod employees;
pub mod estimates;
pub mod invoices;
pub mod jobs;
pub mod leads;
pub mod notifications;
pub mod payments;
pub mod pricebook;
pub mod reporting;
pub mod reviews;
pub mod scheduling;
pub mod settings;
pub mod tags;
pub mod time_tracking;
pub mod webhooks;

use super::handlers::ToolSet;
use crate::api::HousecallClient;

/// Signature shared by every domain registration function.
pub type RegisterFn = fn(&HousecallClient) -> ToolSet;

/// All domains, in registration order.
pub const DOMAINS: &[(&str, RegisterFn)] = &[
    ("jobs", jobs::register),
    ("customers", customers::register),
    ("estimates", estimates::register),
    ("invoices", invoices::register),
    ("employees", employees::register),
    ("dispatch", dispatch::register),
    ("tags", tags::register),
    ("notifications", notifications::register),
    ("reviews", reviews::register),
    ("reporting", reporting::register),
    ("payments", payments::register),
    ("scheduling", scheduling::register),
    ("pricebook", pricebook::register),
    ("leads", leads::register),
    ("webhooks", webhooks::register),
    ("time_tracking", time_tracking::register),
    ("settings", settings::register),
];
