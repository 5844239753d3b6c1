//! Catalog of packages and services offered to clients.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::money::Money;
use crate::domain::status::BillingPeriod;
use crate::domain::types::{CatalogName, CurrencyCode, PackageId, ServiceId};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Service {
    pub id: ServiceId,
    pub name: CatalogName,
    pub description: Option<String>,
    pub price: Money,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert and update payload of a service.
#[derive(Clone, Debug)]
pub struct ServiceData {
    pub name: CatalogName,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: CurrencyCode,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Package {
    pub id: PackageId,
    pub name: CatalogName,
    pub description: Option<String>,
    pub price: Money,
    pub billing_period: BillingPeriod,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert and update payload of a package with its bundled services.
#[derive(Clone, Debug)]
pub struct PackageData {
    pub name: CatalogName,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: CurrencyCode,
    pub billing_period: BillingPeriod,
    pub service_ids: Vec<ServiceId>,
}

/// Package with the services it bundles.
#[derive(Clone, Debug, Serialize)]
pub struct PackageWithServices {
    pub package: Package,
    pub services: Vec<Service>,
}
