//! Diesel models representing catalog packages and services.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::catalog::{
    Package as DomainPackage, PackageData, Service as DomainService, ServiceData,
};
use crate::domain::money::Money;
use crate::domain::types::{CatalogName, CurrencyCode, PackageId, ServiceId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::services)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::services)]
#[diesel(treat_none_as_null = true)]
/// Columns written on both insert and update of a [`Service`].
pub struct ServiceChangeset<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i64,
    pub currency: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::packages)]
pub struct Package {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub billing_period: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::packages)]
#[diesel(treat_none_as_null = true)]
/// Columns written on both insert and update of a [`Package`].
pub struct PackageChangeset<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i64,
    pub currency: &'a str,
    pub billing_period: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::package_services)]
/// Association table linking packages to services.
pub struct PackageService {
    pub package_id: i32,
    pub service_id: i32,
}

impl TryFrom<Service> for DomainService {
    type Error = TypeConstraintError;

    fn try_from(service: Service) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ServiceId::new(service.id)?,
            name: CatalogName::new(service.name)?,
            description: service.description,
            price: Money::new(service.price_cents, CurrencyCode::new(service.currency)?),
            is_active: service.is_active,
            created_at: service.created_at,
            updated_at: service.updated_at,
        })
    }
}

impl TryFrom<Package> for DomainPackage {
    type Error = TypeConstraintError;

    fn try_from(package: Package) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PackageId::new(package.id)?,
            name: CatalogName::new(package.name)?,
            description: package.description,
            price: Money::new(package.price_cents, CurrencyCode::new(package.currency)?),
            billing_period: package.billing_period.parse()?,
            is_active: package.is_active,
            created_at: package.created_at,
            updated_at: package.updated_at,
        })
    }
}

impl<'a> From<&'a ServiceData> for ServiceChangeset<'a> {
    fn from(data: &'a ServiceData) -> Self {
        Self {
            name: data.name.as_str(),
            description: data.description.as_deref(),
            price_cents: data.price_cents,
            currency: data.currency.as_str(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl<'a> From<&'a PackageData> for PackageChangeset<'a> {
    fn from(data: &'a PackageData) -> Self {
        Self {
            name: data.name.as_str(),
            description: data.description.as_deref(),
            price_cents: data.price_cents,
            currency: data.currency.as_str(),
            billing_period: data.billing_period.as_str(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
