//! Catalog of packages and services.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::catalog::{Package, PackageData, Service, ServiceData};
use crate::domain::status::{BillingPeriod, status_options};
use crate::domain::types::{PackageId, ServiceId};
use crate::dto::ListQuery;
use crate::dto::catalog::{PackagePageData, PackagesPageData, ServicePageData, ServicesPageData};
use crate::forms::catalog::{PackageForm, ServiceForm};
use crate::repository::{CatalogReader, CatalogWriter, UserReader};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

fn package_id(id: i32) -> ServiceResult<PackageId> {
    PackageId::new(id).map_err(|_| ServiceError::NotFound)
}

fn service_id(id: i32) -> ServiceResult<ServiceId> {
    ServiceId::new(id).map_err(|_| ServiceError::NotFound)
}

/// Rejects packages bundling services that do not exist.
fn check_services<R>(repo: &R, data: &PackageData) -> ServiceResult<()>
where
    R: CatalogReader + ?Sized,
{
    for id in &data.service_ids {
        if repo.get_service_by_id(*id)?.is_none() {
            return Err(ServiceError::Form(format!("Service {id} does not exist")));
        }
    }
    Ok(())
}

pub fn load_packages<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<PackagesPageData>
where
    R: UserReader + CatalogReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let active = query.active_filter();
    let packages = repo.list_packages(active).map_err(|err| {
        log::error!("Failed to list packages: {err}");
        err
    })?;

    Ok(PackagesPageData {
        packages,
        services: repo.list_services(Some(true))?,
        billing_options: status_options(BillingPeriod::ALL),
        active,
    })
}

pub fn load_package<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<PackagePageData>
where
    R: UserReader + CatalogReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let package = repo
        .get_package_by_id(package_id(id)?)?
        .ok_or(ServiceError::NotFound)?;
    let selected_service_ids = package.services.iter().map(|s| s.id).collect();

    Ok(PackagePageData {
        package,
        services: repo.list_services(None)?,
        selected_service_ids,
        billing_options: status_options(BillingPeriod::ALL),
    })
}

pub fn add_package<R>(repo: &R, user: &AuthenticatedUser, form: PackageForm) -> ServiceResult<Package>
where
    R: UserReader + CatalogReader + CatalogWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let data = PackageData::try_from(form)?;
    check_services(repo, &data)?;

    let package = repo.create_package(&data).map_err(|err| {
        log::error!("Failed to create package: {err}");
        err
    })?;
    log::info!("Package {} created with {} services", package.id, data.service_ids.len());
    Ok(package)
}

pub fn save_package<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: PackageForm,
) -> ServiceResult<Package>
where
    R: UserReader + CatalogReader + CatalogWriter + ?Sized,
{
    ensure_admin(repo, user)?;
    let id = package_id(id)?;

    let data = PackageData::try_from(form)?;
    check_services(repo, &data)?;

    Ok(repo.update_package(id, &data)?)
}

pub fn set_package_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    active: bool,
) -> ServiceResult<Package>
where
    R: UserReader + CatalogWriter + ?Sized,
{
    ensure_admin(repo, user)?;
    Ok(repo.set_package_active(package_id(id)?, active)?)
}

pub fn load_services<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ListQuery,
) -> ServiceResult<ServicesPageData>
where
    R: UserReader + CatalogReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let active = query.active_filter();
    let services = repo.list_services(active).map_err(|err| {
        log::error!("Failed to list services: {err}");
        err
    })?;

    Ok(ServicesPageData { services, active })
}

pub fn load_service<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<ServicePageData>
where
    R: UserReader + CatalogReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let service = repo
        .get_service_by_id(service_id(id)?)?
        .ok_or(ServiceError::NotFound)?;
    Ok(ServicePageData { service })
}

pub fn add_service<R>(repo: &R, user: &AuthenticatedUser, form: ServiceForm) -> ServiceResult<Service>
where
    R: UserReader + CatalogWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let data = ServiceData::try_from(form)?;
    let service = repo.create_service(&data)?;
    log::info!("Service {} created", service.id);
    Ok(service)
}

pub fn save_service<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: ServiceForm,
) -> ServiceResult<Service>
where
    R: UserReader + CatalogWriter + ?Sized,
{
    ensure_admin(repo, user)?;
    let id = service_id(id)?;

    let data = ServiceData::try_from(form)?;
    Ok(repo.update_service(id, &data)?)
}

pub fn set_service_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    active: bool,
) -> ServiceResult<Service>
where
    R: UserReader + CatalogWriter + ?Sized,
{
    ensure_admin(repo, user)?;
    Ok(repo.set_service_active(service_id(id)?, active)?)
}
