//! Repository implementation for the package and service catalog.

use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::catalog::{Package, PackageData, PackageWithServices, Service, ServiceData};
use crate::domain::types::{PackageId, ServiceId};
use crate::models::catalog::{
    Package as DbPackage, PackageChangeset, PackageService, Service as DbService,
    ServiceChangeset,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CatalogReader, CatalogWriter, DieselRepository};

/// Loads the services bundled by each of `packages`, preserving package order.
fn attach_services(
    conn: &mut SqliteConnection,
    packages: Vec<DbPackage>,
) -> RepositoryResult<Vec<PackageWithServices>> {
    use crate::schema::{package_services, services};

    let package_ids = packages.iter().map(|p| p.id).collect::<Vec<i32>>();

    let mut bundled: HashMap<i32, Vec<Service>> = HashMap::new();
    let rows = package_services::table
        .inner_join(services::table)
        .filter(package_services::package_id.eq_any(package_ids))
        .order(services::name.asc())
        .select((package_services::package_id, DbService::as_select()))
        .load::<(i32, DbService)>(conn)?;

    for (package_id, service) in rows {
        bundled
            .entry(package_id)
            .or_default()
            .push(Service::try_from(service)?);
    }

    packages
        .into_iter()
        .map(|db_package| {
            let services = bundled.remove(&db_package.id).unwrap_or_default();
            Ok(PackageWithServices {
                package: Package::try_from(db_package)?,
                services,
            })
        })
        .collect()
}

fn replace_package_services(
    conn: &mut SqliteConnection,
    package_id: i32,
    service_ids: &[ServiceId],
) -> RepositoryResult<()> {
    use crate::schema::package_services;

    diesel::delete(package_services::table.filter(package_services::package_id.eq(package_id)))
        .execute(conn)?;

    let links = service_ids
        .iter()
        .map(|service_id| PackageService {
            package_id,
            service_id: service_id.get(),
        })
        .collect::<Vec<_>>();

    if !links.is_empty() {
        diesel::insert_or_ignore_into(package_services::table)
            .values(&links)
            .execute(conn)?;
    }
    Ok(())
}

impl CatalogReader for DieselRepository {
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        use crate::schema::services;

        let mut conn = self.conn()?;
        let db_service = services::table
            .find(id.get())
            .first::<DbService>(&mut conn)
            .optional()?;

        Ok(db_service.map(Service::try_from).transpose()?)
    }

    fn list_services(&self, active: Option<bool>) -> RepositoryResult<Vec<Service>> {
        use crate::schema::services;

        let mut conn = self.conn()?;
        let mut items = services::table.into_boxed::<Sqlite>();
        if let Some(active) = active {
            items = items.filter(services::is_active.eq(active));
        }

        items
            .order((services::name.asc(), services::id.asc()))
            .load::<DbService>(&mut conn)?
            .into_iter()
            .map(|service| Service::try_from(service).map_err(RepositoryError::from))
            .collect()
    }

    fn get_package_by_id(&self, id: PackageId) -> RepositoryResult<Option<PackageWithServices>> {
        use crate::schema::packages;

        let mut conn = self.conn()?;
        let Some(db_package) = packages::table
            .find(id.get())
            .first::<DbPackage>(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };

        Ok(attach_services(&mut conn, vec![db_package])?.pop())
    }

    fn list_packages(&self, active: Option<bool>) -> RepositoryResult<Vec<PackageWithServices>> {
        use crate::schema::packages;

        let mut conn = self.conn()?;
        let mut items = packages::table.into_boxed::<Sqlite>();
        if let Some(active) = active {
            items = items.filter(packages::is_active.eq(active));
        }

        let db_packages = items
            .order((packages::price_cents.asc(), packages::id.asc()))
            .load::<DbPackage>(&mut conn)?;

        attach_services(&mut conn, db_packages)
    }
}

impl CatalogWriter for DieselRepository {
    fn create_service(&self, data: &ServiceData) -> RepositoryResult<Service> {
        use crate::schema::services;

        let mut conn = self.conn()?;
        let db_service = diesel::insert_into(services::table)
            .values(&ServiceChangeset::from(data))
            .get_result::<DbService>(&mut conn)?;

        Ok(Service::try_from(db_service)?)
    }

    fn update_service(&self, id: ServiceId, data: &ServiceData) -> RepositoryResult<Service> {
        use crate::schema::services;

        let mut conn = self.conn()?;
        let db_service = diesel::update(services::table.find(id.get()))
            .set(&ServiceChangeset::from(data))
            .get_result::<DbService>(&mut conn)?;

        Ok(Service::try_from(db_service)?)
    }

    fn set_service_active(&self, id: ServiceId, is_active: bool) -> RepositoryResult<Service> {
        use crate::schema::services;

        let mut conn = self.conn()?;
        let db_service = diesel::update(services::table.find(id.get()))
            .set((
                services::is_active.eq(is_active),
                services::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbService>(&mut conn)?;

        Ok(Service::try_from(db_service)?)
    }

    fn create_package(&self, data: &PackageData) -> RepositoryResult<Package> {
        use crate::schema::packages;

        let mut conn = self.conn()?;
        let db_package = conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_package = diesel::insert_into(packages::table)
                .values(&PackageChangeset::from(data))
                .get_result::<DbPackage>(conn)?;
            replace_package_services(conn, db_package.id, &data.service_ids)?;
            Ok(db_package)
        })?;

        Ok(Package::try_from(db_package)?)
    }

    fn update_package(&self, id: PackageId, data: &PackageData) -> RepositoryResult<Package> {
        use crate::schema::packages;

        let mut conn = self.conn()?;
        let db_package = conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_package = diesel::update(packages::table.find(id.get()))
                .set(&PackageChangeset::from(data))
                .get_result::<DbPackage>(conn)?;
            replace_package_services(conn, db_package.id, &data.service_ids)?;
            Ok(db_package)
        })?;

        Ok(Package::try_from(db_package)?)
    }

    fn set_package_active(&self, id: PackageId, is_active: bool) -> RepositoryResult<Package> {
        use crate::schema::packages;

        let mut conn = self.conn()?;
        let db_package = diesel::update(packages::table.find(id.get()))
            .set((
                packages::is_active.eq(is_active),
                packages::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbPackage>(&mut conn)?;

        Ok(Package::try_from(db_package)?)
    }
}
