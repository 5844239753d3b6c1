use serde::Serialize;

use crate::domain::catalog::{PackageWithServices, Service};
use crate::domain::status::StatusOption;
use crate::domain::types::ServiceId;

#[derive(Debug, Serialize)]
pub struct PackagesPageData {
    pub packages: Vec<PackageWithServices>,
    /// Active services offered in the package form.
    pub services: Vec<Service>,
    pub billing_options: Vec<StatusOption>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct PackagePageData {
    pub package: PackageWithServices,
    pub services: Vec<Service>,
    pub selected_service_ids: Vec<ServiceId>,
    pub billing_options: Vec<StatusOption>,
}

#[derive(Debug, Serialize)]
pub struct ServicesPageData {
    pub services: Vec<Service>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ServicePageData {
    pub service: Service,
}
