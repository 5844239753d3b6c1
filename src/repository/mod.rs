use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::sqlite::SqliteConnection;

use crate::db::DbPool;
use crate::domain::catalog::{Package, PackageData, PackageWithServices, Service, ServiceData};
use crate::domain::contact::{Contact, NewContact};
use crate::domain::dashboard::DashboardStats;
use crate::domain::document::{Estimation, NewEstimation, NewProposal, Proposal};
use crate::domain::invoice::{Invoice, NewInvoice, NewPayment, Payment};
use crate::domain::project::{NewProject, Project, ProjectOverview, UpdateProject};
use crate::domain::status::{
    ContactStatus, EstimationStatus, InvoiceStatus, PaymentStatus, ProjectStatus, ProposalStatus,
    TaskPriority, TaskStatus,
};
use crate::domain::task::{NewTask, Task};
use crate::domain::types::{
    ContactId, Email, EstimationId, InvoiceId, PackageId, PaymentId, ProjectId, ProposalId,
    ServiceId, TaskId, UserId,
};
use crate::domain::user::{ClientSummary, NewUser, UpdateUser, User, UserCredentials};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

pub mod catalog;
pub mod contact;
pub mod dashboard;
pub mod document;
pub mod errors;
pub mod invoice;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod project;
pub mod task;
pub mod user;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<PooledConnection<ConnectionManager<SqliteConnection>>> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientListQuery {
    pub search: Option<String>,
    pub active: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectListQuery {
    pub status: Option<ProjectStatus>,
    pub client_id: Option<UserId>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ProjectListQuery {
    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn client(mut self, client_id: UserId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

/// Filter for documents that hang off a project: proposals, estimations,
/// invoices and payments (through their invoice).
#[derive(Debug, Clone)]
pub struct DocumentListQuery<S> {
    pub status: Option<S>,
    pub project_id: Option<ProjectId>,
    pub pagination: Option<Pagination>,
}

impl<S> Default for DocumentListQuery<S> {
    fn default() -> Self {
        Self {
            status: None,
            project_id: None,
            pagination: None,
        }
    }
}

impl<S> DocumentListQuery<S> {
    pub fn status(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    pub fn project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub project_id: Option<ProjectId>,
    pub pagination: Option<Pagination>,
}

impl TaskListQuery {
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactListQuery {
    pub status: Option<ContactStatus>,
    pub pagination: Option<Pagination>,
}

impl ContactListQuery {
    pub fn status(mut self, status: ContactStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_credentials_by_id(&self, id: UserId) -> RepositoryResult<Option<UserCredentials>>;
    fn get_credentials_by_email(&self, email: &Email)
    -> RepositoryResult<Option<UserCredentials>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<ClientSummary>)>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    /// Inserts users skipping emails that already exist; returns the inserted count.
    fn create_users(&self, new_users: &[NewUser]) -> RepositoryResult<usize>;
    fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User>;
    fn set_user_active(&self, id: UserId, is_active: bool) -> RepositoryResult<User>;
    fn set_password_hash(&self, id: UserId, password_hash: &str) -> RepositoryResult<()>;
}

pub trait ProjectReader {
    fn get_project_by_id(&self, id: ProjectId) -> RepositoryResult<Option<Project>>;
    fn list_projects(
        &self,
        query: ProjectListQuery,
    ) -> RepositoryResult<(usize, Vec<ProjectOverview>)>;
}

pub trait ProjectWriter {
    fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project>;
    fn update_project(&self, id: ProjectId, updates: &UpdateProject) -> RepositoryResult<Project>;
    fn set_project_status(&self, id: ProjectId, status: ProjectStatus)
    -> RepositoryResult<Project>;
}

pub trait ProposalReader {
    fn list_proposals(
        &self,
        query: DocumentListQuery<ProposalStatus>,
    ) -> RepositoryResult<(usize, Vec<(Proposal, Project)>)>;
}

pub trait ProposalWriter {
    fn create_proposal(&self, new_proposal: &NewProposal) -> RepositoryResult<Proposal>;
    fn set_proposal_status(
        &self,
        id: ProposalId,
        status: ProposalStatus,
    ) -> RepositoryResult<Proposal>;
}

pub trait EstimationReader {
    fn list_estimations(
        &self,
        query: DocumentListQuery<EstimationStatus>,
    ) -> RepositoryResult<(usize, Vec<(Estimation, Project)>)>;
}

pub trait EstimationWriter {
    fn create_estimation(&self, new_estimation: &NewEstimation) -> RepositoryResult<Estimation>;
    fn set_estimation_status(
        &self,
        id: EstimationId,
        status: EstimationStatus,
    ) -> RepositoryResult<Estimation>;
}

pub trait InvoiceReader {
    fn get_invoice_by_id(&self, id: InvoiceId) -> RepositoryResult<Option<Invoice>>;
    fn list_invoices(
        &self,
        query: DocumentListQuery<InvoiceStatus>,
    ) -> RepositoryResult<(usize, Vec<(Invoice, Project)>)>;
    fn list_invoice_payments(&self, invoice_id: InvoiceId) -> RepositoryResult<Vec<Payment>>;
}

pub trait InvoiceWriter {
    fn create_invoice(&self, new_invoice: &NewInvoice) -> RepositoryResult<Invoice>;
    fn set_invoice_status(&self, id: InvoiceId, status: InvoiceStatus)
    -> RepositoryResult<Invoice>;
}

pub trait PaymentReader {
    fn list_payments(
        &self,
        query: DocumentListQuery<PaymentStatus>,
    ) -> RepositoryResult<(usize, Vec<(Payment, Invoice)>)>;
}

pub trait PaymentWriter {
    fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment>;
    fn set_payment_status(&self, id: PaymentId, status: PaymentStatus)
    -> RepositoryResult<Payment>;
}

pub trait CatalogReader {
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
    fn list_services(&self, active: Option<bool>) -> RepositoryResult<Vec<Service>>;
    fn get_package_by_id(&self, id: PackageId) -> RepositoryResult<Option<PackageWithServices>>;
    fn list_packages(&self, active: Option<bool>) -> RepositoryResult<Vec<PackageWithServices>>;
}

pub trait CatalogWriter {
    fn create_service(&self, data: &ServiceData) -> RepositoryResult<Service>;
    fn update_service(&self, id: ServiceId, data: &ServiceData) -> RepositoryResult<Service>;
    fn set_service_active(&self, id: ServiceId, is_active: bool) -> RepositoryResult<Service>;
    fn create_package(&self, data: &PackageData) -> RepositoryResult<Package>;
    fn update_package(&self, id: PackageId, data: &PackageData) -> RepositoryResult<Package>;
    fn set_package_active(&self, id: PackageId, is_active: bool) -> RepositoryResult<Package>;
}

pub trait TaskReader {
    fn list_tasks(&self, query: TaskListQuery) -> RepositoryResult<(usize, Vec<(Task, Project)>)>;
}

pub trait TaskWriter {
    fn create_task(&self, new_task: &NewTask) -> RepositoryResult<Task>;
    fn set_task_status(&self, id: TaskId, status: TaskStatus) -> RepositoryResult<Task>;
    fn delete_task(&self, id: TaskId) -> RepositoryResult<()>;
}

pub trait ContactReader {
    fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>>;
    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)>;
}

pub trait ContactWriter {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
    fn set_contact_status(&self, id: ContactId, status: ContactStatus)
    -> RepositoryResult<Contact>;
}

pub trait StatsReader {
    fn dashboard_stats(&self) -> RepositoryResult<DashboardStats>;
}
