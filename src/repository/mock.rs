//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::catalog::{Package, PackageData, PackageWithServices, Service, ServiceData};
use crate::domain::contact::{Contact, NewContact};
use crate::domain::dashboard::DashboardStats;
use crate::domain::document::{Estimation, NewEstimation, NewProposal, Proposal};
use crate::domain::invoice::{Invoice, NewInvoice, NewPayment, Payment};
use crate::domain::project::{NewProject, Project, ProjectOverview, UpdateProject};
use crate::domain::status::{
    ContactStatus, EstimationStatus, InvoiceStatus, PaymentStatus, ProjectStatus, ProposalStatus,
    TaskStatus,
};
use crate::domain::task::{NewTask, Task};
use crate::domain::types::{
    ContactId, Email, EstimationId, InvoiceId, PackageId, PaymentId, ProjectId, ProposalId,
    ServiceId, TaskId, UserId,
};
use crate::domain::user::{ClientSummary, NewUser, UpdateUser, User, UserCredentials};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CatalogReader, CatalogWriter, ClientListQuery, ContactListQuery, ContactReader, ContactWriter,
    DocumentListQuery, EstimationReader, EstimationWriter, InvoiceReader, InvoiceWriter,
    PaymentReader, PaymentWriter, ProjectListQuery, ProjectReader, ProjectWriter, ProposalReader,
    ProposalWriter, StatsReader, TaskListQuery, TaskReader, TaskWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
        fn get_credentials_by_id(&self, id: UserId) -> RepositoryResult<Option<UserCredentials>>;
        fn get_credentials_by_email(
            &self,
            email: &Email,
        ) -> RepositoryResult<Option<UserCredentials>>;
        fn list_clients(
            &self,
            query: ClientListQuery,
        ) -> RepositoryResult<(usize, Vec<ClientSummary>)>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn create_users(&self, new_users: &[NewUser]) -> RepositoryResult<usize>;
        fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User>;
        fn set_user_active(&self, id: UserId, is_active: bool) -> RepositoryResult<User>;
        fn set_password_hash(&self, id: UserId, password_hash: &str) -> RepositoryResult<()>;
    }

    impl ProjectReader for Repository {
        fn get_project_by_id(&self, id: ProjectId) -> RepositoryResult<Option<Project>>;
        fn list_projects(
            &self,
            query: ProjectListQuery,
        ) -> RepositoryResult<(usize, Vec<ProjectOverview>)>;
    }

    impl ProjectWriter for Repository {
        fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project>;
        fn update_project(
            &self,
            id: ProjectId,
            updates: &UpdateProject,
        ) -> RepositoryResult<Project>;
        fn set_project_status(
            &self,
            id: ProjectId,
            status: ProjectStatus,
        ) -> RepositoryResult<Project>;
    }

    impl ProposalReader for Repository {
        fn list_proposals(
            &self,
            query: DocumentListQuery<ProposalStatus>,
        ) -> RepositoryResult<(usize, Vec<(Proposal, Project)>)>;
    }

    impl ProposalWriter for Repository {
        fn create_proposal(&self, new_proposal: &NewProposal) -> RepositoryResult<Proposal>;
        fn set_proposal_status(
            &self,
            id: ProposalId,
            status: ProposalStatus,
        ) -> RepositoryResult<Proposal>;
    }

    impl EstimationReader for Repository {
        fn list_estimations(
            &self,
            query: DocumentListQuery<EstimationStatus>,
        ) -> RepositoryResult<(usize, Vec<(Estimation, Project)>)>;
    }

    impl EstimationWriter for Repository {
        fn create_estimation(&self, new_estimation: &NewEstimation) -> RepositoryResult<Estimation>;
        fn set_estimation_status(
            &self,
            id: EstimationId,
            status: EstimationStatus,
        ) -> RepositoryResult<Estimation>;
    }

    impl InvoiceReader for Repository {
        fn get_invoice_by_id(&self, id: InvoiceId) -> RepositoryResult<Option<Invoice>>;
        fn list_invoices(
            &self,
            query: DocumentListQuery<InvoiceStatus>,
        ) -> RepositoryResult<(usize, Vec<(Invoice, Project)>)>;
        fn list_invoice_payments(&self, invoice_id: InvoiceId) -> RepositoryResult<Vec<Payment>>;
    }

    impl InvoiceWriter for Repository {
        fn create_invoice(&self, new_invoice: &NewInvoice) -> RepositoryResult<Invoice>;
        fn set_invoice_status(
            &self,
            id: InvoiceId,
            status: InvoiceStatus,
        ) -> RepositoryResult<Invoice>;
    }

    impl PaymentReader for Repository {
        fn list_payments(
            &self,
            query: DocumentListQuery<PaymentStatus>,
        ) -> RepositoryResult<(usize, Vec<(Payment, Invoice)>)>;
    }

    impl PaymentWriter for Repository {
        fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment>;
        fn set_payment_status(
            &self,
            id: PaymentId,
            status: PaymentStatus,
        ) -> RepositoryResult<Payment>;
    }

    impl CatalogReader for Repository {
        fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
        fn list_services(&self, active: Option<bool>) -> RepositoryResult<Vec<Service>>;
        fn get_package_by_id(
            &self,
            id: PackageId,
        ) -> RepositoryResult<Option<PackageWithServices>>;
        fn list_packages(&self, active: Option<bool>) -> RepositoryResult<Vec<PackageWithServices>>;
    }

    impl CatalogWriter for Repository {
        fn create_service(&self, data: &ServiceData) -> RepositoryResult<Service>;
        fn update_service(&self, id: ServiceId, data: &ServiceData) -> RepositoryResult<Service>;
        fn set_service_active(&self, id: ServiceId, is_active: bool) -> RepositoryResult<Service>;
        fn create_package(&self, data: &PackageData) -> RepositoryResult<Package>;
        fn update_package(&self, id: PackageId, data: &PackageData) -> RepositoryResult<Package>;
        fn set_package_active(&self, id: PackageId, is_active: bool) -> RepositoryResult<Package>;
    }

    impl TaskReader for Repository {
        fn list_tasks(
            &self,
            query: TaskListQuery,
        ) -> RepositoryResult<(usize, Vec<(Task, Project)>)>;
    }

    impl TaskWriter for Repository {
        fn create_task(&self, new_task: &NewTask) -> RepositoryResult<Task>;
        fn set_task_status(&self, id: TaskId, status: TaskStatus) -> RepositoryResult<Task>;
        fn delete_task(&self, id: TaskId) -> RepositoryResult<()>;
    }

    impl ContactReader for Repository {
        fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>>;
        fn list_contacts(
            &self,
            query: ContactListQuery,
        ) -> RepositoryResult<(usize, Vec<Contact>)>;
    }

    impl ContactWriter for Repository {
        fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
        fn set_contact_status(
            &self,
            id: ContactId,
            status: ContactStatus,
        ) -> RepositoryResult<Contact>;
    }

    impl StatsReader for Repository {
        fn dashboard_stats(&self) -> RepositoryResult<DashboardStats>;
    }
}
