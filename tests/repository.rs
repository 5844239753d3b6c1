use chrono::NaiveDate;

use agency_admin::auth::{hash_password, verify_password};
use agency_admin::domain::catalog::{PackageData, ServiceData};
use agency_admin::domain::contact::NewContact;
use agency_admin::domain::invoice::{NewInvoice, NewPayment};
use agency_admin::domain::project::{NewProject, Project};
use agency_admin::domain::status::{
    BillingPeriod, ContactStatus, InvoiceStatus, PaymentMethod, PaymentStatus, ProjectStatus,
    ProposalStatus, TaskPriority, TaskStatus, UserRole,
};
use agency_admin::domain::task::NewTask;
use agency_admin::domain::document::NewProposal;
use agency_admin::domain::types::{
    CatalogName, CurrencyCode, DocumentTitle, Email, InvoiceNumber, PersonName, ProjectName,
    SanitizedText, UserId,
};
use agency_admin::domain::user::{NewUser, User};
use agency_admin::repository::errors::RepositoryError;
use agency_admin::repository::{
    CatalogReader, CatalogWriter, ClientListQuery, ContactListQuery, ContactReader, ContactWriter,
    DieselRepository, DocumentListQuery, InvoiceReader, InvoiceWriter, PaymentWriter,
    ProjectListQuery, ProjectReader, ProjectWriter, ProposalReader, ProposalWriter, StatsReader,
    TaskListQuery, TaskReader, TaskWriter, UserReader, UserWriter,
};
use agency_admin::services::auth::{AdminProvisioning, provision_admin};

mod common;

fn new_client(name: &str, email: &str, company: Option<&str>) -> NewUser {
    NewUser::client(
        PersonName::new(name).unwrap(),
        Email::new(email).unwrap(),
        None,
        company.map(str::to_string),
    )
}

fn create_client(repo: &DieselRepository, name: &str, email: &str) -> User {
    repo.create_user(&new_client(name, email, None)).unwrap()
}

fn create_project(repo: &DieselRepository, client_id: UserId, name: &str) -> Project {
    repo.create_project(&NewProject {
        client_id,
        name: ProjectName::new(name).unwrap(),
        description: None,
        status: ProjectStatus::Pending,
        budget_cents: Some(500_000),
        currency: CurrencyCode::default(),
        start_date: None,
        due_date: None,
    })
    .unwrap()
}

fn new_invoice(project: &Project, number: &str, cents: i64) -> NewInvoice {
    NewInvoice {
        project_id: project.id,
        number: InvoiceNumber::new(number).unwrap(),
        amount_cents: cents,
        currency: CurrencyCode::default(),
        issued_at: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        due_date: None,
        notes: None,
    }
}

#[test]
fn test_client_listing_filters_and_counts() {
    let test_db = common::TestDb::new("test_client_listing_filters_and_counts.db");
    let repo = DieselRepository::new(test_db.pool());

    let alice = repo
        .create_user(&new_client("Alice", "alice@example.com", Some("Acme")))
        .unwrap();
    let bob = create_client(&repo, "Bob", "bob@example.com");
    create_project(&repo, alice.id, "Website");
    create_project(&repo, alice.id, "Mobile app");

    let inserted = repo
        .create_users(&[
            new_client("Carol", "carol@example.com", None),
            new_client("Alice again", "ALICE@example.com", None),
        ])
        .unwrap();
    assert_eq!(inserted, 1);

    let (total, clients) = repo.list_clients(ClientListQuery::default()).unwrap();
    assert_eq!(total, 3);
    let alice_row = clients
        .iter()
        .find(|row| row.client.id == alice.id)
        .unwrap();
    assert_eq!(alice_row.project_count, 2);

    let (total, found) = repo
        .list_clients(ClientListQuery::default().search("acme"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].client.id, alice.id);

    repo.set_user_active(bob.id, false).unwrap();
    let (active_total, _) = repo
        .list_clients(ClientListQuery::default().active(true))
        .unwrap();
    let (inactive_total, inactive) = repo
        .list_clients(ClientListQuery::default().active(false))
        .unwrap();
    assert_eq!(active_total, 2);
    assert_eq!(inactive_total, 1);
    assert_eq!(inactive[0].client.id, bob.id);
}

#[test]
fn test_duplicate_email_is_a_constraint_violation() {
    let test_db = common::TestDb::new("test_duplicate_email_is_a_constraint_violation.db");
    let repo = DieselRepository::new(test_db.pool());

    create_client(&repo, "Alice", "alice@example.com");
    let result = repo.create_user(&new_client("Other", "alice@example.com", None));

    assert!(matches!(
        result,
        Err(RepositoryError::ConstraintViolation(_))
    ));
}

#[test]
fn test_client_pagination_past_the_end_is_empty() {
    let test_db = common::TestDb::new("test_client_pagination_past_the_end_is_empty.db");
    let repo = DieselRepository::new(test_db.pool());

    for i in 0..5 {
        create_client(&repo, &format!("Client {i}"), &format!("client{i}@example.com"));
    }

    let (total, page) = repo
        .list_clients(ClientListQuery::default().paginate(2, 2))
        .unwrap();
    assert_eq!(total, 5);
    assert_eq!(page.len(), 2);

    let (total, page) = repo
        .list_clients(ClientListQuery::default().paginate(4, 2))
        .unwrap();
    assert_eq!(total, 5);
    assert!(page.is_empty());

    let (total, page) = repo
        .list_clients(ClientListQuery::default().paginate(9_223_372_036_854_775_807, 20))
        .unwrap();
    assert_eq!(total, 5);
    assert!(page.is_empty());
}

#[test]
fn test_project_overview_counts() {
    let test_db = common::TestDb::new("test_project_overview_counts.db");
    let repo = DieselRepository::new(test_db.pool());

    let client = create_client(&repo, "Alice", "alice@example.com");
    let project = create_project(&repo, client.id, "Website");
    create_project(&repo, client.id, "Branding");

    repo.create_proposal(&NewProposal {
        project_id: project.id,
        title: DocumentTitle::new("Redesign").unwrap(),
        content: None,
        amount_cents: 120_000,
        currency: CurrencyCode::default(),
        valid_until: None,
    })
    .unwrap();
    repo.create_invoice(&new_invoice(&project, "INV-1", 50_000))
        .unwrap();
    let done = repo
        .create_task(&NewTask {
            project_id: project.id,
            title: DocumentTitle::new("Wireframes").unwrap(),
            description: None,
            priority: TaskPriority::High,
            due_date: None,
        })
        .unwrap();
    repo.create_task(&NewTask {
        project_id: project.id,
        title: DocumentTitle::new("Copy").unwrap(),
        description: None,
        priority: TaskPriority::Low,
        due_date: None,
    })
    .unwrap();
    repo.set_task_status(done.id, TaskStatus::Done).unwrap();

    let (total, items) = repo
        .list_projects(ProjectListQuery::default().search("Web"))
        .unwrap();
    assert_eq!(total, 1);
    let overview = &items[0];
    assert_eq!(overview.project.id, project.id);
    assert_eq!(overview.client.id, client.id);
    assert_eq!(overview.proposal_count, 1);
    assert_eq!(overview.invoice_count, 1);
    assert_eq!(overview.open_task_count, 1);

    repo.set_project_status(project.id, ProjectStatus::InProgress)
        .unwrap();
    let (total, _) = repo
        .list_projects(ProjectListQuery::default().status(ProjectStatus::InProgress))
        .unwrap();
    assert_eq!(total, 1);

    let (total, _) = repo
        .list_projects(ProjectListQuery::default().client(client.id))
        .unwrap();
    assert_eq!(total, 2);
}

#[test]
fn test_document_listing_by_status() {
    let test_db = common::TestDb::new("test_document_listing_by_status.db");
    let repo = DieselRepository::new(test_db.pool());

    let client = create_client(&repo, "Alice", "alice@example.com");
    let project = create_project(&repo, client.id, "Website");

    let proposal = |title: &str| NewProposal {
        project_id: project.id,
        title: DocumentTitle::new(title).unwrap(),
        content: Some("Scope".into()),
        amount_cents: 10_000,
        currency: CurrencyCode::default(),
        valid_until: None,
    };
    let first = repo.create_proposal(&proposal("First")).unwrap();
    repo.create_proposal(&proposal("Second")).unwrap();
    assert_eq!(first.status, ProposalStatus::Draft);

    repo.set_proposal_status(first.id, ProposalStatus::Sent)
        .unwrap();

    let (total, sent) = repo
        .list_proposals(DocumentListQuery::default().status(ProposalStatus::Sent))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(sent[0].0.id, first.id);
    assert_eq!(sent[0].1.id, project.id);

    let (total, _) = repo
        .list_proposals(DocumentListQuery::default().project(project.id))
        .unwrap();
    assert_eq!(total, 2);
}

#[test]
fn test_invoice_numbers_are_unique() {
    let test_db = common::TestDb::new("test_invoice_numbers_are_unique.db");
    let repo = DieselRepository::new(test_db.pool());

    let client = create_client(&repo, "Alice", "alice@example.com");
    let project = create_project(&repo, client.id, "Website");

    repo.create_invoice(&new_invoice(&project, "INV-2026-0001", 1_000))
        .unwrap();
    let duplicate = repo.create_invoice(&new_invoice(&project, "INV-2026-0001", 2_000));

    assert!(matches!(
        duplicate,
        Err(RepositoryError::ConstraintViolation(_))
    ));
}

#[test]
fn test_completed_payment_sets_paid_at_and_counts_as_revenue() {
    let test_db =
        common::TestDb::new("test_completed_payment_sets_paid_at_and_counts_as_revenue.db");
    let repo = DieselRepository::new(test_db.pool());

    let client = create_client(&repo, "Alice", "alice@example.com");
    let project = create_project(&repo, client.id, "Website");
    let invoice = repo
        .create_invoice(&new_invoice(&project, "INV-1", 100_000))
        .unwrap();
    repo.set_invoice_status(invoice.id, InvoiceStatus::Sent)
        .unwrap();

    let payment = repo
        .create_payment(&NewPayment {
            invoice_id: invoice.id,
            amount_cents: 40_000,
            currency: CurrencyCode::default(),
            method: PaymentMethod::BankTransfer,
            status: PaymentStatus::Pending,
            reference: Some("wire-42".into()),
            paid_at: None,
        })
        .unwrap();
    assert!(payment.paid_at.is_none());

    let completed = repo
        .set_payment_status(payment.id, PaymentStatus::Completed)
        .unwrap();
    assert!(completed.paid_at.is_some());

    let payments = repo.list_invoice_payments(invoice.id).unwrap();
    assert_eq!(payments.len(), 1);
    let invoice = repo.get_invoice_by_id(invoice.id).unwrap().unwrap();
    assert_eq!(invoice.outstanding(&payments).cents, 60_000);

    let stats = repo.dashboard_stats().unwrap();
    assert_eq!(stats.active_clients, 1);
    assert_eq!(stats.unpaid_invoices, 1);
    assert_eq!(stats.revenue.len(), 1);
    assert_eq!(stats.revenue[0].cents, 40_000);
    assert_eq!(stats.outstanding.len(), 1);
    assert_eq!(stats.outstanding[0].cents, 60_000);
}

#[test]
fn test_package_services_are_replaced_on_update() {
    let test_db = common::TestDb::new("test_package_services_are_replaced_on_update.db");
    let repo = DieselRepository::new(test_db.pool());

    let service = |name: &str, cents: i64| ServiceData {
        name: CatalogName::new(name).unwrap(),
        description: None,
        price_cents: cents,
        currency: CurrencyCode::default(),
    };
    let design = repo.create_service(&service("Design", 50_000)).unwrap();
    let seo = repo.create_service(&service("SEO", 20_000)).unwrap();
    let hosting = repo.create_service(&service("Hosting", 5_000)).unwrap();

    let mut data = PackageData {
        name: CatalogName::new("Starter").unwrap(),
        description: Some("Everything to launch".into()),
        price_cents: 60_000,
        currency: CurrencyCode::default(),
        billing_period: BillingPeriod::OneTime,
        service_ids: vec![design.id, seo.id],
    };
    let package = repo.create_package(&data).unwrap();

    let loaded = repo.get_package_by_id(package.id).unwrap().unwrap();
    assert_eq!(loaded.services.len(), 2);

    data.service_ids = vec![hosting.id];
    data.billing_period = BillingPeriod::Monthly;
    repo.update_package(package.id, &data).unwrap();

    let loaded = repo.get_package_by_id(package.id).unwrap().unwrap();
    assert_eq!(loaded.package.billing_period, BillingPeriod::Monthly);
    assert_eq!(loaded.services.len(), 1);
    assert_eq!(loaded.services[0].id, hosting.id);

    repo.set_service_active(seo.id, false).unwrap();
    assert_eq!(repo.list_services(Some(true)).unwrap().len(), 2);
    assert_eq!(repo.list_services(None).unwrap().len(), 3);

    repo.set_package_active(package.id, false).unwrap();
    assert!(repo.list_packages(Some(true)).unwrap().is_empty());
}

#[test]
fn test_task_filters_and_delete() {
    let test_db = common::TestDb::new("test_task_filters_and_delete.db");
    let repo = DieselRepository::new(test_db.pool());

    let client = create_client(&repo, "Alice", "alice@example.com");
    let project = create_project(&repo, client.id, "Website");

    let task = |title: &str, priority: TaskPriority| NewTask {
        project_id: project.id,
        title: DocumentTitle::new(title).unwrap(),
        description: None,
        priority,
        due_date: NaiveDate::from_ymd_opt(2026, 5, 1),
    };
    let urgent = repo.create_task(&task("Fix checkout", TaskPriority::Urgent)).unwrap();
    repo.create_task(&task("Update footer", TaskPriority::Low)).unwrap();
    assert_eq!(urgent.status, TaskStatus::Todo);

    let (total, rows) = repo
        .list_tasks(TaskListQuery::default().priority(TaskPriority::Urgent))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].0.id, urgent.id);
    assert_eq!(rows[0].1.id, project.id);

    repo.set_task_status(urgent.id, TaskStatus::InProgress)
        .unwrap();
    let (total, _) = repo
        .list_tasks(TaskListQuery::default().status(TaskStatus::InProgress))
        .unwrap();
    assert_eq!(total, 1);

    repo.delete_task(urgent.id).unwrap();
    let (total, _) = repo.list_tasks(TaskListQuery::default()).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_contact_messages_start_new() {
    let test_db = common::TestDb::new("test_contact_messages_start_new.db");
    let repo = DieselRepository::new(test_db.pool());

    let contact = repo
        .create_contact(&NewContact {
            name: PersonName::new("Visitor").unwrap(),
            email: Email::new("visitor@example.com").unwrap(),
            subject: Some("Quote".into()),
            message: SanitizedText::new("<b>Hello</b> <script>x</script>").unwrap(),
        })
        .unwrap();
    assert_eq!(contact.status, ContactStatus::New);
    assert!(!contact.message.as_str().contains("<script>"));

    let (total, _) = repo
        .list_contacts(ContactListQuery::default().status(ContactStatus::New))
        .unwrap();
    assert_eq!(total, 1);

    repo.set_contact_status(contact.id, ContactStatus::Replied)
        .unwrap();
    let stored = repo.get_contact_by_id(contact.id).unwrap().unwrap();
    assert_eq!(stored.status, ContactStatus::Replied);
    assert_eq!(repo.dashboard_stats().unwrap().new_contacts, 0);
}

#[test]
fn test_provisioning_an_inactive_admin_reactivates_it() {
    let test_db = common::TestDb::new("test_provisioning_an_inactive_admin_reactivates_it.db");
    let repo = DieselRepository::new(test_db.pool());

    let admin = common::create_admin(&repo, "admin@example.com", "old-pass-1");
    repo.set_user_active(admin.id, false).unwrap();

    let outcome = provision_admin(
        &repo,
        NewUser {
            name: PersonName::new("Agency Admin").unwrap(),
            email: Email::new("admin@example.com").unwrap(),
            phone: None,
            company: None,
            role: UserRole::Admin,
            password_hash: Some(hash_password("new-pass-1").unwrap()),
        },
    )
    .unwrap();
    assert!(matches!(
        outcome,
        AdminProvisioning::PasswordReset {
            reactivated: true,
            ..
        }
    ));

    let credentials = repo
        .get_credentials_by_email(&Email::new("admin@example.com").unwrap())
        .unwrap()
        .unwrap();
    assert!(credentials.user.is_admin());
    assert!(verify_password("new-pass-1", &credentials.password_hash.unwrap()).unwrap());
}
