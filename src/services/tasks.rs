use chrono::{NaiveDate, Utc};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::status::{StatusBadge, TaskPriority, TaskStatus};
use crate::domain::task::{NewTask, Task};
use crate::domain::types::TaskId;
use crate::dto::tasks::{TaskQuery, TaskRow, TasksPageData};
use crate::dto::{Badged, StatusFilter};
use crate::forms::StatusForm;
use crate::forms::tasks::TaskForm;
use crate::pagination::{Paginated, Pagination};
use crate::repository::{ProjectReader, TaskListQuery, TaskReader, TaskWriter, UserReader};
use crate::services::projects::{get_project, project_options};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

fn task_id(id: i32) -> ServiceResult<TaskId> {
    TaskId::new(id).map_err(|_| ServiceError::NotFound)
}

fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.status.is_open() && task.due_date.is_some_and(|due| due < today)
}

pub fn load_tasks<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &TaskQuery,
) -> ServiceResult<TasksPageData>
where
    R: UserReader + ProjectReader + TaskReader + ?Sized,
{
    ensure_admin(repo, user)?;

    let list = query.list();
    let pagination = Pagination::new(list.page(), list.per_page());
    let status = list.status_filter::<TaskStatus>();
    let priority = query.priority_filter();

    let mut list_query = TaskListQuery::default().paginate(pagination.page, pagination.per_page);
    if let Some(status) = status {
        list_query = list_query.status(status);
    }
    if let Some(priority) = priority {
        list_query = list_query.priority(priority);
    }

    let (total, rows) = repo.list_tasks(list_query).map_err(|err| {
        log::error!("Failed to list tasks: {err}");
        err
    })?;

    let today = Utc::now().date_naive();
    let tasks = rows
        .into_iter()
        .map(|(task, project)| {
            let badge = task.status.badge();
            Badged {
                item: TaskRow {
                    priority: task.priority.badge(),
                    overdue: is_overdue(&task, today),
                    task,
                    project,
                },
                badge,
            }
        })
        .collect();

    Ok(TasksPageData {
        tasks: Paginated::new(tasks, pagination, total),
        status_filter: StatusFilter::new(TaskStatus::ALL, status),
        priority_filter: StatusFilter::new(TaskPriority::ALL, priority),
        projects: project_options(repo)?,
    })
}

pub fn add_task<R>(repo: &R, user: &AuthenticatedUser, form: TaskForm) -> ServiceResult<Task>
where
    R: UserReader + ProjectReader + TaskWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let new_task = NewTask::try_from(form)?;
    get_project(repo, new_task.project_id.get())
        .map_err(|_| ServiceError::Form("Select an existing project".to_string()))?;

    let task = repo.create_task(&new_task)?;
    log::info!("Task {} added to project {}", task.id, task.project_id);
    Ok(task)
}

pub fn set_task_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: &StatusForm,
) -> ServiceResult<Task>
where
    R: UserReader + TaskWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let status: TaskStatus = form.parse()?;
    Ok(repo.set_task_status(task_id(id)?, status)?)
}

pub fn delete_task<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: UserReader + TaskWriter + ?Sized,
{
    ensure_admin(repo, user)?;

    let id = task_id(id)?;
    repo.delete_task(id)?;
    log::info!("Task {id} deleted by {}", user.sub);
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::types::{DocumentTitle, ProjectId};
    use crate::repository::errors::RepositoryError;
    use crate::services::test_support::{ADMIN_ID, project, repo_with_users, session};

    fn task(id: i32, status: TaskStatus, due_date: Option<NaiveDate>) -> Task {
        let now = Utc::now().naive_utc();
        Task {
            id: TaskId::new(id).unwrap(),
            project_id: ProjectId::new(1).unwrap(),
            title: DocumentTitle::new(format!("Task {id}")).unwrap(),
            description: None,
            status,
            priority: TaskPriority::High,
            due_date,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn overdue_only_for_open_tasks_past_due() {
        let today = Utc::now().date_naive();
        let yesterday = today - Duration::days(1);

        assert!(is_overdue(&task(1, TaskStatus::Todo, Some(yesterday)), today));
        assert!(!is_overdue(&task(2, TaskStatus::Done, Some(yesterday)), today));
        assert!(!is_overdue(&task(3, TaskStatus::Review, Some(today)), today));
        assert!(!is_overdue(&task(4, TaskStatus::Todo, None), today));
    }

    #[test]
    fn list_applies_status_and_priority() {
        let mut repo = repo_with_users();
        repo.expect_list_tasks()
            .withf(|query| {
                query.status == Some(TaskStatus::InProgress)
                    && query.priority == Some(TaskPriority::Urgent)
            })
            .times(1)
            .returning(|_| {
                Ok((
                    1,
                    vec![(task(1, TaskStatus::InProgress, None), project(1))],
                ))
            });
        repo.expect_list_projects().returning(|_| Ok((0, Vec::new())));

        let query = TaskQuery {
            status: Some("IN_PROGRESS".into()),
            priority: Some("URGENT".into()),
            page: None,
        };
        let data = load_tasks(&repo, &session(ADMIN_ID), &query).unwrap();
        assert_eq!(data.tasks.items[0].item.priority.label, "High");
        assert_eq!(data.priority_filter.selected, Some("URGENT"));
        assert!(!data.tasks.items[0].item.overdue);
    }

    #[test]
    fn deleting_missing_task_is_not_found() {
        let mut repo = repo_with_users();
        repo.expect_delete_task()
            .returning(|_| Err(RepositoryError::NotFound));

        assert!(matches!(
            delete_task(&repo, &session(ADMIN_ID), 12),
            Err(ServiceError::NotFound)
        ));
    }
}
