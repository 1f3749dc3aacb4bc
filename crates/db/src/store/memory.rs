//! Process-local store backed by `tokio::sync::RwLock`ed maps.
//!
//! Used by the test suites and as a development fallback when no database is
//! configured. Nothing survives a restart. Each method takes the lock once,
//! which gives the same per-record atomicity the PostgreSQL store provides.
//! The `users` unique constraints are checked under the write lock and fail
//! with the same constraint names the migrations declare.

use std::borrow::Cow;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::error::Error as StdError;

use async_trait::async_trait;
use chrono::Utc;
use folio_core::contact::ContactStatus;
use folio_core::project::{ProjectDraft, ProjectFilter, ProjectStatus};
use folio_core::roles::is_admin;
use folio_core::types::DbId;
use sqlx::error::{DatabaseError, ErrorKind};
use tokio::sync::RwLock;

use super::{ContactStore, ProjectStore, StoreHealth, UserStore};
use crate::models::contact::{Contact, ContactStats, CreateContact, UpdateContactStatus};
use crate::models::project::{Project, ProjectStats};
use crate::models::user::{CreateUser, User};

#[derive(Default)]
struct Collections {
    next_id: DbId,
    users: BTreeMap<DbId, User>,
    projects: BTreeMap<DbId, Project>,
    contacts: BTreeMap<DbId, Contact>,
}

impl Collections {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first_projects(mut rows: Vec<Project>) -> Vec<Project> {
    rows.sort_by_key(|p| Reverse((p.created_at, p.id)));
    rows
}

fn newest_first_contacts(mut rows: Vec<Contact>) -> Vec<Contact> {
    rows.sort_by_key(|c| Reverse((c.created_at, c.id)));
    rows
}

/// Constraint names mirrored from the `users` migration.
const UQ_USERS_EMAIL: &str = "uq_users_email";
const UQ_USERS_SINGLE_ADMIN: &str = "uq_users_single_admin";

/// A unique violation shaped like the one PostgreSQL reports (SQLSTATE 23505).
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct UniqueViolation {
    constraint: &'static str,
    message: String,
}

impl UniqueViolation {
    fn error(constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(Self {
            constraint,
            message: format!("duplicate key value violates unique constraint \"{constraint}\""),
        }))
    }
}

impl DatabaseError for UniqueViolation {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23505"))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        Some(self.constraint)
    }

    fn table(&self) -> Option<&str> {
        Some("users")
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::UniqueViolation
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn admin_exists(&self) -> Result<bool, sqlx::Error> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().any(|u| is_admin(&u.role)))
    }

    async fn create(&self, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut inner = self.inner.write().await;
        if is_admin(&input.role) && inner.users.values().any(|u| is_admin(&u.role)) {
            return Err(UniqueViolation::error(UQ_USERS_SINGLE_ADMIN));
        }
        if inner.users.values().any(|u| u.email == input.email) {
            return Err(UniqueViolation::error(UQ_USERS_EMAIL));
        }
        let now = Utc::now();
        let user = User {
            id: inner.allocate_id(),
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let inner = self.inner.read().await;
        let rows = inner
            .projects
            .values()
            .filter(|p| filter.matches(p.category, p.featured, p.status))
            .cloned()
            .collect();
        Ok(newest_first_projects(rows))
    }

    async fn list_featured(&self, limit: usize) -> Result<Vec<Project>, sqlx::Error> {
        let inner = self.inner.read().await;
        let rows = inner
            .projects
            .values()
            .filter(|p| p.featured && p.status == ProjectStatus::Active)
            .cloned()
            .collect();
        let mut rows = newest_first_projects(rows);
        rows.truncate(limit);
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        Ok(self.inner.read().await.projects.get(&id).cloned())
    }

    async fn create(&self, input: &ProjectDraft) -> Result<Project, sqlx::Error> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let project = Project {
            id: inner.allocate_id(),
            title: input.title.clone(),
            description: input.description.clone(),
            short_description: input.short_description.clone(),
            image: input.image.clone(),
            technologies: input.technologies.clone(),
            github_url: input.github_url.clone(),
            live_url: input.live_url.clone(),
            category: input.category,
            featured: input.featured,
            status: input.status,
            created_at: now,
            updated_at: now,
        };
        inner.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update(
        &self,
        id: DbId,
        input: &ProjectDraft,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        let Some(project) = inner.projects.get_mut(&id) else {
            return Ok(None);
        };
        project.title = input.title.clone();
        project.description = input.description.clone();
        project.short_description = input.short_description.clone();
        project.image = input.image.clone();
        project.technologies = input.technologies.clone();
        project.github_url = input.github_url.clone();
        project.live_url = input.live_url.clone();
        project.category = input.category;
        project.featured = input.featured;
        project.status = input.status;
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.inner.write().await.projects.remove(&id).is_some())
    }

    async fn stats(&self) -> Result<ProjectStats, sqlx::Error> {
        let inner = self.inner.read().await;
        let projects = inner.projects.values();
        Ok(ProjectStats {
            total_projects: count(inner.projects.len()),
            active_projects: count(
                projects
                    .clone()
                    .filter(|p| p.status == ProjectStatus::Active)
                    .count(),
            ),
            featured_projects: count(projects.filter(|p| p.featured).count()),
        })
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create(&self, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let contact = Contact {
            id: inner.allocate_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            subject: input.subject.clone(),
            message: input.message.clone(),
            status: ContactStatus::New,
            admin_notes: String::new(),
            created_at: now,
            updated_at: now,
        };
        inner.contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn list(&self, status: Option<ContactStatus>) -> Result<Vec<Contact>, sqlx::Error> {
        let inner = self.inner.read().await;
        let rows = inner
            .contacts
            .values()
            .filter(|c| status.is_none_or(|s| s == c.status))
            .cloned()
            .collect();
        Ok(newest_first_contacts(rows))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        Ok(self.inner.read().await.contacts.get(&id).cloned())
    }

    async fn mark_read(&self, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        match inner.contacts.get_mut(&id) {
            Some(contact) if contact.status == ContactStatus::New => {
                contact.status = ContactStatus::Read;
                contact.updated_at = Utc::now();
                Ok(Some(contact.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn update_status(
        &self,
        id: DbId,
        input: &UpdateContactStatus,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        let Some(contact) = inner.contacts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(status) = input.status {
            contact.status = status;
        }
        if let Some(notes) = &input.admin_notes {
            contact.admin_notes = notes.clone();
        }
        contact.updated_at = Utc::now();
        Ok(Some(contact.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.inner.write().await.contacts.remove(&id).is_some())
    }

    async fn stats(&self) -> Result<ContactStats, sqlx::Error> {
        let inner = self.inner.read().await;
        let with = |status: ContactStatus| {
            count(inner.contacts.values().filter(|c| c.status == status).count())
        };
        Ok(ContactStats {
            total_messages: count(inner.contacts.len()),
            new_messages: with(ContactStatus::New),
            read_messages: with(ContactStatus::Read),
            responded_messages: with(ContactStatus::Responded),
        })
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_core::project::ProjectCategory;

    use super::*;

    fn draft(title: &str, featured: bool, status: ProjectStatus) -> ProjectDraft {
        ProjectDraft {
            title: title.into(),
            description: "d".into(),
            short_description: "s".into(),
            image: "i.png".into(),
            technologies: vec!["Rust".into()],
            github_url: None,
            live_url: None,
            category: ProjectCategory::Backend,
            featured,
            status,
        }
    }

    fn user(email: &str, role: &str) -> CreateUser {
        CreateUser {
            username: "owner".into(),
            email: email.into(),
            password_hash: "hash".into(),
            role: role.into(),
        }
    }

    fn violated_constraint(err: &sqlx::Error) -> Option<String> {
        let db_err = err.as_database_error()?;
        assert_eq!(db_err.code().as_deref(), Some("23505"));
        db_err.constraint().map(str::to_string)
    }

    fn contact(name: &str) -> CreateContact {
        CreateContact {
            name: name.into(),
            email: format!("{name}@example.com"),
            subject: "Hello".into(),
            message: "Hi there".into(),
        }
    }

    #[tokio::test]
    async fn projects_list_newest_first() {
        let store = MemoryStore::new();
        for title in ["first", "second", "third"] {
            ProjectStore::create(&store, &draft(title, false, ProjectStatus::Active))
                .await
                .unwrap();
        }
        let titles: Vec<_> = ProjectStore::list(&store, &ProjectFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn featured_requires_active_and_caps_results() {
        let store = MemoryStore::new();
        ProjectStore::create(&store, &draft("hidden", true, ProjectStatus::Inactive))
            .await
            .unwrap();
        for i in 0..8 {
            ProjectStore::create(&store, &draft(&format!("f{i}"), true, ProjectStatus::Active))
                .await
                .unwrap();
        }
        let featured = store.list_featured(6).await.unwrap();
        assert_eq!(featured.len(), 6);
        assert!(featured.iter().all(|p| p.status == ProjectStatus::Active));
        assert_eq!(featured[0].title, "f7");
    }

    #[tokio::test]
    async fn project_stats_count_independently() {
        let store = MemoryStore::new();
        ProjectStore::create(&store, &draft("a", true, ProjectStatus::Inactive))
            .await
            .unwrap();
        ProjectStore::create(&store, &draft("b", false, ProjectStatus::Active))
            .await
            .unwrap();
        let stats = ProjectStore::stats(&store).await.unwrap();
        assert_eq!(
            stats,
            ProjectStats {
                total_projects: 2,
                active_projects: 1,
                featured_projects: 1,
            }
        );
    }

    #[tokio::test]
    async fn mark_read_only_moves_new_messages() {
        let store = MemoryStore::new();
        let created = ContactStore::create(&store, &contact("ana")).await.unwrap();
        assert_eq!(created.status, ContactStatus::New);

        let read = store.mark_read(created.id).await.unwrap().unwrap();
        assert_eq!(read.status, ContactStatus::Read);
        assert!(store.mark_read(created.id).await.unwrap().is_none());
        assert!(store.mark_read(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_status_keeps_absent_fields() {
        let store = MemoryStore::new();
        let created = ContactStore::create(&store, &contact("ana")).await.unwrap();
        let input = UpdateContactStatus {
            status: None,
            admin_notes: Some("call back".into()),
        };
        let updated = store.update_status(created.id, &input).await.unwrap().unwrap();
        assert_eq!(updated.status, ContactStatus::New);
        assert_eq!(updated.admin_notes, "call back");
    }

    #[tokio::test]
    async fn contact_list_filters_by_status() {
        let store = MemoryStore::new();
        let a = ContactStore::create(&store, &contact("a")).await.unwrap();
        ContactStore::create(&store, &contact("b")).await.unwrap();
        store.mark_read(a.id).await.unwrap();

        let new = ContactStore::list(&store, Some(ContactStatus::New)).await.unwrap();
        assert_eq!(new.len(), 1);
        assert_eq!(new[0].name, "b");

        let all = ContactStore::list(&store, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "b");
    }

    #[tokio::test]
    async fn admin_exists_after_create() {
        let store = MemoryStore::new();
        assert!(!store.admin_exists().await.unwrap());
        UserStore::create(&store, &user("owner@example.com", "admin"))
            .await
            .unwrap();
        assert!(store.admin_exists().await.unwrap());
        assert!(store.find_by_email("owner@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn second_admin_is_a_unique_violation() {
        let store = MemoryStore::new();
        UserStore::create(&store, &user("owner@example.com", "admin"))
            .await
            .unwrap();

        let err = UserStore::create(&store, &user("other@example.com", "admin"))
            .await
            .unwrap_err();
        assert_eq!(violated_constraint(&err).as_deref(), Some("uq_users_single_admin"));
        assert!(store.find_by_email("other@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let store = MemoryStore::new();
        UserStore::create(&store, &user("owner@example.com", "admin"))
            .await
            .unwrap();

        let err = UserStore::create(&store, &user("owner@example.com", "editor"))
            .await
            .unwrap_err();
        assert_eq!(violated_constraint(&err).as_deref(), Some("uq_users_email"));

        UserStore::create(&store, &user("editor@example.com", "editor"))
            .await
            .unwrap();
    }
}
