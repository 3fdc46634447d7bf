use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use claimdesk_core::error::AppError;
use claimdesk_core::result::AppResult;
use claimdesk_entity::user::{CreateUser, User, UserFilter, UserRole};

use crate::store::IdentityStore;

/// Identity store holding users in a concurrent map.
///
/// Email uniqueness is enforced through a second index keyed by the
/// lowercase email; claiming a slot in that index is atomic.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    users: DashMap<Uuid, User>,
    emails: DashMap<String, Uuid>,
}

impl MemoryIdentityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn modify<F>(&self, id: Uuid, f: F) -> AppResult<User>
    where
        F: FnOnce(&mut User),
    {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        f(&mut user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.emails.get(&email.to_lowercase()).map(|id| *id) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        match self.emails.entry(data.email.to_lowercase()) {
            Entry::Occupied(_) => Err(AppError::conflict("Email already registered")),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let user = User {
                    id: Uuid::new_v4(),
                    email: data.email.to_lowercase(),
                    password_hash: data.password_hash.clone(),
                    name: data.name.clone(),
                    role: data.role,
                    company_id: data.company_id.clone(),
                    is_active: true,
                    created_at: now,
                    updated_at: now,
                    last_login_at: None,
                };
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        self.modify(id, |u| u.password_hash = password_hash.to_string())
            .map(|_| ())
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User> {
        self.modify(id, |u| u.role = role)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<User> {
        self.modify(id, |u| u.is_active = active)
    }

    async fn update_last_login(&self, id: Uuid) -> AppResult<()> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.last_login_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimdesk_core::ErrorKind;

    fn new_user(email: &str, role: UserRole, company: Option<&str>) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            name: "Test".to_string(),
            role,
            company_id: company.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryIdentityStore::new();
        let user = store
            .create(&new_user("john@kenyainsurance.co.ke", UserRole::InsuranceAgent, Some("INS001")))
            .await
            .unwrap();
        assert!(user.is_active);
        let by_email = store
            .find_by_email("JOHN@kenyainsurance.co.ke")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryIdentityStore::new();
        store
            .create(&new_user("a@x.com", UserRole::Police, None))
            .await
            .unwrap();
        let err = store
            .create(&new_user("A@X.com", UserRole::Admin, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_concurrent_registration_admits_one() {
        let store = std::sync::Arc::new(MemoryIdentityStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create(&new_user("race@x.com", UserRole::Police, None))
                    .await
                    .is_ok()
            }));
        }
        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_set_active_and_role() {
        let store = MemoryIdentityStore::new();
        let user = store
            .create(&new_user("p@x.com", UserRole::Police, None))
            .await
            .unwrap();
        let user = store.set_active(user.id, false).await.unwrap();
        assert!(!user.can_login());
        let user = store.update_role(user.id, UserRole::Admin).await.unwrap();
        assert_eq!(user.role, UserRole::Admin);
        let err = store.set_active(Uuid::new_v4(), true).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let store = MemoryIdentityStore::new();
        store
            .create(&new_user("a1@x.com", UserRole::InsuranceAgent, Some("INS001")))
            .await
            .unwrap();
        store
            .create(&new_user("a2@x.com", UserRole::InsuranceAgent, Some("INS002")))
            .await
            .unwrap();
        store
            .create(&new_user("p1@x.com", UserRole::Police, None))
            .await
            .unwrap();

        let agents = store
            .list(&UserFilter {
                role: Some(UserRole::InsuranceAgent),
                company_id: None,
            })
            .await
            .unwrap();
        assert_eq!(agents.len(), 2);

        let ins2 = store
            .list(&UserFilter {
                role: None,
                company_id: Some("INS002".into()),
            })
            .await
            .unwrap();
        assert_eq!(ins2.len(), 1);
        assert_eq!(ins2[0].email, "a2@x.com");
    }
}
