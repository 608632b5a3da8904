//! Fixtures shared by the service unit tests.

use std::sync::Arc;

use vault_core::types::{FileId, UserId};
use vault_database::{MemoryVaultStore, VaultStore};
use vault_entity::file::{CreateFile, File};
use vault_entity::user::{CreateUser, UserRole};

use crate::context::RequestContext;

pub(crate) fn store() -> (MemoryVaultStore, Arc<dyn VaultStore>) {
    let store = MemoryVaultStore::new();
    let shared: Arc<dyn VaultStore> = Arc::new(store.clone());
    (store, shared)
}

pub(crate) async fn user(store: &MemoryVaultStore, name: &str, role: UserRole) -> RequestContext {
    let user = store
        .upsert_user(&CreateUser {
            id: UserId::new(),
            username: name.to_string(),
            email: format!("{name}@example.com"),
            role,
        })
        .await
        .unwrap();
    RequestContext::new(user.id, user.role, user.username)
}

pub(crate) async fn file(store: &MemoryVaultStore, owner: &RequestContext, name: &str) -> File {
    store
        .create_file(&CreateFile {
            id: FileId::new(),
            owner_id: owner.user_id,
            name: name.to_string(),
            content_type: "application/octet-stream".to_string(),
            size_bytes: 128,
        })
        .await
        .unwrap()
}
