//! JSON document store.
//!
//! The file holds a single `{"todos": [...]}` document. It is read on first
//! access and rewritten in full on every mutation: the new content goes to a
//! sibling `.tmp` file which is then renamed over the original. One async
//! mutex serializes all access, including the file write.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use claims_security::AccessScope;
use serde::{Deserialize, Serialize};
use todolist_sdk::{Todo, TodoPatch};
use tokio::sync::{Mutex, MutexGuard};

use crate::domain::error::DomainError;
use crate::domain::repo::TodoRepository;

#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default)]
    todos: Vec<Todo>,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    todos: &'a [Todo],
}

pub struct JsonFileTodoRepository {
    path: PathBuf,
    // `None` until the file has been read.
    state: Mutex<Option<Document>>,
}

impl JsonFileTodoRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(path: &Path) -> Result<Document, DomainError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Store file absent, starting empty");
                return Ok(Document::default());
            }
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Document::default());
        }

        let doc: Document = serde_json::from_slice(&bytes)?;
        tracing::debug!(path = %path.display(), count = doc.todos.len(), "Loaded store file");
        Ok(doc)
    }

    async fn document(&self) -> Result<MutexGuard<'_, Option<Document>>, DomainError> {
        let mut guard = self.state.lock().await;
        if guard.is_none() {
            *guard = Some(Self::load(&self.path).await?);
        }
        Ok(guard)
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    async fn persist(&self, todos: &[Todo]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(&DocumentRef { todos })?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Run `op` on a copy of the table and commit it only once it is on disk.
    async fn mutate<T: Send>(
        &self,
        op: impl FnOnce(&mut Vec<Todo>) -> Result<(T, bool), DomainError> + Send,
    ) -> Result<T, DomainError> {
        let mut guard = self.document().await?;
        let doc = guard.get_or_insert_with(Document::default);

        let mut todos = doc.todos.clone();
        let (out, changed) = op(&mut todos)?;
        if changed {
            self.persist(&todos).await?;
            doc.todos = todos;
        }
        Ok(out)
    }
}

#[async_trait]
impl TodoRepository for JsonFileTodoRepository {
    async fn list(&self, scope: &AccessScope) -> Result<Vec<Todo>, DomainError> {
        let mut guard = self.document().await?;
        let doc = guard.get_or_insert_with(Document::default);
        Ok(super::list_scoped(&doc.todos, scope))
    }

    async fn find(&self, scope: &AccessScope, id: &str) -> Result<Option<Todo>, DomainError> {
        let mut guard = self.document().await?;
        let doc = guard.get_or_insert_with(Document::default);
        Ok(super::find_scoped(&doc.todos, scope, id))
    }

    async fn insert(&self, todo: Todo) -> Result<Todo, DomainError> {
        self.mutate(|todos| super::insert_unique(todos, todo).map(|t| (t, true)))
            .await
    }

    async fn update(
        &self,
        scope: &AccessScope,
        id: &str,
        patch: TodoPatch,
    ) -> Result<Option<Todo>, DomainError> {
        self.mutate(|todos| {
            let updated = super::update_scoped(todos, scope, id, patch);
            let changed = updated.is_some();
            Ok((updated, changed))
        })
        .await
    }

    async fn delete(&self, scope: &AccessScope, id: &str) -> Result<bool, DomainError> {
        self.mutate(|todos| {
            let deleted = super::delete_scoped(todos, scope, id);
            Ok((deleted, deleted))
        })
        .await
    }
}
