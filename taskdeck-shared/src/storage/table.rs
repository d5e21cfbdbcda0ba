/// In-process table engine
///
/// Rows live in an insertion-ordered vector behind a `std::sync::RwLock`.
/// Critical sections are short and never cross an await point, so a
/// blocking lock is safe under the async [`Backend`] surface. A poisoned
/// lock is reported as [`StorageError::Backend`] rather than panicking the
/// caller.
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{Backend, Mutation, Record, StorageError};

/// Insertion-ordered row store for a single entity
pub struct Table<R: Record> {
    rows: RwLock<Vec<R>>,
}

impl<R: Record> Table<R> {
    /// Creates an empty table
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<R>>, StorageError> {
        self.rows
            .read()
            .map_err(|_| StorageError::Backend(format!("table '{}' lock poisoned", R::TABLE)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<R>>, StorageError> {
        self.rows
            .write()
            .map_err(|_| StorageError::Backend(format!("table '{}' lock poisoned", R::TABLE)))
    }
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> Backend<R> for Table<R> {
    async fn fetch(&self, key: &R::Key) -> Result<Option<R>, StorageError> {
        let rows = self.read()?;
        Ok(rows.iter().find(|row| row.key() == *key).cloned())
    }

    async fn scan(&self) -> Result<Vec<R>, StorageError> {
        let rows = self.read()?;
        Ok(rows.clone())
    }

    async fn insert(&self, row: R) -> Result<R, StorageError> {
        let mut rows = self.write()?;
        if rows.iter().any(|existing| existing.key() == row.key()) {
            return Err(StorageError::DuplicateKey {
                table: R::TABLE,
                key: row.key().to_string(),
            });
        }
        rows.push(row.clone());
        Ok(row)
    }

    async fn mutate(
        &self,
        key: &R::Key,
        mutation: Mutation<R>,
    ) -> Result<Option<R>, StorageError> {
        let mut rows = self.write()?;
        match rows.iter_mut().find(|row| row.key() == *key) {
            Some(row) => {
                mutation(row);
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, key: &R::Key) -> Result<bool, StorageError> {
        let mut rows = self.write()?;
        let before = rows.len();
        rows.retain(|row| row.key() != *key);
        Ok(rows.len() < before)
    }

    async fn count(&self) -> Result<usize, StorageError> {
        let rows = self.read()?;
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::group::{CreateGroup, Group};

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let table: Table<Group> = Table::new();
        let group = table
            .insert(Group::new(CreateGroup {
                name: "Team1".to_string(),
            }))
            .await
            .unwrap();

        let found = table.fetch(&group.id).await.unwrap();
        assert_eq!(found.unwrap().name, "Team1");
        assert_eq!(table.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_key() {
        let table: Table<Group> = Table::new();
        let group = table
            .insert(Group::new(CreateGroup {
                name: "Team1".to_string(),
            }))
            .await
            .unwrap();

        let err = table.insert(group.clone()).await.unwrap_err();
        match err {
            StorageError::DuplicateKey { table, key } => {
                assert_eq!(table, "groups");
                assert_eq!(key, group.id.to_string());
            }
            other => panic!("expected DuplicateKey, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_scan_preserves_insertion_order() {
        let table: Table<Group> = Table::new();
        for name in ["first", "second", "third"] {
            table
                .insert(Group::new(CreateGroup {
                    name: name.to_string(),
                }))
                .await
                .unwrap();
        }

        let names: Vec<String> = table
            .scan()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_mutate_and_remove() {
        let table: Table<Group> = Table::new();
        let group = table
            .insert(Group::new(CreateGroup {
                name: "before".to_string(),
            }))
            .await
            .unwrap();

        let updated = table
            .mutate(&group.id, Box::new(|g: &mut Group| g.name = "after".to_string()))
            .await
            .unwrap();
        assert_eq!(updated.unwrap().name, "after");

        assert!(table.remove(&group.id).await.unwrap());
        assert!(!table.remove(&group.id).await.unwrap());
        assert!(table.fetch(&group.id).await.unwrap().is_none());
    }
}
