//! In-memory `DrinkRepo` for handler tests.
//!
//! Counts every call so tests can assert a request never reached the store.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::repos::{Drink, DrinkRepo, error::RepoError};

#[derive(Default)]
pub struct MemoryDrinkRepo {
    rows: Mutex<BTreeMap<i64, Drink>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryDrinkRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drink(self, title: &str, recipe: &str) -> Self {
        self.insert(title, recipe).expect("seed drink");
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<Drink> {
        self.rows.lock().unwrap().values().cloned().collect()
    }

    /// Make every following call fail like a lost connection.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn enter(&self) -> Result<(), RepoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn insert(&self, title: &str, recipe: &str) -> Result<Drink, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|d| d.title == title) {
            return Err(RepoError::Conflict);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let drink = Drink {
            id,
            title: title.to_string(),
            recipe: recipe.to_string(),
        };
        rows.insert(id, drink.clone());
        Ok(drink)
    }
}

#[async_trait]
impl DrinkRepo for MemoryDrinkRepo {
    async fn list_all(&self) -> Result<Vec<Drink>, RepoError> {
        self.enter()?;
        Ok(self.snapshot())
    }

    async fn get(&self, id: i64) -> Result<Option<Drink>, RepoError> {
        self.enter()?;
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, title: &str, recipe: &str) -> Result<Drink, RepoError> {
        self.enter()?;
        self.insert(title, recipe)
    }

    async fn update(&self, drink: &Drink) -> Result<(), RepoError> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap();
        if rows
            .values()
            .any(|d| d.id != drink.id && d.title == drink.title)
        {
            return Err(RepoError::Conflict);
        }
        match rows.get_mut(&drink.id) {
            Some(row) => {
                *row = drink.clone();
                Ok(())
            }
            None => Err(RepoError::Missing(drink.id)),
        }
    }

    async fn delete(&self, drink: &Drink) -> Result<(), RepoError> {
        self.enter()?;
        self.rows
            .lock()
            .unwrap()
            .remove(&drink.id)
            .map(|_| ())
            .ok_or(RepoError::Missing(drink.id))
    }
}
