#![allow(dead_code)]
use async_trait::async_trait;
use cookbook_core::{
    Auth, Collection, Error, Ingredient, ItemId, Listed, NewIngredient, NewRecipe, Notifier,
    Recipe, Result, Session, View,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory backend collection that counts calls.
pub struct Fake<T> {
    pub items: Mutex<Vec<T>>,
    pub lists: AtomicUsize,
    pub creates: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
    pub fail_list: AtomicBool,
    pub fail_mutations: AtomicBool,
    pub last_update: Mutex<Option<T>>,
}

impl<T: Listed> Fake<T> {
    pub fn with(items: Vec<T>) -> Self {
        Self {
            items: Mutex::new(items),
            lists: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            fail_list: AtomicBool::new(false),
            fail_mutations: AtomicBool::new(false),
            last_update: Mutex::new(None),
        }
    }

    pub fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }
    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }
    pub fn push(&self, item: T) {
        self.items.lock().unwrap().push(item);
    }

    fn next_id(&self) -> ItemId {
        self.items
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.id())
            .max()
            .unwrap_or(0)
            + 1
    }

    fn check(&self, flag: &AtomicBool, method: &'static str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(Error::Status {
                method,
                path: format!("/{}", T::KIND.path()),
                status: 500,
            });
        }
        Ok(())
    }

    async fn do_list(&self) -> Result<Vec<T>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_list, "GET")?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn do_update(&self, item: &T) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_mutations, "PUT")?;
        let mut items = self.items.lock().unwrap();
        if let Some(slot) = items.iter_mut().find(|i| i.id() == item.id()) {
            *slot = item.clone();
        }
        *self.last_update.lock().unwrap() = Some(item.clone());
        Ok(())
    }

    async fn do_delete(&self, id: ItemId) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_mutations, "DELETE")?;
        self.items.lock().unwrap().retain(|i| i.id() != id);
        Ok(())
    }
}

#[async_trait]
impl Collection<Recipe> for Fake<Recipe> {
    async fn list(&self) -> Result<Vec<Recipe>> {
        self.do_list().await
    }
    async fn create(&self, draft: &NewRecipe) -> Result<()> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_mutations, "POST")?;
        let id = self.next_id();
        self.push(Recipe::new(id, &draft.name, &draft.instructions));
        Ok(())
    }
    async fn update(&self, item: &Recipe) -> Result<()> {
        self.do_update(item).await
    }
    async fn delete(&self, id: ItemId) -> Result<()> {
        self.do_delete(id).await
    }
}

#[async_trait]
impl Collection<Ingredient> for Fake<Ingredient> {
    async fn list(&self) -> Result<Vec<Ingredient>> {
        self.do_list().await
    }
    async fn create(&self, draft: &NewIngredient) -> Result<()> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_mutations, "POST")?;
        let id = self.next_id();
        self.push(Ingredient::new(id, &draft.name));
        Ok(())
    }
    async fn update(&self, item: &Ingredient) -> Result<()> {
        self.do_update(item).await
    }
    async fn delete(&self, id: ItemId) -> Result<()> {
        self.do_delete(id).await
    }
}

/// Auth double: accepts one username/password pair.
pub struct FakeAuth {
    pub user: &'static str,
    pub password: &'static str,
    pub admin: bool,
    pub logouts: AtomicUsize,
}

#[async_trait]
impl Auth for FakeAuth {
    async fn login(&self, username: &str, password: &str) -> Result<Session> {
        if username == self.user && password == self.password {
            Ok(Session::new("tok", self.admin))
        } else {
            Err(Error::IncorrectLogin)
        }
    }
    async fn logout(&self, session: &Session) -> Result<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        session.token.as_ref().map(|_| ()).ok_or(Error::NotLoggedIn)
    }
}

/// Records what a page rendered and alerted.
#[derive(Default)]
pub struct RecordingView {
    pub renders: Vec<Vec<String>>,
    pub alerts: Vec<String>,
}

impl RecordingView {
    pub fn last_render(&self) -> Vec<String> {
        self.renders.last().cloned().unwrap_or_default()
    }
}

impl Notifier for RecordingView {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

impl<T: Listed> View<T> for RecordingView {
    fn render(&mut self, items: &[T]) {
        self.renders
            .push(items.iter().map(|i| i.name().to_string()).collect());
    }
}

pub fn recipes(names: &[&str]) -> Vec<Recipe> {
    names
        .iter()
        .enumerate()
        .map(|(i, n)| Recipe::new(i as ItemId + 1, *n, format!("cook {n}")))
        .collect()
}

pub fn names<T: Listed>(items: &[T]) -> Vec<String> {
    items.iter().map(|i| i.name().to_string()).collect()
}
