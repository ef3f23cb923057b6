//! Page controllers: what each button on the recipe, ingredient and login
//! pages does.
//!
//! Every operation validates input before touching the network, alerts the
//! user through the view on failure, leaves cached state alone when it fails
//! and hands the error back to the caller.

use crate::backend::{Auth, Collection};
use crate::cache::ListCache;
use crate::error::{Action, Error, Result};
use crate::model::{Ingredient, Kind, Listed, NewIngredient, NewRecipe, Recipe};
use crate::session::Session;
use crate::view::{Notifier, View};
use std::sync::Arc;
use tracing::{error, info, warn};

/// What happens to an active search after a successful create, update or
/// delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Drop the search so the refreshed list is unfiltered.
    #[default]
    ResetOnMutation,
    /// Reapply the search to the refreshed list.
    Keep,
}

pub type RecipePage = ListPage<Recipe>;
pub type IngredientPage = ListPage<Ingredient>;

pub struct ListPage<T: Listed> {
    cache: ListCache<T>,
    policy: FilterPolicy,
}

/// Alerts the user about `result`'s error, if any, and passes it through.
fn report<R, N: Notifier + ?Sized>(result: Result<R>, action: Action, view: &mut N) -> Result<R> {
    if let Err(e) = &result {
        error!(?action, error = %e, "page action failed");
        view.alert(&e.notice(action));
    }
    result
}

fn required(value: &str, message: &'static str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(message));
    }
    Ok(value.to_string())
}

impl<T: Listed> ListPage<T> {
    pub fn new(source: Arc<dyn Collection<T>>) -> Self {
        Self::with_policy(source, FilterPolicy::default())
    }

    pub fn with_policy(source: Arc<dyn Collection<T>>, policy: FilterPolicy) -> Self {
        Self {
            cache: ListCache::new(source),
            policy,
        }
    }

    pub fn cache(&self) -> &ListCache<T> {
        &self.cache
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// Page load: show the list when someone is logged in.
    pub async fn load(&mut self, session: &Session, view: &mut dyn View<T>) -> Result<()> {
        if !session.is_authenticated() {
            info!(kind = T::KIND.plural(), "not logged in, list left empty");
            return Ok(());
        }
        self.cache.refresh(view, false).await?;
        Ok(())
    }

    pub async fn refresh(&mut self, view: &mut dyn View<T>) -> Result<&[T]> {
        self.cache.refresh(view, false).await
    }

    pub async fn search(&mut self, term: &str, view: &mut dyn View<T>) -> Result<&[T]> {
        let searched = self.cache.search(term, &mut *view).await.map(|_| ());
        report(searched, Action::Search(T::KIND), view)?;
        Ok(self.cache.display())
    }

    /// Creates `draft` and refreshes the list.
    pub async fn add(&mut self, draft: &T::Draft, view: &mut dyn View<T>) -> Result<()> {
        let created = self.cache.source().create(draft).await;
        report(created, Action::Add(T::KIND), &mut *view)?;
        self.after_mutation(view).await;
        Ok(())
    }

    /// Looks `name` up in the cached list (loading it first if needed),
    /// applies `edit` and sends the result back.
    pub async fn update_with(
        &mut self,
        name: &str,
        edit: impl FnOnce(&T) -> T + Send,
        view: &mut dyn View<T>,
    ) -> Result<()> {
        let current = self.lookup(name, &mut *view).await?;
        let updated = self.cache.source().update(&edit(&current)).await;
        report(updated, Action::Update(T::KIND), &mut *view)?;
        self.after_mutation(view).await;
        Ok(())
    }

    /// Deletes the item called `name`. An unknown name is reported without
    /// issuing a request.
    pub async fn delete(&mut self, name: &str, view: &mut dyn View<T>) -> Result<()> {
        let name = report(
            required(name, missing_name(T::KIND)),
            Action::Delete(T::KIND),
            &mut *view,
        )?;
        let item = self.lookup(&name, &mut *view).await?;
        let deleted = self.cache.source().delete(item.id()).await;
        report(deleted, Action::Delete(T::KIND), &mut *view)?;
        self.after_mutation(view).await;
        Ok(())
    }

    /// Finds `name` in the cached list. Failing to load the list is reported
    /// as a failed fetch.
    async fn lookup(&mut self, name: &str, view: &mut dyn View<T>) -> Result<T> {
        let found = match self.cache.ensure_loaded().await {
            Ok(()) => self.cache.find_by_name(name).cloned().ok_or_else(|| Error::NotFound {
                kind: T::KIND,
                name: name.to_string(),
            }),
            Err(e) => Err(e),
        };
        report(found, Action::Fetch(T::KIND), view)
    }

    /// The mutation itself succeeded. A failed refresh has already alerted
    /// the user; the cached list is redrawn so the screen matches the
    /// (possibly cleared) filter.
    async fn after_mutation(&mut self, view: &mut dyn View<T>) {
        if self.policy == FilterPolicy::ResetOnMutation {
            self.cache.invalidate_filter_on_mutation();
        }
        let refreshed = self.cache.refresh(&mut *view, false).await.map(|_| ());
        if let Err(e) = refreshed {
            warn!(kind = T::KIND.plural(), error = %e, "list is stale after mutation");
            view.render(self.cache.display());
        }
    }
}

fn missing_name(kind: Kind) -> &'static str {
    match kind {
        Kind::Recipe => "Please provide recipe name",
        Kind::Ingredient => "Please provide an ingredient name",
    }
}

impl ListPage<Recipe> {
    pub async fn add_recipe(
        &mut self,
        name: &str,
        instructions: &str,
        view: &mut dyn View<Recipe>,
    ) -> Result<()> {
        const MISSING: &str = "Please provide both recipe name and instructions";
        let draft = required(name, MISSING).and_then(|name| {
            Ok(NewRecipe {
                name,
                instructions: required(instructions, MISSING)?,
            })
        });
        let draft = report(draft, Action::Add(Kind::Recipe), &mut *view)?;
        self.add(&draft, view).await
    }

    pub async fn update_recipe(
        &mut self,
        name: &str,
        new_instructions: &str,
        view: &mut dyn View<Recipe>,
    ) -> Result<()> {
        const MISSING: &str = "Please provide both recipe name and new instructions";
        let input = required(name, MISSING)
            .and_then(|name| Ok((name, required(new_instructions, MISSING)?)));
        let (name, instructions) = report(input, Action::Update(Kind::Recipe), &mut *view)?;
        self.update_with(&name, |r| r.with_instructions(instructions), view)
            .await
    }

    pub async fn delete_recipe(&mut self, name: &str, view: &mut dyn View<Recipe>) -> Result<()> {
        self.delete(name, view).await
    }
}

impl ListPage<Ingredient> {
    pub async fn add_ingredient(&mut self, name: &str, view: &mut dyn View<Ingredient>) -> Result<()> {
        let name = report(
            required(name, missing_name(Kind::Ingredient)),
            Action::Add(Kind::Ingredient),
            &mut *view,
        )?;
        self.add(&NewIngredient { name }, view).await
    }

    pub async fn delete_ingredient(
        &mut self,
        name: &str,
        view: &mut dyn View<Ingredient>,
    ) -> Result<()> {
        self.delete(name, view).await
    }
}

/// Login button. Returns the new session on success.
pub async fn login(
    auth: &dyn Auth,
    username: &str,
    password: &str,
    view: &mut dyn Notifier,
) -> Result<Session> {
    const MISSING: &str = "Please enter both username and password!";
    let session = match required(username, MISSING)
        .and_then(|u| Ok((u, required(password, MISSING)?)))
    {
        Ok((username, password)) => auth.login(&username, &password).await,
        Err(e) => Err(e),
    };
    let session = report(session, Action::Login, view)?;
    info!(admin = session.is_admin, "logged in");
    Ok(session)
}

/// Logout button. Clears `session` once the backend accepts the logout.
pub async fn logout(auth: &dyn Auth, session: &mut Session, view: &mut dyn Notifier) -> Result<()> {
    report(auth.logout(session).await, Action::Logout, view)?;
    session.clear();
    info!("logged out");
    Ok(())
}
