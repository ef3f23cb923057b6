//! cookbook-core: client-side state for the recipe manager.
//!
//! The backend owns the data; this crate keeps a per-page copy of one
//! collection (`cache::ListCache`), filters it for display, and drives it
//! from the page actions in `page`.

pub mod backend;
pub mod cache;
pub mod error;
pub mod model;
pub mod page;
pub mod session;
pub mod view;

pub use backend::{Auth, Collection, HttpBackend, DEFAULT_BASE_URL};
pub use cache::ListCache;
pub use error::{Action, Error, Result};
pub use model::{Ingredient, ItemId, Kind, Listed, NewIngredient, NewRecipe, Recipe};
pub use page::{FilterPolicy, IngredientPage, ListPage, RecipePage};
pub use session::Session;
pub use view::{Notifier, View};
