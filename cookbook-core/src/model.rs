//! Records served by the backend and the drafts used to create them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type ItemId = i64;

/// Which backend collection an item lives in. Also supplies the wording
/// used in user notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Recipe,
    Ingredient,
}

impl Kind {
    pub fn singular(self) -> &'static str {
        match self {
            Kind::Recipe => "recipe",
            Kind::Ingredient => "ingredient",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Kind::Recipe => "recipes",
            Kind::Ingredient => "ingredients",
        }
    }

    /// Collection path segment, e.g. `/recipes`.
    pub fn path(self) -> &'static str {
        self.plural()
    }

    pub fn title(self) -> &'static str {
        match self {
            Kind::Recipe => "Recipe",
            Kind::Ingredient => "Ingredient",
        }
    }
}

/// An item the list cache can hold.
pub trait Listed: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// POST body used to create one.
    type Draft: Serialize + Send + Sync;

    const KIND: Kind;

    fn id(&self) -> ItemId;
    fn name(&self) -> &str;
    /// One rendered list entry.
    fn display_line(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    /// Fields we don't model (author, ...), echoed back on update.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    pub fn new(id: ItemId, name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            instructions: instructions.into(),
            extra: Map::new(),
        }
    }

    /// Copy of this record with only the instructions replaced.
    pub fn with_instructions(&self, instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub instructions: String,
}

impl Listed for Recipe {
    type Draft = NewRecipe;
    const KIND: Kind = Kind::Recipe;

    fn id(&self) -> ItemId {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn display_line(&self) -> String {
        format!("{}: {}", self.name, self.instructions)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ingredient {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIngredient {
    pub name: String,
}

impl Listed for Ingredient {
    type Draft = NewIngredient;
    const KIND: Kind = Kind::Ingredient;

    fn id(&self) -> ItemId {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn display_line(&self) -> String {
        self.name.clone()
    }
}
