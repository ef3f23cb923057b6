use crate::model::Kind;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or empty input, rejected before any request is made.
    #[error("{0}")]
    Validation(&'static str),

    #[error("{} not found: {name}", kind.title())]
    NotFound { kind: Kind, name: String },

    #[error("incorrect login")]
    IncorrectLogin,

    #[error("not logged in")]
    NotLoggedIn,

    /// Backend answered with a non-success status.
    #[error("{method} {path} returned {status}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
    },

    /// Network failure or an unreadable response body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The user action an error interrupted; selects the notice wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch(Kind),
    Search(Kind),
    Add(Kind),
    Update(Kind),
    Delete(Kind),
    Login,
    Logout,
}

impl Error {
    /// Text shown to the user when `action` fails with this error.
    pub fn notice(&self, action: Action) -> String {
        match (self, action) {
            (Error::Validation(msg), _) => (*msg).to_string(),
            (Error::NotFound { kind, .. }, _) => format!("{} not found", kind.title()),
            (Error::NotLoggedIn, _) => "Please log in first".to_string(),
            (Error::IncorrectLogin, _) => "Incorrect login!".to_string(),
            (Error::Status { .. }, Action::Login) => "Unknown issue!".to_string(),
            (Error::Status { .. }, Action::Logout) => "Failed to logout".to_string(),
            (Error::Status { .. }, Action::Fetch(kind)) => format!("Failed to fetch {}", kind.plural()),
            (Error::Status { .. }, Action::Add(kind)) => format!("Failed to add {}", kind.singular()),
            (Error::Status { .. }, Action::Update(kind)) => format!("Failed to update {}", kind.singular()),
            (Error::Status { .. }, Action::Delete(kind)) => format!("Failed to delete {}", kind.singular()),
            (_, Action::Login) => "An error occurred during login. Please try again.".to_string(),
            (_, Action::Logout) => "An error occurred during logout".to_string(),
            (_, Action::Fetch(kind)) => format!("An error occurred while fetching {}", kind.plural()),
            (_, Action::Search(kind)) => format!("An error occurred while searching {}", kind.plural()),
            (_, Action::Add(kind)) => format!("An error occurred while adding {}", kind.singular()),
            (_, Action::Update(kind)) => format!("An error occurred while updating {}", kind.singular()),
            (_, Action::Delete(kind)) => format!("An error occurred while deleting {}", kind.singular()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> Error {
        Error::Status {
            method: "POST",
            path: "/recipes".into(),
            status: 500,
        }
    }

    #[test]
    fn status_notices_name_the_action() {
        assert_eq!(status().notice(Action::Add(Kind::Recipe)), "Failed to add recipe");
        assert_eq!(status().notice(Action::Fetch(Kind::Ingredient)), "Failed to fetch ingredients");
        assert_eq!(status().notice(Action::Login), "Unknown issue!");
        assert_eq!(
            status().notice(Action::Search(Kind::Recipe)),
            "An error occurred while searching recipes"
        );
    }

    #[test]
    fn lookup_and_decode_notices() {
        let nf = Error::NotFound {
            kind: Kind::Ingredient,
            name: "Salt".into(),
        };
        assert_eq!(nf.notice(Action::Delete(Kind::Ingredient)), "Ingredient not found");

        let bad: Error = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert_eq!(
            bad.notice(Action::Update(Kind::Recipe)),
            "An error occurred while updating recipe"
        );
    }
}
