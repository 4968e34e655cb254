//! Server-rendered pages using Handlebars

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::User;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.hbs");
const EDIT_TEMPLATE: &str = include_str!("../../templates/edit.hbs");

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Failed to register template '{name}': {message}")]
    Register { name: &'static str, message: String },

    #[error("Failed to render template '{name}': {message}")]
    Render { name: &'static str, message: String },
}

/// Row shown for a user. Carries no password material.
#[derive(Debug, Serialize)]
struct UserRow<'a> {
    id: String,
    name: &'a str,
    email: &'a str,
}

impl<'a> From<&'a User> for UserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name(),
            email: user.email(),
        }
    }
}

#[derive(Debug, Serialize)]
struct IndexContext<'a> {
    list_path: &'a str,
    prefix: &'a str,
    users: Vec<UserRow<'a>>,
}

#[derive(Debug, Serialize)]
struct EditContext<'a> {
    list_path: &'a str,
    prefix: &'a str,
    user: UserRow<'a>,
}

/// Registered page templates, built once at startup
#[derive(Debug)]
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    const INDEX: &'static str = "index";
    const EDIT: &'static str = "edit";

    pub fn new() -> Result<Self, ViewError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        for (name, source) in [(Self::INDEX, INDEX_TEMPLATE), (Self::EDIT, EDIT_TEMPLATE)] {
            registry
                .register_template_string(name, source)
                .map_err(|e| ViewError::Register {
                    name,
                    message: e.to_string(),
                })?;
        }

        Ok(Self { registry })
    }

    /// Render the user list with its creation form
    pub fn render_index(&self, users: &[User], paths: &RoutePaths) -> Result<String, ViewError> {
        debug!(count = users.len(), "Rendering user list");

        let context = IndexContext {
            list_path: paths.list(),
            prefix: paths.prefix(),
            users: users.iter().map(UserRow::from).collect(),
        };

        self.render(Self::INDEX, &context)
    }

    /// Render the edit form for one user
    pub fn render_edit(&self, user: &User, paths: &RoutePaths) -> Result<String, ViewError> {
        let context = EditContext {
            list_path: paths.list(),
            prefix: paths.prefix(),
            user: UserRow::from(user),
        };

        self.render(Self::EDIT, &context)
    }

    fn render<T: Serialize>(&self, name: &'static str, data: &T) -> Result<String, ViewError> {
        self.registry
            .render(name, data)
            .map_err(|e| ViewError::Render {
                name,
                message: e.to_string(),
            })
    }
}

/// URL layout derived from the configured mount path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePaths {
    prefix: String,
    list: String,
}

impl RoutePaths {
    /// `mount_path` may be `/`, `/users`, `users/` and so on
    pub fn new(mount_path: &str) -> Self {
        let trimmed = mount_path.trim().trim_matches('/');

        if trimmed.is_empty() {
            Self {
                prefix: String::new(),
                list: "/".to_string(),
            }
        } else {
            let prefix = format!("/{}", trimmed);
            Self {
                list: prefix.clone(),
                prefix,
            }
        }
    }

    /// Path prefix for nested routes; empty when mounted at the root
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Location of the list view, the target of every redirect
    pub fn list(&self) -> &str {
        &self.list
    }
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self::new("/users")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewUser, PasswordDigest, UserId};

    fn user(name: &str) -> User {
        User::create(
            UserId::generate(),
            NewUser {
                name: name.to_string(),
                email: "ana@x.com".to_string(),
                password: PasswordDigest::new("$argon2id$v=19$digest"),
            },
        )
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(RoutePaths::new("/users").prefix(), "/users");
        assert_eq!(RoutePaths::new("/users").list(), "/users");
        assert_eq!(RoutePaths::new("users/").list(), "/users");
        assert_eq!(RoutePaths::new("/admin/users/").prefix(), "/admin/users");
        assert_eq!(RoutePaths::new("/").prefix(), "");
        assert_eq!(RoutePaths::new("/").list(), "/");
        assert_eq!(RoutePaths::new("").list(), "/");
    }

    #[test]
    fn test_templates_register() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_index_lists_users_without_digest() {
        let views = Views::new().unwrap();
        let users = vec![user("Ana"), user("Bea")];

        let html = views.render_index(&users, &RoutePaths::default()).unwrap();

        assert!(html.contains("Ana"));
        assert!(html.contains("Bea"));
        assert!(html.contains(&format!("/users/edit/{}", users[0].id())));
        assert!(html.contains(&format!("/users/delete/{}", users[1].id())));
        assert!(!html.contains("argon2id"));
    }

    #[test]
    fn test_index_empty() {
        let views = Views::new().unwrap();

        let html = views.render_index(&[], &RoutePaths::default()).unwrap();

        assert!(html.contains("No users yet"));
    }

    #[test]
    fn test_index_escapes_html() {
        let views = Views::new().unwrap();

        let html = views
            .render_index(&[user("<script>alert(1)</script>")], &RoutePaths::default())
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_edit_prefills_fields_but_not_password() {
        let views = Views::new().unwrap();
        let user = user("Ana");

        let html = views.render_edit(&user, &RoutePaths::new("/")).unwrap();

        assert!(html.contains(&format!("action=\"/update/{}\"", user.id())));
        assert!(html.contains("value=\"Ana\""));
        assert!(html.contains("value=\"ana@x.com\""));
        assert!(!html.contains("argon2id"));
    }
}
