//! User management endpoints

use crate::{
    client::{Auth0Client, segment},
    error::{Auth0Error, Result},
    fetch::error_payload,
    types::{CreateUserRequest, ListUsersQuery, User, UserUpdate},
};
use reqwest::{Method, Response};

impl Auth0Client {
    /// Create a database user with a generated password
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::Request` with Auth0's payload if the user cannot
    /// be created (including when it already exists)
    pub async fn create_user(&self, email: &str, connection: &str) -> Result<User> {
        self.create_user_with(&CreateUserRequest::new(email, connection))
            .await
    }

    /// Create a user from a full request body
    ///
    /// # Errors
    ///
    /// Same as [`Auth0Client::create_user`]
    pub async fn create_user_with(&self, request: &CreateUserRequest) -> Result<User> {
        let builder = self.management(Method::POST, "users").await?.json(request);
        let user: User = Self::fetch(builder).await?;

        tracing::info!(user_id = %user.user_id, "Auth0 user created");
        Ok(user)
    }

    /// Create a user, or return the existing one if the email is taken
    ///
    /// Only Auth0's "The user already exists" error triggers the lookup; any
    /// other failure is returned as is.
    ///
    /// # Errors
    ///
    /// - `Auth0Error::Request` for creation failures other than a duplicate
    /// - `Auth0Error::NotFound` if Auth0 reports a duplicate but the lookup
    ///   finds nobody (e.g., the user lives in another tenant's connection)
    pub async fn create_or_return_user(&self, email: &str, connection: &str) -> Result<User> {
        match self.create_user(email, connection).await {
            Err(error) if error.is_user_already_exists() => {
                tracing::warn!(connection, "Auth0 user already exists, looking it up");
                self.get_user_by_email(email).await
            }
            result => result,
        }
    }

    /// All users with this email, across connections
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::Request` if Auth0 rejects the lookup
    pub async fn search_users_by_email(&self, email: &str) -> Result<Vec<User>> {
        let builder = self
            .management(Method::GET, "users-by-email")
            .await?
            .query(&[("email", email)]);
        Self::fetch(builder).await
    }

    /// First user with this email
    ///
    /// When the same email exists in several connections, which one comes
    /// first is up to Auth0.
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::NotFound` if nobody has this email
    pub async fn get_user_by_email(&self, email: &str) -> Result<User> {
        self.search_users_by_email(email)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Auth0Error::NotFound {
                email: email.to_string(),
            })
    }

    /// Users matching an email through the Lucene search endpoint
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::Request` if Auth0 rejects the query
    pub async fn find_users_by_email_query(&self, email: &str) -> Result<Vec<User>> {
        self.list_users(&ListUsersQuery::by_email(email)).await
    }

    /// List users, optionally paginated and filtered
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::Request` if Auth0 rejects the query
    pub async fn list_users(&self, query: &ListUsersQuery) -> Result<Vec<User>> {
        let builder = self.management(Method::GET, "users").await?.query(query);
        Self::fetch(builder).await
    }

    /// Fetch a user by ID
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::Request` (status 404) if the user does not exist
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        let path = format!("users/{}", segment(user_id));
        Self::fetch(self.management(Method::GET, &path).await?).await
    }

    /// Update a user; fields left `None` are not touched
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::Request` if Auth0 rejects the update
    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User> {
        let path = format!("users/{}", segment(user_id));
        let builder = self.management(Method::PATCH, &path).await?.json(update);
        Self::fetch(builder).await
    }

    /// Set a new password for the user with this email
    ///
    /// The user is resolved with [`Auth0Client::get_user_by_email`], so with
    /// duplicate emails across connections only the first match changes.
    ///
    /// # Errors
    ///
    /// - `Auth0Error::NotFound` if nobody has this email
    /// - `Auth0Error::Request` if Auth0 rejects the password
    pub async fn change_password(&self, email: &str, password: &str) -> Result<User> {
        let user = self.get_user_by_email(email).await?;
        self.update_user(&user.user_id, &UserUpdate::password(password))
            .await
    }

    /// Delete a user
    ///
    /// Returns the raw success response (Auth0 answers `204 No Content`).
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::Request` for any status outside 200-299
    pub async fn delete_user(&self, user_id: &str) -> Result<Response> {
        let path = format!("users/{}", segment(user_id));
        let response = Self::send(self.management(Method::DELETE, &path).await?).await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(user_id, "Auth0 user deleted");
            return Ok(response);
        }

        let text = response.text().await?;
        tracing::warn!(status = status.as_u16(), user_id, "Auth0 user deletion failed");
        Err(Auth0Error::Request {
            status: status.as_u16(),
            payload: error_payload(&text),
        })
    }
}
