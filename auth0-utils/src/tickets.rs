//! Password-change tickets

use crate::{
    client::Auth0Client,
    error::Result,
    types::{PasswordChangeTicket, TicketResponse},
};
use reqwest::Method;

impl Auth0Client {
    /// Create a password-change ticket and return its URL
    ///
    /// Identify the user with [`PasswordChangeTicket::for_user`] or
    /// [`PasswordChangeTicket::for_email`]. Other combinations are sent as
    /// given and rejected by Auth0.
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::Request` if Auth0 refuses to issue the ticket
    pub async fn get_reset_password_link(&self, ticket: &PasswordChangeTicket) -> Result<String> {
        let builder = self
            .management(Method::POST, "tickets/password-change")
            .await?
            .json(ticket);
        let response: TicketResponse = Self::fetch(builder).await?;
        Ok(response.ticket)
    }
}
