//! Management API jobs

use crate::{
    client::Auth0Client,
    error::Result,
    types::{Identity, Job, VerificationEmailRequest},
};
use reqwest::Method;

impl Auth0Client {
    /// Ask Auth0 to (re)send the verification email to a user
    ///
    /// The email is sent on behalf of this client's application. Pass an
    /// `identity` to verify a linked secondary account.
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::Request` if Auth0 does not create the job
    pub async fn send_verification_email(
        &self,
        user_id: &str,
        identity: Option<Identity>,
    ) -> Result<Job> {
        let request = VerificationEmailRequest {
            user_id: user_id.to_string(),
            client_id: self.config().client_id.clone(),
            identity,
        };

        let builder = self
            .management(Method::POST, "jobs/verification-email")
            .await?
            .json(&request);
        let job: Job = Self::fetch(builder).await?;

        tracing::info!(job_id = %job.id, status = %job.status, "Verification email job created");
        Ok(job)
    }
}
