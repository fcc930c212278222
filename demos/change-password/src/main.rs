//! Change Password Demo
//!
//! Sets a new password for the Auth0 user registered under an email.
//!
//! ## Usage
//!
//! Configure the M2M application:
//! ```bash
//! export AUTH0_DOMAIN="your-app.us.auth0.com"
//! export AUTH0_M2M_CLIENT_ID="..."
//! export AUTH0_M2M_CLIENT_SECRET="..."
//! ```
//!
//! Run the demo:
//! ```bash
//! cargo run -p change-password -- jane@example.com 'N3w-Passw0rd!'
//! ```

use auth0_utils::{Auth0Client, Auth0Error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(email), Some(password)) = (args.next(), args.next()) else {
        eprintln!("usage: change-password <email> <new-password>");
        std::process::exit(2);
    };

    let auth0 = Auth0Client::from_env()?;
    tracing::info!(domain = %auth0.config().domain, "Changing Auth0 password");

    match auth0.change_password(&email, &password).await {
        Ok(user) => {
            println!("success");
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Err(Auth0Error::NotFound { email }) => {
            eprintln!("No user registered with {email}");
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("error: {error}");
            if let Some(payload) = error.payload() {
                eprintln!("{}", serde_json::to_string_pretty(payload)?);
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
