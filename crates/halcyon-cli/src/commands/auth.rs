use clap::Subcommand;
use uuid::Uuid;

use halcyon_core::backend::credentials;

use super::CliResult;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store backend credentials in the OS keyring
    Login {
        /// Backend base URL
        #[arg(long)]
        url: String,
        /// Backend API key
        #[arg(long)]
        key: String,
        /// Signed-in user id
        #[arg(long)]
        user: Uuid,
    },
    /// Remove stored credentials
    Logout,
    /// Check whether credentials are present
    Status,
}

pub fn run(action: AuthAction) -> CliResult {
    match action {
        AuthAction::Login { url, key, user } => {
            // Validate the URL before anything lands in the keyring.
            halcyon_core::RestBackend::new(&url, key.as_str())?;
            credentials::set(credentials::BACKEND_URL, &url)?;
            credentials::set(credentials::BACKEND_KEY, &key)?;
            credentials::set(credentials::USER_ID, &user.to_string())?;
            println!("signed in as {user}");
        }
        AuthAction::Logout => {
            credentials::delete(credentials::BACKEND_URL)?;
            credentials::delete(credentials::BACKEND_KEY)?;
            credentials::delete(credentials::USER_ID)?;
            println!("signed out");
        }
        AuthAction::Status => {
            let signed_in = credentials::get(credentials::BACKEND_KEY)?.is_some()
                && credentials::get(credentials::USER_ID)?.is_some();
            println!("{}", if signed_in { "authenticated" } else { "not authenticated" });
        }
    }
    Ok(())
}
