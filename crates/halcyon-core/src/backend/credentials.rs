//! Thin wrapper around the OS keyring for backend credentials.
//!
//! Stores the hosted backend's URL and API key plus the signed-in user id,
//! looked up by well-known key names.

const SERVICE: &str = "halcyon";

pub const BACKEND_URL: &str = "backend_url";
pub const BACKEND_KEY: &str = "backend_key";
pub const USER_ID: &str = "user_id";

pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    match entry.get_password() {
        Ok(pw) => Ok(Some(pw)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    entry.set_password(value)?;
    Ok(())
}

pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    match entry.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
