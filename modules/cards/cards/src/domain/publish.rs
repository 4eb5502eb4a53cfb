/// Public address of a card: `{base_url}/{username}`.
#[must_use]
pub fn public_url(base_url: &str, username: &str) -> String {
    format!("{}/{username}", base_url.trim_end_matches('/'))
}
