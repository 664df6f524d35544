use super::strategies::Scheme;
use reqwest::{redirect, Client};

const USER_AGENT: &str = concat!("getbody/", env!("CARGO_PKG_VERSION"));

/// Build a one-shot reqwest client for the given scheme.
///
/// No redirects, no proxy, no idle connections kept around, and no
/// `Accept-Encoding`: the body comes back exactly as sent.
pub(crate) fn build_client(scheme: Scheme) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(redirect::Policy::none())
        .no_proxy()
        .pool_max_idle_per_host(0)
        .https_only(scheme == Scheme::Https)
        .build()
}
