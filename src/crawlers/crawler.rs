use crate::error::WalkError;
use std::future::Future;
use url::Url;

/// Where the walker gets page sources from
pub trait PageSource {
    /// Fetch the page at `url` and return its body as text
    ///
    /// A non-success status must be reported as `WalkError::FetchFailed`,
    /// transport problems as `WalkError::Network`.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, WalkError>>;
}
