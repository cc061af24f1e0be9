use std::time::Duration;

use rusty_s3::{Credentials, S3Action, UrlStyle};
use ureq::Response;
use url::Url;

use crate::{
    builder::MissingCred, error::InternalError, Bucket, BucketInfo, Builder, ListBuckets, Result,
};

#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) addr: Url,
    pub(crate) region: String,
    pub(crate) cred: Credentials,
    pub(crate) url_style: UrlStyle,
    pub(crate) actions_expires_in: Duration,
    pub(crate) timeout: Duration,
}

impl Client {
    /// Create a new [`Builder`].
    /// It's currently missing its key and secret.
    ///
    /// # Example
    /// ```
    /// use s3lister::Client;
    ///
    /// let client = Client::builder("http://127.0.0.1:8080")?
    ///     .key("irods_user")
    ///     .secret("irods_password")
    ///     .client();
    /// # Ok::<(), s3lister::Error>(())
    /// ```
    pub fn builder(url: impl AsRef<str>) -> Result<Builder<MissingCred>> {
        Builder::new(url)
    }

    /// /!\ Do not check the bucket exists on the S3.
    pub fn bucket(&self, name: impl Into<String>) -> Result<Bucket> {
        Bucket::new(self.clone(), name)
    }

    /// List the buckets owned by the credentials.
    ///
    /// # Example
    /// ```no_run
    /// use s3lister::Client;
    ///
    /// let client = Client::builder("http://127.0.0.1:8080")?
    ///     .key("irods_user")
    ///     .secret("irods_password")
    ///     .client();
    /// for bucket in client.list_buckets()? {
    ///     println!("{}", bucket.name);
    /// }
    /// # Ok::<(), s3lister::Error>(())
    /// ```
    pub fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let action = ListBuckets::new(&self.addr, &self.cred, &self.region);
        log::debug!("Listing the buckets of `{}`", self.addr);
        let body = self
            .get(action)?
            .into_string()
            .map_err(InternalError::S3ReturnedNonUtf8Payload)?;
        let buckets = ListBuckets::parse_response(&body)
            .map_err(|e| InternalError::BadListPayload(e.to_string()))?;
        Ok(buckets)
    }

    pub(crate) fn get<'a>(&self, action: impl S3Action<'a>) -> Result<Response> {
        let url = action.sign(self.actions_expires_in);
        log::trace!("GET {}", url.path());
        Ok(ureq::get(url.as_str()).timeout(self.timeout).call()?)
    }
}
