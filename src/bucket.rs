use crate::{builder::MissingCred, Builder, Client, ListObjects, Result};

#[derive(Debug, Clone)]
pub struct Bucket {
    pub(crate) client: Client,
    pub(crate) bucket: rusty_s3::Bucket,
}

impl Bucket {
    pub fn builder(url: impl AsRef<str>) -> Result<Builder<MissingCred>> {
        Builder::new(url)
    }

    pub fn new(client: Client, bucket: impl Into<String>) -> Result<Self> {
        Ok(Self {
            bucket: rusty_s3::Bucket::new(
                client.addr.clone(),
                client.url_style,
                bucket.into(),
                client.region.clone(),
            )?,
            client,
        })
    }

    pub fn name(&self) -> &str {
        self.bucket.name()
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Lazily list every object of the bucket.
    /// Nothing is sent before the first call to `next`, and every call to
    /// `list_objects` starts the listing again from the beginning.
    ///
    /// # Example
    /// ```no_run
    /// use s3lister::Bucket;
    ///
    /// let bucket = Bucket::builder("http://127.0.0.1:8080")?
    ///     .key("irods_user")
    ///     .secret("irods_password")
    ///     .with_url_path_style(true)
    ///     .bucket("iychoi")?;
    ///
    /// for object in bucket.list_objects().prefix("dir/") {
    ///     let object = object?;
    ///     println!("{} - {} bytes", object.key, object.size);
    /// }
    /// # Ok::<(), s3lister::Error>(())
    /// ```
    pub fn list_objects(&self) -> ListObjects {
        ListObjects::new(self.clone())
    }

    /// Same as [`Bucket::list_objects`] but only yields the keys.
    pub fn keys(&self) -> impl Iterator<Item = Result<String>> {
        self.list_objects().map(|object| object.map(|object| object.key))
    }
}
