use std::time::Duration;

use rusty_s3::{Credentials, UrlStyle};
use url::Url;

use crate::{Bucket, Client, Result};

pub struct MissingCred;
pub struct MissingSecret(String);
pub struct MissingKey(String);
pub struct Complete {
    key: String,
    secret: String,
}

pub struct Builder<State> {
    addr: Url,
    region: Option<String>,
    cred: State,
    url_style: Option<UrlStyle>,
    token: Option<String>,
    actions_expires_in: Option<Duration>,
    timeout: Option<Duration>,
}

impl<State> Builder<State> {
    fn with_cred<Next>(self, cred: Next) -> Builder<Next> {
        Builder {
            addr: self.addr,
            region: self.region,
            cred,
            url_style: self.url_style,
            token: self.token,
            actions_expires_in: self.actions_expires_in,
            timeout: self.timeout,
        }
    }
}

impl Builder<MissingCred> {
    /// Create a new `Builder`.
    /// It's currently missing its key and secret.
    ///
    /// # Example
    /// ```
    /// use s3lister::Builder;
    ///
    /// let client = Builder::new("http://127.0.0.1:8080")?
    ///     .key("irods_user")
    ///     .secret("irods_password")
    ///     .client();
    /// # Ok::<(), s3lister::Error>(())
    /// ```
    ///
    /// If you try to call `.client()` before setting the key and secret it won't compile.
    /// ```compile_fail
    /// use s3lister::Builder;
    ///
    /// let client = Builder::new("http://127.0.0.1:8080")?
    ///     .client();
    /// # Ok::<(), s3lister::Error>(())
    /// ```
    ///
    /// Same if you only forgot the key:
    /// ```compile_fail
    /// use s3lister::Builder;
    ///
    /// let client = Builder::new("http://127.0.0.1:8080")?
    ///     .secret("irods_password")
    ///     .client();
    /// # Ok::<(), s3lister::Error>(())
    /// ```
    ///
    /// Or the secret:
    /// ```compile_fail
    /// use s3lister::Builder;
    ///
    /// let client = Builder::new("http://127.0.0.1:8080")?
    ///     .key("irods_user")
    ///     .client();
    /// # Ok::<(), s3lister::Error>(())
    /// ```
    ///
    /// The address is the only thing checked locally:
    /// ```
    /// use s3lister::{Builder, ErrorKind};
    ///
    /// let error = Builder::new("127.0.0.1 8080").err().unwrap();
    /// assert_eq!(error.kind(), ErrorKind::InvalidInput);
    /// ```
    pub fn new(addr: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            addr: addr.as_ref().parse()?,
            region: None,
            cred: MissingCred,
            url_style: None,
            token: None,
            actions_expires_in: None,
            timeout: None,
        })
    }

    /// Set the access key in the `Builder`.
    pub fn key(self, key: impl Into<String>) -> Builder<MissingSecret> {
        self.with_cred(MissingSecret(key.into()))
    }

    /// Set the secret key in the `Builder`.
    pub fn secret(self, secret: impl Into<String>) -> Builder<MissingKey> {
        self.with_cred(MissingKey(secret.into()))
    }
}

impl Builder<MissingSecret> {
    pub fn secret(mut self, secret: impl Into<String>) -> Builder<Complete> {
        let key = std::mem::take(&mut self.cred.0);
        self.with_cred(Complete {
            key,
            secret: secret.into(),
        })
    }
}

impl Builder<MissingKey> {
    pub fn key(mut self, key: impl Into<String>) -> Builder<Complete> {
        let secret = std::mem::take(&mut self.cred.0);
        self.with_cred(Complete {
            key: key.into(),
            secret,
        })
    }
}

impl Builder<Complete> {
    /// Create a new [`Client`] from the builder.
    ///
    /// # Example
    /// ```
    /// use s3lister::Builder;
    ///
    /// let client = Builder::new("http://127.0.0.1:8080")?
    ///     .secret("irods_password")
    ///     .key("irods_user")
    ///     .region("eu-central-1")
    ///     .client();
    /// # Ok::<(), s3lister::Error>(())
    /// ```
    pub fn client(self) -> Client {
        let cred = if let Some(token) = self.token {
            Credentials::new_with_token(self.cred.key, self.cred.secret, token)
        } else {
            Credentials::new(self.cred.key, self.cred.secret)
        };

        Client {
            addr: self.addr,
            region: self.region.unwrap_or_else(|| String::from("us-east-1")),
            cred,
            url_style: self.url_style.unwrap_or(UrlStyle::VirtualHost),
            actions_expires_in: self
                .actions_expires_in
                .unwrap_or(Duration::from_secs(60 * 60)),
            timeout: self.timeout.unwrap_or(Duration::from_secs(60)),
        }
    }

    /// Create a new [`Bucket`] from the builder.
    /// /!\ Nothing is sent to S3, the bucket may not exist.
    ///
    /// # Example
    /// ```
    /// use s3lister::Builder;
    ///
    /// let bucket = Builder::new("http://127.0.0.1:8080")?
    ///     .key("irods_user")
    ///     .secret("irods_password")
    ///     .with_url_path_style(true)
    ///     .bucket("iychoi")?;
    /// assert_eq!(bucket.name(), "iychoi");
    /// # Ok::<(), s3lister::Error>(())
    /// ```
    pub fn bucket(self, name: impl Into<String>) -> Result<Bucket> {
        self.client().bucket(name)
    }
}

impl<T> Builder<T> {
    /// Use `http://url.com/bucket/` instead of `http://bucket.url.com/`.
    /// Required for ip addresses and `localhost`.
    pub fn with_url_path_style(mut self, path_style: bool) -> Self {
        self.url_style = Some(if path_style {
            UrlStyle::Path
        } else {
            UrlStyle::VirtualHost
        });
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn maybe_token(mut self, token: Option<impl Into<String>>) -> Self {
        self.token = token.map(|s| s.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// How long the presigned urls stay valid.
    pub fn actions_expires_in(mut self, actions_expires_in: Duration) -> Self {
        self.actions_expires_in = Some(actions_expires_in);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
