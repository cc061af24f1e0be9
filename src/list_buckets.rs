use std::time::Duration;

use rusty_s3::{signing::sign, Credentials, Map, Method, S3Action};
use serde::Deserialize;
use time::OffsetDateTime;
use url::Url;

/// List every bucket owned by the credentials, with a `GET` on the endpoint root.
#[derive(Debug, Clone)]
pub struct ListBuckets<'a> {
    endpoint: &'a Url,
    credentials: &'a Credentials,
    region: &'a str,

    query: Map<'a>,
    headers: Map<'a>,
}

/// A bucket as reported by `ListBuckets`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketInfo {
    pub name: String,
    #[serde(default)]
    pub creation_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListAllMyBucketsResult {
    #[serde(default)]
    buckets: Buckets,
}

#[derive(Debug, Default, Deserialize)]
struct Buckets {
    #[serde(rename = "Bucket", default)]
    bucket: Vec<BucketInfo>,
}

impl<'a> ListBuckets<'a> {
    pub fn new(endpoint: &'a Url, credentials: &'a Credentials, region: &'a str) -> Self {
        Self {
            endpoint,
            credentials,
            region,

            query: Map::new(),
            headers: Map::new(),
        }
    }

    pub fn parse_response(s: &str) -> Result<Vec<BucketInfo>, quick_xml::DeError> {
        let parsed: ListAllMyBucketsResult = quick_xml::de::from_str(s)?;
        Ok(parsed.buckets.bucket)
    }
}

impl<'a> S3Action<'a> for ListBuckets<'a> {
    const METHOD: Method = Method::Get;

    fn query_mut(&mut self) -> &mut Map<'a> {
        &mut self.query
    }

    fn headers_mut(&mut self) -> &mut Map<'a> {
        &mut self.headers
    }

    fn sign_with_time(&self, expires_in: Duration, time: &OffsetDateTime) -> Url {
        sign(
            time,
            Method::Get,
            self.endpoint.clone(),
            self.credentials.key(),
            self.credentials.secret(),
            self.credentials.token(),
            self.region,
            expires_in.as_secs(),
            self.query.iter(),
            self.headers.iter(),
        )
    }
}
