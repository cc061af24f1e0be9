use std::vec;

use percent_encoding::percent_decode_str;
use rusty_s3::actions::ListObjectsV2;

use crate::{error::InternalError, Bucket, Result};

/// An object as reported by the listing. We never own its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub key: String,
    pub size: u64,
    pub last_modified: String,
    pub etag: String,
}

/// The listing is always requested with `encoding-type=url`, keys come back
/// percent-encoded with `+` standing for a space.
fn decode_key(key: &str) -> Result<String> {
    let key = key.replace('+', " ");
    let decoded = match percent_decode_str(&key).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            return Err(InternalError::BadListPayload(format!("key `{key}` is not utf-8: {e}")).into())
        }
    };
    Ok(decoded)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Truncation {
    NotYetKnown,
    Truncated,
    NotTruncated,
}

/// Iterator over the objects of a bucket.
/// Follows the continuation tokens until S3 says the listing is over.
/// Once an error has been returned the iterator is exhausted.
#[derive(Debug)]
pub struct ListObjects {
    bucket: Bucket,
    prefix: Option<String>,
    page_size: Option<usize>,
    continuation_token: Option<String>,
    page: vec::IntoIter<Object>,
    truncated: Truncation,
}

impl ListObjects {
    pub(crate) fn new(bucket: Bucket) -> Self {
        Self {
            bucket,
            prefix: None,
            page_size: None,
            continuation_token: None,
            page: Vec::new().into_iter(),
            truncated: Truncation::NotYetKnown,
        }
    }

    /// Only list the keys starting with `prefix`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Ask S3 for at most `page_size` objects per request.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    fn fetch(&mut self) -> Result<()> {
        let client = &self.bucket.client;
        let mut action = self.bucket.bucket.list_objects_v2(Some(&client.cred));
        if let Some(prefix) = &self.prefix {
            action.with_prefix(prefix.as_str());
        }
        if let Some(page_size) = self.page_size {
            action.with_max_keys(page_size);
        }
        if let Some(token) = &self.continuation_token {
            action.with_continuation_token(token.as_str());
        }

        log::debug!(
            "Listing objects of `{}` (continuation token: {:?})",
            self.bucket.name(),
            self.continuation_token
        );
        let response = client.get(action)?;
        let body = response
            .into_string()
            .map_err(InternalError::S3ReturnedNonUtf8Payload)?;
        let response = ListObjectsV2::parse_response(&body)
            .map_err(|e| InternalError::BadListPayload(e.to_string()))?;

        log::trace!("Received a page of {} objects", response.contents.len());

        self.continuation_token = response
            .next_continuation_token
            .filter(|token| !token.is_empty());
        self.truncated = if self.continuation_token.is_some() {
            Truncation::Truncated
        } else {
            Truncation::NotTruncated
        };
        self.page = response
            .contents
            .into_iter()
            .map(|content| {
                Ok(Object {
                    key: decode_key(&content.key)?,
                    size: content.size,
                    last_modified: content.last_modified,
                    etag: content.etag.trim_matches('"').to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter();

        Ok(())
    }
}

impl Iterator for ListObjects {
    type Item = Result<Object>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(object) = self.page.next() {
                return Some(Ok(object));
            }
            match self.truncated {
                Truncation::NotTruncated => return None,
                // A truncated page may come back empty, we must keep asking.
                Truncation::NotYetKnown | Truncation::Truncated => {
                    if let Err(e) = self.fetch() {
                        self.truncated = Truncation::NotTruncated;
                        return Some(Err(e));
                    }
                }
            }
        }
    }
}
