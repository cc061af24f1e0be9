use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    S3Error(Box<S3Error>),
    #[error("S3 answered with status {status}: `{body}`.")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error(transparent)]
    InternalError(#[from] InternalError),
    #[error(transparent)]
    HttpError(Box<ureq::Error>),
    #[error(transparent)]
    RustyS3(#[from] rusty_s3::BucketError),
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Coarse classification of an [`Error`], usable without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The endpoint could not be reached.
    Connection,
    /// The credentials were rejected.
    Authorization,
    /// The bucket (or object) doesn't exist.
    NotFound,
    /// The endpoint or the bucket name could not be turned into a url.
    InvalidInput,
    /// S3 answered something we couldn't understand.
    Protocol,
    Other,
}

impl ErrorKind {
    fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorKind::Authorization,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            _ => ErrorKind::Other,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IoError(_) => ErrorKind::Other,
            Error::S3Error(error) => error.kind(),
            Error::UnexpectedStatus { status, .. } => ErrorKind::from_status(*status),
            Error::InternalError(_) => ErrorKind::Protocol,
            Error::HttpError(error) => match **error {
                ureq::Error::Transport(_) => ErrorKind::Connection,
                ureq::Error::Status(code, _) => StatusCode::from_u16(code)
                    .map(ErrorKind::from_status)
                    .unwrap_or(ErrorKind::Other),
            },
            Error::RustyS3(_) | Error::Url(_) => ErrorKind::InvalidInput,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_authorization_failure(&self) -> bool {
        self.kind() == ErrorKind::Authorization
    }

    pub fn is_connection_failure(&self) -> bool {
        self.kind() == ErrorKind::Connection
    }
}

impl From<S3Error> for Error {
    fn from(error: S3Error) -> Self {
        Error::S3Error(Box::new(error))
    }
}

impl From<ureq::Error> for Error {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(code, response) => {
                let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = match response.into_string() {
                    Ok(body) => body,
                    Err(e) => return Error::InternalError(InternalError::S3ReturnedNonUtf8Payload(e)),
                };
                // Not every S3 implementation sends back an xml error.
                match quick_xml::de::from_str::<S3Error>(&body) {
                    Ok(mut error) => {
                        error.status_code = status;
                        Error::S3Error(Box::new(error))
                    }
                    Err(e) => {
                        log::debug!("Could not parse the S3 error payload: {e}");
                        Error::UnexpectedStatus { status, body }
                    }
                }
            }
            e => Error::HttpError(Box::new(e)),
        }
    }
}

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("S3 returned non utf8 payload, this shouldn't be possible: `{0}`.`")]
    S3ReturnedNonUtf8Payload(std::io::Error),
    #[error("Could not deserialize the listing returned by S3: `{0}`.")]
    BadListPayload(String),
}

#[derive(Debug, Error, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[error("{code}: {message} on {bucket_name:?}")]
pub struct S3Error {
    #[serde(skip)]
    pub status_code: StatusCode,
    #[serde(with = "quick_xml::serde_helpers::text_content")]
    pub code: S3ErrorCode,
    #[serde(default)]
    pub message: String,
    pub bucket_name: Option<String>,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub host_id: String,
}

impl S3Error {
    pub fn kind(&self) -> ErrorKind {
        use S3ErrorCode::*;

        match self.code {
            NoSuchBucket | NoSuchKey => ErrorKind::NotFound,
            AccessDenied | AccountProblem | AllAccessDisabled | ExpiredToken
            | InvalidAccessKeyId | InvalidToken | NotSignedUp | SignatureDoesNotMatch => {
                ErrorKind::Authorization
            }
            _ => ErrorKind::from_status(self.status_code),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum S3ErrorCode {
    AccessDenied,
    AccountProblem,
    AllAccessDisabled,
    AuthorizationHeaderMalformed,
    CredentialsNotSupported,
    ExpiredToken,
    InternalError,
    InvalidAccessKeyId,
    InvalidArgument,
    InvalidBucketName,
    InvalidBucketState,
    InvalidRequest,
    InvalidSecurity,
    InvalidToken,
    InvalidURI,
    MethodNotAllowed,
    MissingSecurityHeader,
    NoSuchBucket,
    NoSuchKey,
    NotImplemented,
    NotSignedUp,
    PermanentRedirect,
    Redirect,
    RequestTimeout,
    RequestTimeTooSkewed,
    SignatureDoesNotMatch,
    ServiceUnavailable,
    SlowDown,
    TemporaryRedirect,
    TokenRefreshRequired,
    /// Any code we don't know about. S3 compatible services are free to add their own.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for S3ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
