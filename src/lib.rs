mod bucket;
mod builder;
mod client;
mod error;
mod list_buckets;
mod list_objects;
mod lister;
#[cfg(test)]
mod test_utils;

pub use bucket::Bucket;
pub use builder::Builder;
pub use client::Client;
pub use error::*;
pub use list_buckets::{BucketInfo, ListBuckets};
pub use list_objects::{ListObjects, Object};
pub use lister::{list_all_keys, print_keys};

pub type Result<T, E = Error> = std::result::Result<T, E>;
