use std::io::Write;

use crate::{Bucket, Result};

/// List every key of `bucket_name`, in the order S3 sends them.
///
/// The returned iterator is lazy: the connection parameters are checked
/// immediately but nothing is sent before the first call to `next`.
/// Path style urls are used so plain `http://127.0.0.1:8080` endpoints work.
///
/// # Example
/// ```no_run
/// let keys = s3lister::list_all_keys(
///     "http://127.0.0.1:8080",
///     "irods_user",
///     "irods_password",
///     "iychoi",
/// )?;
/// s3lister::print_keys(std::io::stdout(), keys)?;
/// # Ok::<(), s3lister::Error>(())
/// ```
pub fn list_all_keys(
    endpoint: &str,
    access_key: &str,
    secret_key: &str,
    bucket_name: &str,
) -> Result<impl Iterator<Item = Result<String>>> {
    let bucket = Bucket::builder(endpoint)?
        .key(access_key)
        .secret(secret_key)
        .with_url_path_style(true)
        .bucket(bucket_name)?;
    Ok(bucket.keys())
}

/// Write every key on its own line as soon as it is received.
/// Stops at the first error; returns the number of keys written.
pub fn print_keys(
    mut writer: impl Write,
    keys: impl IntoIterator<Item = Result<String>>,
) -> Result<usize> {
    let mut written = 0;
    for key in keys {
        writeln!(writer, "{}", key?)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}
