use mockito::{Matcher, Server};

use crate::Bucket;

/// A ListObjectsV2 answer containing `keys`, sent as-is.
pub fn listing(keys: &[&str], next_token: Option<&str>) -> String {
    let mut body = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
<Name>iychoi</Name><Prefix></Prefix><MaxKeys>1000</MaxKeys><EncodingType>url</EncodingType>"#,
    );
    body.push_str(&format!("<KeyCount>{}</KeyCount>", keys.len()));
    body.push_str(&format!(
        "<IsTruncated>{}</IsTruncated>",
        next_token.is_some()
    ));
    if let Some(token) = next_token {
        body.push_str(&format!(
            "<NextContinuationToken>{token}</NextContinuationToken>"
        ));
    }
    for (i, key) in keys.iter().enumerate() {
        body.push_str(&format!(
            "<Contents><Key>{key}</Key><LastModified>2023-09-12T10:00:00.000Z</LastModified>\
             <ETag>&quot;d41d8cd98f00b204e9800998ecf8427e&quot;</ETag><Size>{i}</Size>\
             <StorageClass>STANDARD</StorageClass></Contents>"
        ));
    }
    body.push_str("</ListBucketResult>");
    body
}

pub fn bucket_path(name: &str) -> Matcher {
    Matcher::Regex(format!("^/{name}/?$"))
}

pub fn bucket(server: &Server, name: &str) -> Bucket {
    Bucket::builder(server.url())
        .unwrap()
        .key("irods_user")
        .secret("irods_password")
        .with_url_path_style(true)
        .bucket(name)
        .unwrap()
}
