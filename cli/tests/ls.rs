use assert_cmd::Command;
use mockito::{Matcher, Server};

fn listing(keys: &[&str]) -> String {
    let mut body = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
<Name>iychoi</Name><Prefix></Prefix><MaxKeys>1000</MaxKeys><IsTruncated>false</IsTruncated>"#,
    );
    for key in keys {
        body.push_str(&format!(
            "<Contents><Key>{key}</Key><LastModified>2023-09-12T10:00:00.000Z</LastModified>\
             <ETag>&quot;d41d8cd98f00b204e9800998ecf8427e&quot;</ETag><Size>0</Size>\
             <StorageClass>STANDARD</StorageClass></Contents>"
        ));
    }
    body.push_str("</ListBucketResult>");
    body
}

fn s3ls(server: &Server) -> Command {
    let mut cmd = Command::cargo_bin("s3ls").unwrap();
    cmd.arg("--addr").arg(server.url());
    cmd
}

#[test]
fn print_every_key() {
    let mut server = Server::new();
    server
        .mock("GET", Matcher::Regex("^/iychoi/?$".into()))
        .match_query(Matcher::UrlEncoded("list-type".into(), "2".into()))
        .with_status(200)
        .with_body(listing(&["a.txt", "dir/b.txt"]))
        .create();

    s3ls(&server)
        .assert()
        .success()
        .stdout("a.txt\ndir/b.txt\n");
}

#[test]
fn empty_bucket() {
    let mut server = Server::new();
    server
        .mock("GET", Matcher::Regex("^/empty/?$".into()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(listing(&[]))
        .create();

    s3ls(&server)
        .args(["--bucket", "empty"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn leading_slash_of_the_prefix_is_trimmed() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", Matcher::Regex("^/iychoi/?$".into()))
        .match_query(Matcher::UrlEncoded("prefix".into(), "dir/".into()))
        .with_status(200)
        .with_body(listing(&["dir/b.txt"]))
        .create();

    s3ls(&server)
        .args(["--prefix", "/dir/"])
        .assert()
        .success()
        .stdout("dir/b.txt\n");
    mock.assert();
}

#[test]
fn missing_bucket_fails_without_output() {
    let mut server = Server::new();
    server
        .mock("GET", Matcher::Regex("^/nope/?$".into()))
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("<Error><Code>NoSuchBucket</Code><BucketName>nope</BucketName></Error>")
        .create();

    s3ls(&server)
        .args(["--bucket", "nope"])
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn rejected_credentials_fail_without_output() {
    let mut server = Server::new();
    server
        .mock("GET", Matcher::Regex("^/iychoi/?$".into()))
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body("<Error><Code>InvalidAccessKeyId</Code></Error>")
        .create();

    s3ls(&server)
        .args(["--key", "nobody"])
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn print_every_bucket() {
    let mut server = Server::new();
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            "<ListAllMyBucketsResult><Buckets>\
             <Bucket><Name>iychoi</Name><CreationDate>2023-09-12T10:00:00Z</CreationDate></Bucket>\
             <Bucket><Name>shared</Name><CreationDate>2023-09-13T10:00:00Z</CreationDate></Bucket>\
             </Buckets></ListAllMyBucketsResult>",
        )
        .create();

    s3ls(&server)
        .arg("--buckets")
        .assert()
        .success()
        .stdout("iychoi\nshared\n");
}

#[test]
fn encoded_keys_are_printed_decoded() {
    let mut server = Server::new();
    server
        .mock("GET", Matcher::Regex("^/iychoi/?$".into()))
        .match_query(Matcher::UrlEncoded("encoding-type".into(), "url".into()))
        .with_status(200)
        .with_body(listing(&["my%20file.txt", "caf%C3%A9.txt"]))
        .create();

    s3ls(&server)
        .assert()
        .success()
        .stdout("my file.txt\ncafé.txt\n");
}
