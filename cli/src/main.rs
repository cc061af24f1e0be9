use std::io::stdout;

use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use s3lister::{Client, ErrorKind};

pub fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(
            anstyle::Style::new()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow)))
                .bold(),
        )
        .header(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .literal(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
}

#[derive(Debug, Parser)]
#[clap(about = "Print the key of every object in an S3 bucket, one per line")]
#[command(styles = get_styles())]
struct Options {
    /// The addr of the s3 server.
    #[clap(long, short, default_value_t = String::from("http://127.0.0.1:8080"))]
    pub addr: String,

    /// The bucket to list.
    #[clap(long, short, default_value_t = String::from("iychoi"))]
    pub bucket: String,

    /// The region used to sign the requests.
    #[clap(long, default_value_t = String::from("us-east-1"))]
    pub region: String,

    #[clap(flatten)]
    pub cred: Credential,

    /// The style of the url.
    /// Do you want your url to be: `http://bucket.url.com/`
    /// or `http://url.com/bucket/`.
    /// Notice that ip addresses and localhost don't work with the virtual host style.
    #[clap(long, default_value_t = false)]
    pub virtual_host_style: bool,

    /// Only list the keys starting with this prefix.
    #[clap(long, short)]
    pub prefix: Option<String>,

    /// Print the name of every bucket owned by the credentials instead of listing a bucket.
    #[clap(long, default_value_t = false)]
    pub buckets: bool,

    /// Maximum number of keys asked to S3 per request.
    #[clap(long)]
    pub page_size: Option<usize>,

    /// The verbosity, the more `v` you use and the more verbose it gets.
    #[clap(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Parser)]
struct Credential {
    /// Access key.
    #[clap(default_value_t = String::from("irods_user"), long)]
    pub key: String,

    /// Secret key.
    #[clap(default_value_t = String::from("irods_password"), long)]
    pub secret: String,

    /// Security token
    #[clap(long)]
    pub token: Option<String>,
}

fn main() -> Result<()> {
    let opt = Options::parse();
    let mut log_builder = env_logger::Builder::new();
    let log_level = ["warn", "info", "debug", "trace"];
    log_builder.parse_filters(log_level[(opt.verbose as usize).min(log_level.len() - 1)]);
    log_builder.init();

    let client = Client::builder(&opt.addr)
        .into_diagnostic()
        .wrap_err_with(|| format!("`{}` is not a valid address", opt.addr))?
        .key(opt.cred.key)
        .secret(opt.cred.secret)
        .maybe_token(opt.cred.token)
        .region(opt.region)
        .with_url_path_style(!opt.virtual_host_style)
        .client();

    if opt.buckets {
        let buckets = match client.list_buckets() {
            Ok(buckets) => buckets,
            Err(e) => return report(e, &opt.addr, None),
        };
        let names = buckets.into_iter().map(|bucket| Ok(bucket.name));
        s3lister::print_keys(stdout().lock(), names).into_diagnostic()?;
        return Ok(());
    }

    let bucket = client.bucket(&opt.bucket).into_diagnostic()?;

    let mut objects = bucket.list_objects();
    if let Some(mut prefix) = opt.prefix {
        sanitize_path(&mut prefix);
        objects = objects.prefix(prefix);
    }
    if let Some(page_size) = opt.page_size {
        objects = objects.page_size(page_size);
    }

    let keys = objects.map(|object| object.map(|object| object.key));
    match s3lister::print_keys(stdout().lock(), keys) {
        Ok(count) => {
            log::info!("Listed {count} objects from `{}`", opt.bucket);
            Ok(())
        }
        Err(e) => report(e, &opt.addr, Some(&opt.bucket)),
    }
}

fn report(error: s3lister::Error, addr: &str, bucket: Option<&str>) -> Result<()> {
    let context = match (error.kind(), bucket) {
        (ErrorKind::Connection, _) => format!("Could not reach `{addr}`"),
        (ErrorKind::Authorization, _) => format!("The credentials were rejected by `{addr}`"),
        (ErrorKind::NotFound, Some(bucket)) => format!("Bucket `{bucket}` does not exist"),
        (_, Some(bucket)) => format!("Could not list bucket `{bucket}`"),
        (_, None) => String::from("Could not list the buckets"),
    };
    Err(error).into_diagnostic().wrap_err(context)
}

fn sanitize_path(path: &mut String) {
    if path.starts_with('/') {
        log::warn!("Invalid prefix, trimming the `/` at the start of your prefix");
        *path = path.trim_start_matches('/').to_string();
    }
}
