fn main() -> Result<(), s3lister::Error> {
    let keys = s3lister::list_all_keys(
        "http://127.0.0.1:8080",
        "irods_user",
        "irods_password",
        "iychoi",
    )?;
    for key in keys {
        println!("{}", key?);
    }
    Ok(())
}
