fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Fall back to the bundled protoc when none is configured
    if std::env::var_os("PROTOC").is_none() {
        let protoc = protoc_bin_vendored::protoc_bin_path().map_err(|e| format!("{:?}", e))?;
        std::env::set_var("PROTOC", protoc);
    }

    // Compile user service proto
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/user.proto"], &["proto/"])?;

    println!("cargo:rerun-if-changed=proto/user.proto");
    Ok(())
}
