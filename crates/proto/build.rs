// Build script for the wire contract
// Compiles proto/version.proto into tonic client and server stubs

fn main() {
    // Use vendored protoc (prebuilt binary, no system cmake/protoc required)
    std::env::set_var(
        "PROTOC",
        protoc_bin_vendored::protoc_bin_path().expect("vendored protoc binary"),
    );

    compile_protos();

    // Rebuild when protobuf files change
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../../proto/");
}

/// Compile protocol buffers for the version service
fn compile_protos() {
    tonic_prost_build::configure()
        .build_server(true) // Server stubs back the integration tests
        .build_client(true)
        .compile_protos(&["../../proto/version.proto"], &["../../proto/"])
        .unwrap_or_else(|e| panic!("Failed to compile protos: {}", e));
}
