use std::env;

fn main() {
    let version = env::var("PETLENS_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "0.0.0".to_string());
    println!("cargo:rustc-env=PETLENS_VERSION={version}");
    println!("cargo:rerun-if-env-changed=PETLENS_VERSION");
}
