//! Build script: embeds a `git describe` version as `CXXKIT_VERSION`.
use std::process::Command;

fn main() {
    // A CXXKIT_VERSION from the environment (release builds) wins over the
    // git describe of the local checkout.
    if let Ok(version) = std::env::var("CXXKIT_VERSION") {
        println!("cargo:rustc-env=CXXKIT_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=CXXKIT_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=CXXKIT_VERSION");
}
