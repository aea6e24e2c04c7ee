// AcousticTypewriter - Build Script
//
// Emits the version string used by the serial banner. ESP-IDF environment
// plumbing only runs when cross-building for the MCU.

use std::process::Command;

fn main() {
    if std::env::var("CARGO_CFG_TARGET_ARCH").as_deref() == Ok("xtensa") {
        embuild::espidf::sysenv::output();
    }

    let version = env!("CARGO_PKG_VERSION");
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!(
        "cargo:rustc-env=VERSION_STRING=AcousticTypewriter v{}-g{}",
        version, git_hash
    );

    println!("cargo:rerun-if-changed=.git/HEAD");
}
