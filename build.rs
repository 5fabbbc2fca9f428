use std::process::Command;

/// Short commit hash, with a `-dirty` suffix when the tree has
/// uncommitted changes. None outside a git checkout.
fn git_hash() -> Option<String> {
    let rev = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let hash = String::from_utf8_lossy(&rev.stdout).trim().to_string();

    let dirty = Command::new("git")
        .args(["diff", "--quiet"])
        .status()
        .map(|s| !s.success())
        .unwrap_or(false);

    Some(if dirty { format!("{hash}-dirty") } else { hash })
}

fn main() {
    let hash = git_hash().unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={hash}");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
}
