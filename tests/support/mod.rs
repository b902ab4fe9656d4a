use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn helper_binary(name: &str) -> PathBuf {
    let path = match name {
        "realm-build" => env!("CARGO_BIN_EXE_realm-build"),
        "realm-nav" => env!("CARGO_BIN_EXE_realm-nav"),
        other => panic!("unknown helper binary {other}"),
    };
    PathBuf::from(path)
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture parent");
    }
    fs::write(path, contents).expect("write fixture file");
}

pub const ENEMY_AI: &str = "\
Title:
Enemy AI Behavioral System

Description:
A gameplay intelligence stack for Unreal Engine.

Project Metrics:
- Team:
10 Developers

Body 1: <Title: Perception><Asset: sight.png>
Agents sample sight cones every frame.

Tools used:
Unreal Engine, C++

Models:
models/drone.glb
";

pub const FINANCE: &str = "\
Title:
Finance Wizard Mobile Port

Body 1: <Title: Port><Asset: walkthrough.mp4, budget.csv>
Rebuilt the lessons in SwiftUI.
";

pub const PROFILE: &str = "\
Bio:
I build games and tools.
Skills:
Rust, C++
Unreal
ProfileImage:
me.jpg
";

/// A small site: three projects, an order sidecar, assets, and a profile.
pub fn site_fixture() -> TempDir {
    let temp = TempDir::new().expect("temp site");
    let root = temp.path();
    write_file(&root.join("projects/enemy-ai.txt"), ENEMY_AI);
    write_file(&root.join("projects/finance-wizard.txt"), FINANCE);
    write_file(&root.join("projects/asl-translator.txt"), "Random notes only.\n");
    write_file(&root.join("projects/order.txt"), "finance-wizard\nghost\n");
    write_file(&root.join("assets/enemy-ai/sight.png"), "png");
    write_file(&root.join("assets/enemy-ai/b-roll.mp4"), "mp4");
    write_file(
        &root.join("assets/enemy-ai/links.txt"),
        "Trailer: https://video.example.com/enemy\nhttps://www.github.com/me/enemy-ai\n",
    );
    write_file(&root.join("assets/finance-wizard/budget.csv"), "a,b\n1,2\n");
    write_file(&root.join("about/profile.txt"), PROFILE);
    temp
}
