// Minimal integration test that drives the compiled binary through a PTY.
// This exercises the real event loop and crossterm input handling across
// the main boundaries without relying on internal modules.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Marked Unix-only and ignored by default to avoid CI/platform issues.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn configuration_screen_boots_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    // Resolve path to compiled binary (debug build during tests)
    let bin = assert_cmd::cargo::cargo_bin("kraft");
    let cmd = format!("{} --sets 1 --mute", bin.display());

    // Spawn the TUI inside a pseudo terminal
    let mut p = spawn(cmd)?;

    // Give the app a moment to initialize the terminal/alternate screen
    std::thread::sleep(Duration::from_millis(200));

    // Bump the set count once, then quit from the configuration screen
    p.send("k")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?; // ESC

    // Wait for the program to terminate cleanly
    p.expect(Eof)?;
    Ok(())
}

#[test]
#[ignore]
fn training_starts_pauses_and_aborts() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("kraft");
    let cmd = format!("{} --sets 1 --mute", bin.display());

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    // Start training, pause, abort back to configuration, quit
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(300));
    p.send(" ")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("a")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?; // ESC

    p.expect(Eof)?;
    Ok(())
}
