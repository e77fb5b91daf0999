use anyhow::{Context, Result};

/// Clears the terminal the same way a shell user would: `cls` on Windows,
/// `clear` everywhere else.
pub fn clear_screen() -> Result<()> {
    let mut command = if cfg!(windows) {
        let mut cmd = std::process::Command::new("cmd");
        cmd.args(["/C", "cls"]);
        cmd
    } else {
        std::process::Command::new("clear")
    };
    let status = command
        .status()
        .context("clear-screen command failed to start")?;
    if !status.success() {
        tracing::warn!(target: "battle_cli", ?status, "clear-screen command exited with an error");
    }
    Ok(())
}
