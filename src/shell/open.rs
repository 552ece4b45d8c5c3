//! Opening the resume with the platform's default handler.
//!
//! Runs after the terminal is restored, so the handler (and any message it
//! prints) gets a clean screen.

use std::path::Path;
use std::process::{Command, Stdio};

/// Hand `path` to the system opener.  Returns whether one accepted it.
pub fn open_path(path: &Path) -> bool {
    let target = path.display().to_string();

    #[cfg(target_os = "macos")]
    {
        return run_opener("open", &[], &target);
    }

    #[cfg(target_os = "windows")]
    {
        return run_opener("cmd", &["/C", "start", ""], &target);
    }

    #[cfg(target_os = "linux")]
    {
        if run_opener("xdg-open", &[], &target) {
            return true;
        }
        return run_opener("gio", &["open"], &target);
    }

    #[allow(unreachable_code)]
    false
}

/// Tell the user where the resume is when no opener could show it.
pub fn print_exit_payload(path: &Path, opened: bool) {
    if opened {
        println!("Opened {}", path.display());
    } else {
        println!("Resume: {}", path.display());
    }
}

fn run_opener(cmd: &str, args: &[&str], target: &str) -> bool {
    let status = Command::new(cmd)
        .args(args)
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(s) => s.success(),
        Err(e) => {
            tracing::debug!(cmd, "opener unavailable: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_opener_reports_failure() {
        assert!(!run_opener("cosmic-scroll-no-such-opener", &[], "resume.pdf"));
    }
}
