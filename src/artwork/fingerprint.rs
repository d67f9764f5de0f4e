//! Chromaprint fingerprints via the `fpcalc` tool.
//!
//! `fpcalc` ships with Chromaprint (`brew install chromaprint`,
//! `apt install libchromaprint-tools`, `winget install AcoustID.Chromaprint`).
//! A missing binary is a lookup failure, not a fatal error: the fingerprint
//! provider reports it and the run goes on without it.

use std::path::Path;
use std::process::{Command, Output};

use serde::Deserialize;

use super::domain::{AudioFingerprint, LookupError};
use super::traits::Fingerprinter;

/// Places to try, in order. A bare name goes through PATH.
#[cfg(windows)]
const CANDIDATES: &[&str] = &[
    "fpcalc",
    r"C:\Program Files\Chromaprint\fpcalc.exe",
    r"C:\Program Files\MusicBrainz Picard\fpcalc.exe",
];

#[cfg(not(windows))]
const CANDIDATES: &[&str] = &[
    "fpcalc",
    "/usr/bin/fpcalc",
    "/usr/local/bin/fpcalc",
    "/opt/homebrew/bin/fpcalc",
];

/// `fpcalc -json` output
#[derive(Debug, Deserialize)]
struct FpcalcReport {
    duration: f64,
    fingerprint: String,
}

/// The system `fpcalc` binary
#[derive(Debug, Clone, Copy, Default)]
pub struct Fpcalc;

impl Fpcalc {
    /// First candidate that answers `-version`.
    fn locate() -> Option<&'static str> {
        CANDIDATES.iter().copied().find(|candidate| {
            Command::new(candidate)
                .arg("-version")
                .output()
                .is_ok_and(|out| out.status.success())
        })
    }

    fn run(binary: &str, path: &Path) -> Result<Output, LookupError> {
        let output = Command::new(binary)
            .arg("-json")
            .arg(path)
            .output()
            .map_err(|e| LookupError::Fingerprint(format!("cannot run {}: {}", binary, e)))?;

        if output.status.success() {
            Ok(output)
        } else {
            Err(LookupError::Fingerprint(format!(
                "{} exited with {}: {}",
                binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}

impl Fingerprinter for Fpcalc {
    fn fingerprint(&self, path: &Path) -> Result<AudioFingerprint, LookupError> {
        let binary = Self::locate().ok_or_else(|| {
            LookupError::Fingerprint("fpcalc is not installed (Chromaprint)".to_string())
        })?;
        let output = Self::run(binary, path)?;
        parse_report(&String::from_utf8_lossy(&output.stdout))
    }
}

fn parse_report(json: &str) -> Result<AudioFingerprint, LookupError> {
    let report: FpcalcReport = serde_json::from_str(json)
        .map_err(|e| LookupError::Fingerprint(format!("unreadable fpcalc output: {}", e)))?;

    Ok(AudioFingerprint {
        fingerprint: report.fingerprint,
        duration_secs: report.duration.round() as u32,
    })
}
