//! Java runtime checks

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::EngineError;

/// Minimum JDK major version ENHSP runs on
pub const JDK_REQUIRED: u32 = 17;

/// Extract the major version from `java --version` / `java -version` output
///
/// Handles both `openjdk 17.0.2 2022-01-18` and the legacy
/// `java version "1.8.0_292"` forms. JVM notices such as
/// `Picked up JAVA_TOOL_OPTIONS: ...` may precede the version line.
pub fn parse_major_version(output: &str) -> Option<u32> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty() && !l.contains("Picked up"))
        .find_map(parse_version_line)
}

fn parse_version_line(line: &str) -> Option<u32> {
    let token = line
        .split_whitespace()
        .map(|t| t.trim_matches('"'))
        .find(|t| t.chars().next().is_some_and(|c| c.is_ascii_digit()))?;

    let mut parts = token.split(['.', '_', '-', '+']);
    let major: u32 = parts.next()?.parse().ok()?;
    if major == 1 {
        // 1.8 -> 8
        return parts.next()?.parse().ok();
    }
    Some(major)
}

/// Ask `java` for its major version
pub async fn java_major_version(java: &str) -> Result<u32, EngineError> {
    debug!(%java, "java_major_version: called");
    let output = Command::new(java)
        .arg("-version")
        .output()
        .await
        .map_err(|source| EngineError::Spawn {
            program: java.to_string(),
            source,
        })?;

    // `-version` prints to stderr on every JDK
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stderr),
        String::from_utf8_lossy(&output.stdout)
    );
    parse_major_version(&text).ok_or_else(|| EngineError::JavaVersion(text.trim().to_string()))
}

/// Fail unless `java` is at least [`JDK_REQUIRED`]
pub async fn check_jdk(java: &str) -> Result<u32, EngineError> {
    let found = java_major_version(java).await?;
    if found < JDK_REQUIRED {
        return Err(EngineError::JavaTooOld {
            found,
            required: JDK_REQUIRED,
        });
    }
    info!(found, "Java runtime ok");
    Ok(found)
}
