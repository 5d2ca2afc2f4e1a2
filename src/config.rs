//! Fixed vocabulary of the tool: file suffix, managed lines and the agent line
//!
//! Nothing here is mutable. The managed line set is a `'static` slice exposed
//! through [`managed_lines`] so callers never hold a global they could change.

/// Suffix (compared lower-cased) identifying a JVM options file
pub const VMOPTIONS_SUFFIX: &str = ".vmoptions";

/// Prefix shared by every `--add-opens` flag
pub const ADD_OPENS_PREFIX: &str = "--add-opens";

/// Prefix of a Java instrumentation agent declaration
pub const JAVAAGENT_PREFIX: &str = "-javaagent:";

/// File name of the agent jar inside the configuration directory
pub const AGENT_JAR: &str = "ja-netfilter.jar";

/// Mode argument passed to the agent
pub const AGENT_MODE: &str = "jetbrains";

pub(crate) const MANAGED_LINES: [&str; 2] = [
    "--add-opens=java.base/jdk.internal.org.objectweb.asm=ALL-UNNAMED",
    "--add-opens=java.base/jdk.internal.org.objectweb.asm.tree=ALL-UNNAMED",
];

/// The `--add-opens` lines this tool writes, in the order they are appended
pub fn managed_lines() -> &'static [&'static str] {
    &MANAGED_LINES
}

/// Whether `line` (already trimmed) is one of the managed lines
pub fn is_managed_line(line: &str) -> bool {
    MANAGED_LINES.contains(&line)
}

/// Build the agent line for a configuration directory
///
/// The path is concatenated as-is: no separator normalization, no quoting.
///
/// # Example
/// ```
/// use vmoptions_helper::config::agent_line;
///
/// assert_eq!(
///     agent_line("/opt/netfilter"),
///     "-javaagent:/opt/netfilter/ja-netfilter.jar=jetbrains"
/// );
/// ```
pub fn agent_line(config_path: &str) -> String {
    format!("{JAVAAGENT_PREFIX}{config_path}/{AGENT_JAR}={AGENT_MODE}")
}

/// The full block appended by apply: managed lines, then the agent line
pub fn managed_block(config_path: &str) -> Vec<String> {
    MANAGED_LINES
        .iter()
        .map(|line| (*line).to_string())
        .chain(std::iter::once(agent_line(config_path)))
        .collect()
}

/// Platform-specific advice shown alongside permission failures
/// - macOS: app bundles are often root-owned or protected by App Management
/// - Linux: installs under /opt or /usr are usually root-owned
/// - Windows: Program Files requires an elevated prompt
pub fn permission_hint() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "check the file owner (`ls -l`), run with sudo, or grant your terminal \
         App Management / Full Disk Access in System Settings > Privacy & Security"
    }

    #[cfg(target_os = "linux")]
    {
        "check the file owner (`ls -l`), then fix it with `sudo chown $USER <path>` \
         or `chmod u+rw <path>`, or run with sudo"
    }

    #[cfg(target_os = "windows")]
    {
        "run the terminal as Administrator, or clear the read-only attribute \
         in the file's Properties dialog"
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        "check the file owner and permission bits, or retry with elevated privileges"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_managed_lines_are_add_opens() {
        assert_eq!(managed_lines().len(), 2);
        for line in managed_lines() {
            assert!(line.starts_with(ADD_OPENS_PREFIX));
            assert!(is_managed_line(line));
        }
    }

    #[test]
    fn test_is_managed_line_is_exact() {
        assert!(!is_managed_line("--add-opens=java.base/java.lang=ALL-UNNAMED"));
        assert!(!is_managed_line(
            "--add-opens=java.base/jdk.internal.org.objectweb.asm=ALL-UNNAMED "
        ));
    }

    #[test]
    fn test_agent_line_keeps_path_verbatim() {
        assert_eq!(
            agent_line("C:\\Program Files\\cfg"),
            "-javaagent:C:\\Program Files\\cfg/ja-netfilter.jar=jetbrains"
        );
    }

    #[test]
    fn test_managed_block_order() {
        let block = managed_block("/new/config");
        assert_eq!(block.len(), 3);
        assert_eq!(block[0], managed_lines()[0]);
        assert_eq!(block[1], managed_lines()[1]);
        assert_eq!(block[2], "-javaagent:/new/config/ja-netfilter.jar=jetbrains");
    }

    #[test]
    fn test_permission_hint_not_empty() {
        assert!(!permission_hint().is_empty());
    }
}
