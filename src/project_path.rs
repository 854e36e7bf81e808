use std::path::PathBuf;

use anyhow::{Context as _, bail};
use tracing::trace;

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Normalizes separators to `/` and expands `%NAME%` segments through
/// `lookup`.
pub fn fix(raw: &str, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<PathBuf> {
    if raw.is_empty() {
        bail!("empty path");
    }

    let segments = raw
        .split(is_separator)
        .map(|segment| match segment.strip_prefix('%').and_then(|s| s.strip_suffix('%')) {
            Some(var) if !var.is_empty() => {
                lookup(var).with_context(|| format!("environment variable `{var}` is not set"))
            }
            _ => Ok(segment.to_string()),
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let fixed = segments.join("/");
    trace!("path fixed: {raw} -> {fixed}");
    Ok(PathBuf::from(fixed))
}

pub fn fix_from_env(raw: &str) -> anyhow::Result<PathBuf> {
    fix(raw, |var| std::env::var(var).ok())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::fix;

    fn lookup(var: &str) -> Option<String> {
        (var == "SDK").then(|| "/opt/sdk".to_string())
    }

    #[test]
    fn normalizes_separators() {
        assert_eq!(fix(r"src\platform/win", lookup).unwrap(), Path::new("src/platform/win"));
        assert_eq!(fix("build/", lookup).unwrap(), Path::new("build/"));
    }

    #[test]
    fn expands_variable_segments() {
        assert_eq!(fix(r"%SDK%\include", lookup).unwrap(), Path::new("/opt/sdk/include"));
        assert_eq!(fix("a/%%/b", lookup).unwrap(), Path::new("a/%%/b"));
    }

    #[test]
    fn unset_variable_is_an_error() {
        let error = fix("%HOME_SDK%/lib", lookup).unwrap_err();
        assert!(error.to_string().contains("HOME_SDK"));
    }
}
