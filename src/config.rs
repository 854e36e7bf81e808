use std::path::PathBuf;

use anyhow::{Context as _, bail};
use cbuild::{Mapping, Value};
use serde::Serialize;
use tracing::info;

pub const DEFAULT_PROJECT_FILE: &str = "module.json";
pub const DEFAULT_OS_NAMES: [&str; 3] = ["win", "linux", "mac"];
pub const DEFAULT_ARCHITECTURES: [&str; 2] = ["x64", "x86"];

/// What a build invocation asked for, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildConfig {
    pub project_file: PathBuf,
    pub target: Option<String>,
    pub os_names: Vec<String>,
    pub architectures: Vec<String>,
    pub obj_dir: Option<PathBuf>,
    pub bin_dir: Option<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub verbose: bool,
    pub debug: bool,
    pub clean: bool,
}

impl BuildConfig {
    pub fn obtain() -> anyhow::Result<Self> {
        let mapping = crate::cli::parse()?;
        let config = Self::resolve(&mapping)?;
        info!("build configuration resolved for {}", config.project_file.display());
        Ok(config)
    }

    pub fn resolve(mapping: &Mapping) -> anyhow::Result<Self> {
        let get = |name: &str| mapping.get(name);

        Ok(Self {
            project_file: get("project")
                .map(|v| expect_path(v, "project"))
                .transpose()?
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_FILE)),
            target: get("target")
                .map(|v| v.as_str().map(str::to_string).context("`target` is not a string"))
                .transpose()?,
            os_names: get("os")
                .map(|v| strings(v, "os"))
                .transpose()?
                .unwrap_or_else(|| DEFAULT_OS_NAMES.map(String::from).to_vec()),
            architectures: get("arch")
                .map(|v| strings(v, "arch"))
                .transpose()?
                .unwrap_or_else(|| DEFAULT_ARCHITECTURES.map(String::from).to_vec()),
            obj_dir: get("obj-dir").map(|v| expect_path(v, "obj-dir")).transpose()?,
            bin_dir: get("bin-dir").map(|v| expect_path(v, "bin-dir")).transpose()?,
            include_dirs: match get("include") {
                Some(Value::List(items)) => items
                    .iter()
                    .map(|item| expect_path(item, "include"))
                    .collect::<anyhow::Result<_>>()?,
                Some(other) => bail!("`include` is not a path list: {other:?}"),
                None => Vec::new(),
            },
            verbose: flag(mapping, "verbose")?,
            debug: flag(mapping, "debug")?,
            clean: flag(mapping, "clean")?,
        })
    }
}

fn expect_path(value: &Value, name: &str) -> anyhow::Result<PathBuf> {
    value
        .as_path()
        .map(PathBuf::from)
        .with_context(|| format!("`{name}` is not a path: {value:?}"))
}

fn strings(value: &Value, name: &str) -> anyhow::Result<Vec<String>> {
    let items = value
        .as_list()
        .with_context(|| format!("`{name}` is not a list: {value:?}"))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .with_context(|| format!("`{name}` has a non-string item: {item:?}"))
        })
        .collect()
}

fn flag(mapping: &Mapping, name: &str) -> anyhow::Result<bool> {
    match mapping.get(name) {
        None => Ok(false),
        Some(value) => value
            .as_bool()
            .with_context(|| format!("`{name}` is not a boolean: {value:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_arguments_take_defaults() {
        let config = BuildConfig::resolve(&Mapping::new()).unwrap();
        assert_eq!(config.project_file, PathBuf::from("module.json"));
        assert_eq!(config.os_names, ["win", "linux", "mac"]);
        assert_eq!(config.architectures, ["x64", "x86"]);
        assert_eq!(config.target, None);
        assert!(config.include_dirs.is_empty());
        assert!(!config.verbose && !config.debug && !config.clean);
    }

    #[test]
    fn parsed_command_line_overrides_defaults() {
        let mapping = crate::cli::arg_parser()
            .unwrap()
            .parse("app/module.json -vc --arch=x64 -t core --bin-dir out/bin --debug=no")
            .unwrap();
        let config = BuildConfig::resolve(&mapping).unwrap();

        assert_eq!(config.project_file, PathBuf::from("app/module.json"));
        assert_eq!(config.architectures, ["x64"]);
        assert_eq!(config.os_names, ["win", "linux", "mac"]);
        assert_eq!(config.target.as_deref(), Some("core"));
        assert_eq!(config.bin_dir, Some(PathBuf::from("out/bin")));
        assert!(config.verbose && config.clean && !config.debug);
    }

    #[test]
    fn mistyped_value_is_reported() {
        let mapping: Mapping = [("verbose", Value::from("yes"))].into_iter().collect();
        let error = BuildConfig::resolve(&mapping).unwrap_err();
        assert!(error.to_string().contains("verbose"));
    }
}
