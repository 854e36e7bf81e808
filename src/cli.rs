use anyhow::{Context as _, bail};
use clap::Parser as _;
use tracing::{debug, warn};

use cbuild::{Arg, ArgParser, Mapping, Reader, TypeParser, Value, ValueType, types::token};

use crate::project_path;

pub const PATH_LIST: ValueType = ValueType::new("path-list");

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about)]
pub struct Args {
    /// The build command line: `[PROJECT] [--target NAME] [--os LIST] [--arch LIST]
    /// [--obj-dir DIR] [--bin-dir DIR] [-I DIRS] [-v] [-d] [-c]`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Args {
    pub fn raw_command(&self) -> String {
        self.command.join(" ")
    }
}

/// The build tool's declarations and value types.
pub fn arg_parser() -> anyhow::Result<ArgParser> {
    let mut builder = ArgParser::builder().with_builtin_types();

    builder
        .add_type(TypeParser::new(ValueType::PATH, |_, _, reader| {
            Ok(Value::Path(project_path::fix_from_env(&token(reader)?)?))
        }))
        .add_type(TypeParser::new(PATH_LIST, |parser, arg, reader| {
            let mut paths = Vec::new();
            for item in token(reader)?.split(',').filter(|item| !item.is_empty()) {
                paths.push(parser.parse_value_as(ValueType::PATH, arg, &mut Reader::new(item))?);
            }
            if paths.is_empty() {
                bail!("no paths given");
            }
            Ok(Value::List(paths))
        }));

    builder
        .add_arguments([
            Arg::positional("project", ValueType::PATH),
            Arg::named("target", Some('t'), ValueType::STRING),
            Arg::named("os", Some('o'), ValueType::LIST),
            Arg::named("arch", Some('a'), ValueType::LIST),
            Arg::named("obj-dir", None, ValueType::PATH),
            Arg::named("bin-dir", None, ValueType::PATH),
            Arg::named("include", Some('I'), PATH_LIST),
            Arg::flag("verbose", Some('v')),
            Arg::flag("debug", Some('d')),
            Arg::flag("clean", Some('c')),
        ])
        .context("conflicting argument declarations")?;

    for (name, value_type) in builder.unresolved_types() {
        warn!("argument `{name}` has no parser for type `{value_type}`");
    }

    Ok(builder.build())
}

pub fn parse() -> anyhow::Result<Mapping> {
    let args = Args::parse();
    debug!("arguments parsed: {args:?}");

    let raw = args.raw_command();
    let mapping = arg_parser()?
        .parse(&raw)
        .with_context(|| format!("failed to parse command line `{raw}`"))?;
    debug!("command line resolved: {mapping:?}");
    Ok(mapping)
}
