//! Declarative command-line argument engine.
//!
//! Declarations ([`Arg`]) and value parsers ([`TypeParser`]) are registered on
//! an [`ArgParserBuilder`], which freezes into an [`ArgParser`]. Each call to
//! [`ArgParser::parse`] walks one raw command string and yields a [`Mapping`]
//! from argument name to typed [`Value`].
//!
//! ```
//! use cbuild::{Arg, ArgParser, Value, ValueType};
//!
//! let mut builder = ArgParser::builder().with_builtin_types();
//! builder
//!     .add_argument(Arg::flag("verbose", Some('v')))?
//!     .add_argument(Arg::named("jobs", Some('j'), ValueType::INT))?
//!     .add_argument(Arg::positional("project", ValueType::PATH))?;
//! let parser = builder.build();
//!
//! let parsed = parser.parse("-vj 4 module.json")?;
//! assert_eq!(parsed["verbose"], Value::Bool(true));
//! assert_eq!(parsed["jobs"], Value::Int(4));
//! # Ok::<(), cbuild::Error>(())
//! ```

pub mod arg;
pub mod error;
pub mod parser;
pub mod reader;
pub mod types;
pub mod value;

pub use crate::{
    arg::{Arg, Position, SwitchHandler},
    error::{ArgRef, Error, Result},
    parser::{ArgParser, ArgParserBuilder},
    reader::Reader,
    types::{ParseFn, TypeParser, ValueType},
    value::{Mapping, Value},
};
