use std::{collections::HashMap, fmt, path::PathBuf, sync::Arc};

use anyhow::{Context as _, bail};

use crate::{
    arg::Arg,
    error::{Error, Result},
    parser::ArgParser,
    reader::Reader,
    value::Value,
};

/// Symbolic tag naming a value parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueType(&'static str);

impl ValueType {
    pub const STRING: Self = Self("string");
    pub const INT: Self = Self("int");
    pub const FLOAT: Self = Self("float");
    pub const BOOL: Self = Self("bool");
    pub const PATH: Self = Self("path");
    pub const LIST: Self = Self("list");

    pub const fn new(tag: &'static str) -> Self {
        Self(tag)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Reads one value of a type from the cursor.
///
/// The parser is handed the frozen engine so it can delegate nested values to
/// other registered types.
pub type ParseFn = Arc<dyn Fn(&ArgParser, &Arg, &mut Reader) -> anyhow::Result<Value> + Send + Sync>;

#[derive(Clone)]
pub struct TypeParser {
    value_type: ValueType,
    func: ParseFn,
}

impl TypeParser {
    pub fn new(
        value_type: ValueType,
        func: impl Fn(&ArgParser, &Arg, &mut Reader) -> anyhow::Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            value_type,
            func: Arc::new(func),
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn parse(&self, parser: &ArgParser, arg: &Arg, reader: &mut Reader) -> anyhow::Result<Value> {
        (self.func)(parser, arg, reader)
    }

    /// Every parser the engine ships with.
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::new(ValueType::STRING, |_, _, reader| Ok(Value::Str(token(reader)?))),
            Self::new(ValueType::INT, parse_int),
            Self::new(ValueType::FLOAT, parse_float),
            Self::new(ValueType::BOOL, parse_bool),
            Self::new(ValueType::PATH, |_, _, reader| {
                Ok(Value::Path(PathBuf::from(token(reader)?)))
            }),
            Self::new(ValueType::LIST, parse_list),
        ]
    }
}

impl fmt::Debug for TypeParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeParser").field(&self.value_type).finish()
    }
}

/// Value parsers keyed by tag; registering a tag again replaces it.
#[derive(Debug, Clone, Default)]
pub(crate) struct TypeRegistry(HashMap<ValueType, TypeParser>);

impl TypeRegistry {
    pub(crate) fn register(&mut self, parser: TypeParser) {
        self.0.insert(parser.value_type, parser);
    }

    pub(crate) fn resolve(&self, value_type: ValueType) -> Result<&TypeParser> {
        self.0
            .get(&value_type)
            .ok_or(Error::UnrecognizedType(value_type))
    }

    pub(crate) fn contains(&self, value_type: ValueType) -> bool {
        self.0.contains_key(&value_type)
    }
}

/// Reads the next whitespace-delimited token, failing when there is none.
pub fn token(reader: &mut Reader) -> anyhow::Result<String> {
    let token = reader.token();
    if token.is_empty() {
        bail!("missing value");
    }
    Ok(token)
}

fn parse_int(_: &ArgParser, _: &Arg, reader: &mut Reader) -> anyhow::Result<Value> {
    let token = token(reader)?;
    let int = token
        .parse()
        .with_context(|| format!("`{token}` is not an integer"))?;
    Ok(Value::Int(int))
}

fn parse_float(_: &ArgParser, _: &Arg, reader: &mut Reader) -> anyhow::Result<Value> {
    let token = token(reader)?;
    let float = token
        .parse()
        .with_context(|| format!("`{token}` is not a number"))?;
    Ok(Value::Float(float))
}

fn parse_bool(_: &ArgParser, _: &Arg, reader: &mut Reader) -> anyhow::Result<Value> {
    let token = token(reader)?;
    let b = match token.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => true,
        "false" | "no" | "off" | "0" => false,
        _ => bail!("`{token}` is not a boolean"),
    };
    Ok(Value::Bool(b))
}

fn parse_list(_: &ArgParser, _: &Arg, reader: &mut Reader) -> anyhow::Result<Value> {
    let items = token(reader)?
        .split(',')
        .filter(|item| !item.is_empty())
        .map(Value::from)
        .collect();
    Ok(Value::List(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ArgParserBuilder;

    fn parse_as(value_type: ValueType, input: &str) -> anyhow::Result<Value> {
        let parser = ArgParserBuilder::new().with_builtin_types().build();
        let arg = Arg::named("subject", None, value_type);
        let mut reader = Reader::new(input);
        let value = parser.parse_value(&arg, &mut reader)?;
        Ok(value)
    }

    #[test]
    fn builtin_parsers_read_a_single_token() {
        assert_eq!(parse_as(ValueType::STRING, "abc def").unwrap(), Value::from("abc"));
        assert_eq!(parse_as(ValueType::INT, "-42").unwrap(), Value::Int(-42));
        assert_eq!(parse_as(ValueType::FLOAT, "2.5").unwrap(), Value::Float(2.5));
        assert_eq!(parse_as(ValueType::BOOL, "Off").unwrap(), Value::Bool(false));
        assert_eq!(
            parse_as(ValueType::PATH, "src/main.c").unwrap(),
            Value::Path(PathBuf::from("src/main.c"))
        );
        assert_eq!(
            parse_as(ValueType::LIST, "x64,,x86").unwrap(),
            Value::List(vec![Value::from("x64"), Value::from("x86")])
        );
    }

    #[test]
    fn builtin_parsers_reject_bad_or_missing_tokens() {
        assert!(parse_as(ValueType::INT, "twelve").is_err());
        assert!(parse_as(ValueType::BOOL, "maybe").is_err());
        assert!(parse_as(ValueType::STRING, "").is_err());
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut registry = TypeRegistry::default();
        registry.register(TypeParser::new(ValueType::INT, |_, _, _| Ok(Value::Int(1))));
        registry.register(TypeParser::new(ValueType::INT, |_, _, _| Ok(Value::Int(2))));

        let parser = ArgParserBuilder::new().build();
        let arg = Arg::named("n", None, ValueType::INT);
        let value = registry
            .resolve(ValueType::INT)
            .unwrap()
            .parse(&parser, &arg, &mut Reader::new(""))
            .unwrap();
        assert_eq!(value, Value::Int(2));
        assert!(matches!(
            registry.resolve(ValueType::new("nope")),
            Err(Error::UnrecognizedType(_))
        ));
    }
}
