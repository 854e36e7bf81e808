use std::{collections::HashMap, sync::Arc};

use crate::{
    arg::Arg,
    error::{ArgRef, Error, Result},
    reader::Reader,
    types::{TypeParser, TypeRegistry, ValueType},
    value::{Mapping, Value},
};

/// Collects declarations and value parsers, then freezes into an [`ArgParser`].
#[derive(Debug, Default)]
pub struct ArgParserBuilder {
    by_name: HashMap<String, Arc<Arg>>,
    by_char: HashMap<char, Arc<Arg>>,
    positional: Vec<Arc<Arg>>,
    types: TypeRegistry,
}

impl ArgParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_types(mut self) -> Self {
        for parser in TypeParser::builtin() {
            self.types.register(parser);
        }
        self
    }

    pub fn add_type(&mut self, parser: TypeParser) -> &mut Self {
        self.types.register(parser);
        self
    }

    pub fn add_argument(&mut self, arg: Arg) -> Result<&mut Self> {
        if self.by_name.contains_key(arg.name()) {
            return Err(Error::DuplicateName(arg.name().to_string()));
        }
        if let Some(c) = arg.short().filter(|c| self.by_char.contains_key(c)) {
            return Err(Error::DuplicateChar(c));
        }

        let arg = Arc::new(arg);
        self.by_name.insert(arg.name().to_string(), Arc::clone(&arg));
        if let Some(c) = arg.short() {
            self.by_char.insert(c, Arc::clone(&arg));
        }
        if let Some(position) = arg.position() {
            let index = position.insertion_index(self.positional.len());
            self.positional.insert(index, arg);
        }
        Ok(self)
    }

    pub fn add_arguments(&mut self, args: impl IntoIterator<Item = Arg>) -> Result<&mut Self> {
        for arg in args {
            self.add_argument(arg)?;
        }
        Ok(self)
    }

    /// Declarations whose value type has no registered parser yet.
    pub fn unresolved_types(&self) -> impl Iterator<Item = (&str, ValueType)> {
        self.by_name
            .values()
            .filter(|arg| !self.types.contains(arg.value_type()))
            .map(|arg| (arg.name(), arg.value_type()))
    }

    pub fn build(self) -> ArgParser {
        ArgParser {
            by_name: self.by_name,
            by_char: self.by_char,
            positional: self.positional,
            types: self.types,
        }
    }
}

/// A frozen argument engine. Registration happens on [`ArgParserBuilder`];
/// nothing here mutates, so one instance may serve concurrent parses.
#[derive(Debug)]
pub struct ArgParser {
    by_name: HashMap<String, Arc<Arg>>,
    by_char: HashMap<char, Arc<Arg>>,
    positional: Vec<Arc<Arg>>,
    types: TypeRegistry,
}

impl ArgParser {
    pub fn builder() -> ArgParserBuilder {
        ArgParserBuilder::new()
    }

    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.by_name.get(name).map(Arc::as_ref)
    }

    pub fn get_short(&self, c: char) -> Option<&Arg> {
        self.by_char.get(&c).map(Arc::as_ref)
    }

    pub fn positional(&self) -> impl Iterator<Item = &Arg> {
        self.positional.iter().map(Arc::as_ref)
    }

    pub fn parse(&self, input: &str) -> Result<Mapping> {
        self.parse_into(input, Mapping::new())
    }

    /// Resolves `input` into `out`, returning the extended mapping.
    ///
    /// The first error aborts the parse and drops the mapping.
    pub fn parse_into(&self, input: &str, mut out: Mapping) -> Result<Mapping> {
        let mut reader = Reader::new(input);
        let mut next_positional = 0;

        loop {
            reader.skip_while(char::is_whitespace);
            let Some(c) = reader.current() else { break };

            if c != '-' {
                next_positional = self.parse_positional(&mut reader, next_positional, &mut out)?;
            } else if reader.peek(1) == Some('-') {
                reader.advance(2);
                self.parse_long(&mut reader, &mut out)?;
            } else {
                reader.advance(1);
                self.parse_short_chain(&mut reader, &mut out)?;
            }
        }

        Ok(out)
    }

    fn parse_long(&self, reader: &mut Reader, out: &mut Mapping) -> Result<()> {
        let name = reader.consume_while(|c| c != '=' && !c.is_whitespace());
        let arg = self
            .by_name
            .get(&name)
            .ok_or(Error::UnknownArgument(ArgRef::Name(name)))?;

        let explicit = reader.current() == Some('=');
        let switched = if explicit { None } else { arg.invoke_switch() };
        let value = match switched {
            Some(value) => value,
            None => {
                if explicit {
                    reader.advance(1);
                } else {
                    reader.skip_while(char::is_whitespace);
                }
                self.parse_value(arg, reader)?
            }
        };

        out.insert(arg.name().to_string(), value);
        Ok(())
    }

    fn parse_short_chain(&self, reader: &mut Reader, out: &mut Mapping) -> Result<()> {
        while let Some(c) = reader.current().filter(|c| !c.is_whitespace()) {
            let arg = self
                .by_char
                .get(&c)
                .ok_or(Error::UnknownArgument(ArgRef::Char(c)))?;

            reader.advance(1);
            if let Some(value) = arg.invoke_switch() {
                out.insert(arg.name().to_string(), value);
                continue;
            }

            // a value-taking alias ends its cluster
            if reader.at_token_end() {
                reader.skip_while(char::is_whitespace);
            }
            let value = self.parse_value(arg, reader)?;
            out.insert(arg.name().to_string(), value);
            break;
        }
        Ok(())
    }

    fn parse_positional(&self, reader: &mut Reader, index: usize, out: &mut Mapping) -> Result<usize> {
        let Some(arg) = self.positional.get(index) else {
            return Err(Error::PositionalOverflow {
                token: reader.token(),
                declared: self.positional.len(),
            });
        };

        let start = reader.position();
        let value = self.parse_value(arg, reader)?;
        if reader.position() == start {
            return Err(Error::ArgumentValue {
                name: arg.name().to_string(),
                source: "value parser consumed no input".into(),
            });
        }

        out.insert(arg.name().to_string(), value);
        Ok(index + 1)
    }

    /// Reads `arg`'s value with the parser registered for its type.
    pub fn parse_value(&self, arg: &Arg, reader: &mut Reader) -> Result<Value> {
        self.parse_value_as(arg.value_type(), arg, reader)
    }

    /// Reads a value for `arg` with the parser of `value_type`, which need not
    /// be `arg`'s own. Value parsers use this for nested values.
    pub fn parse_value_as(&self, value_type: ValueType, arg: &Arg, reader: &mut Reader) -> Result<Value> {
        self.types
            .resolve(value_type)?
            .parse(self, arg, reader)
            .map_err(|e| Error::ArgumentValue {
                name: arg.name().to_string(),
                source: e.into(),
            })
    }
}
