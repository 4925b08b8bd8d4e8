use std::fmt;

use indexmap::IndexMap;

use crate::value::{CallError, Value};

/// The positional and keyword arguments of one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    keyword: IndexMap<String, Value>,
}

impl Arguments {
    pub fn new(positional: Vec<Value>, keyword: IndexMap<String, Value>) -> Self {
        Self {
            positional,
            keyword,
        }
    }

    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            positional: values.into_iter().collect(),
            keyword: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    pub fn args(&self) -> &[Value] {
        &self.positional
    }

    pub const fn kwargs(&self) -> &IndexMap<String, Value> {
        &self.keyword
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Binds the arguments to the parameters `names` of `function`.
    ///
    /// Positional arguments fill parameters in order, keyword arguments by
    /// name. The first `required` parameters must be bound.
    pub fn bind<const N: usize>(
        &self,
        function: &str,
        names: [&str; N],
        required: usize,
    ) -> Result<[Option<Value>; N], CallError> {
        let mut bound: [Option<Value>; N] = std::array::from_fn(|_| None);

        if self.positional.len() > N {
            return Err(CallError::invalid_arguments(
                function,
                format!(
                    "got {} positional argument(s), want at most {N}",
                    self.positional.len()
                ),
            ));
        }

        for (slot, value) in bound.iter_mut().zip(&self.positional) {
            *slot = Some(value.clone());
        }

        for (name, value) in &self.keyword {
            let Some(index) = names.iter().position(|candidate| *candidate == name.as_str()) else {
                return Err(CallError::invalid_arguments(
                    function,
                    format!("unexpected keyword argument `{name}`"),
                ));
            };

            if bound[index].is_some() {
                return Err(CallError::invalid_arguments(
                    function,
                    format!("got multiple values for parameter `{name}`"),
                ));
            }

            bound[index] = Some(value.clone());
        }

        if let Some(missing) = names
            .iter()
            .zip(&bound)
            .take(required)
            .find_map(|(name, value)| value.is_none().then_some(name))
        {
            return Err(CallError::invalid_arguments(
                function,
                format!("missing argument for `{missing}`"),
            ));
        }

        Ok(bound)
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        let positional = self.positional.iter().map(ToString::to_string);
        let keyword = self
            .keyword
            .iter()
            .map(|(name, value)| format!("{name} = {value}"));
        for (index, argument) in positional.chain(keyword).enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&argument)?;
        }
        f.write_str(")")
    }
}
