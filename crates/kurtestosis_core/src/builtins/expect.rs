use std::cmp::Ordering;

use regex::Regex;

use crate::builtins::{EXPECT_MODULE_NAME, message_text};
use crate::reporter::{ErrorSink, ReportedError};
use crate::value::{Arguments, CallError, Callable, Module, Value};

type Assertion = fn(&ErrorSink, &Arguments) -> Result<(), CallError>;

/// The assertion module. A failed assertion is recorded and the script goes on.
pub(super) fn module(sink: &ErrorSink) -> Module {
    let assertions: [(&str, Assertion); 7] = [
        ("eq", eq),
        ("ne", ne),
        ("true", truth),
        ("lt", lt),
        ("contains", contains),
        ("fails", fails),
        ("fail", fail),
    ];

    Module::with_members(
        EXPECT_MODULE_NAME,
        assertions.map(|(name, assertion)| {
            let sink = sink.clone();
            let builtin = Callable::builtin(name, move |arguments| {
                assertion(&sink, arguments)?;
                Ok(Value::None)
            });
            (name, Value::Callable(builtin))
        }),
    )
}

fn required<const N: usize>(
    arguments: &Arguments,
    function: &str,
    names: [&str; N],
) -> Result<[Value; N], CallError> {
    let bound = arguments.bind(function, names, N)?;
    Ok(bound.map(Option::unwrap_or_default))
}

fn eq(sink: &ErrorSink, arguments: &Arguments) -> Result<(), CallError> {
    let [x, y] = required(arguments, "eq", ["x", "y"])?;
    if x != y {
        sink.record(ReportedError::new(format!("{x} != {y}")));
    }
    Ok(())
}

fn ne(sink: &ErrorSink, arguments: &Arguments) -> Result<(), CallError> {
    let [x, y] = required(arguments, "ne", ["x", "y"])?;
    if x == y {
        sink.record(ReportedError::new(format!("{x} == {y}")));
    }
    Ok(())
}

fn truth(sink: &ErrorSink, arguments: &Arguments) -> Result<(), CallError> {
    let [cond, msg] = arguments.bind("true", ["cond", "msg"], 1)?;
    if !cond.unwrap_or_default().truth() {
        let message = msg.map_or_else(|| "assertion failed".to_string(), |msg| message_text(&msg));
        sink.record(ReportedError::new(message));
    }
    Ok(())
}

fn lt(sink: &ErrorSink, arguments: &Arguments) -> Result<(), CallError> {
    let [x, y] = required(arguments, "lt", ["x", "y"])?;
    match x.compare(&y) {
        Some(Ordering::Less) => {}
        Some(_) => sink.record(ReportedError::new(format!("{x} is not less than {y}"))),
        None => {
            return Err(CallError::failed(format!(
                "unsupported comparison: {} < {}",
                x.type_name(),
                y.type_name()
            )));
        }
    }
    Ok(())
}

fn contains(sink: &ErrorSink, arguments: &Arguments) -> Result<(), CallError> {
    let [x, y] = required(arguments, "contains", ["x", "y"])?;
    if !x.contains(&y)? {
        sink.record(ReportedError::new(format!("{x} does not contain {y}")));
    }
    Ok(())
}

fn fails(sink: &ErrorSink, arguments: &Arguments) -> Result<(), CallError> {
    let [f, pattern] = required(arguments, "fails", ["f", "pattern"])?;

    let Value::Callable(f) = f else {
        return Err(CallError::invalid_arguments(
            "fails",
            format!("`f` must be callable, got `{}`", f.type_name()),
        ));
    };

    let Some(pattern) = pattern.as_str() else {
        return Err(CallError::invalid_arguments(
            "fails",
            format!("`pattern` must be a string, got `{}`", pattern.type_name()),
        ));
    };

    let regex = Regex::new(pattern).map_err(|error| {
        CallError::invalid_arguments("fails", format!("invalid pattern `{pattern}`: {error}"))
    })?;

    match f.call(&Arguments::default()) {
        Ok(_) => sink.record(ReportedError::new(format!(
            "evaluation succeeded unexpectedly (want error matching {pattern:?})"
        ))),
        Err(error) => {
            let message = error.to_string();
            if !regex.is_match(&message) {
                sink.record(ReportedError::new(format!(
                    "regular expression ({pattern}) did not match error ({message})"
                )));
            }
        }
    }

    Ok(())
}

fn fail(sink: &ErrorSink, arguments: &Arguments) -> Result<(), CallError> {
    let [msg] = required(arguments, "fail", ["msg"])?;
    sink.record(ReportedError::new(message_text(&msg)));
    Ok(())
}
