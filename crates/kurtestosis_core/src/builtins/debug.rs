use crate::builtins::{DEBUG_BUILTIN_NAME, message_text};
use crate::value::{Callable, Value};

/// `debug(value, message?)`: logs the value, prefixed by the test function.
pub(super) fn builtin(locator: String) -> Callable {
    Callable::builtin(DEBUG_BUILTIN_NAME, move |arguments| {
        let [value, message] = arguments.bind(DEBUG_BUILTIN_NAME, ["value", "message"], 1)?;
        let value = value.unwrap_or_default();

        match message.map(|message| message_text(&message)) {
            Some(message) if !message.is_empty() => {
                tracing::info!("{locator}: {message}: {value}");
            }
            _ => tracing::info!("{locator}: {value}"),
        }

        Ok(Value::None)
    })
}
