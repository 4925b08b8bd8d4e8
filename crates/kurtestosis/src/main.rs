use kurtestosis::{ExitStatus, kurtestosis_main};
use kurtestosis_core::NoEngine;

fn main() -> ExitStatus {
    kurtestosis_main(&NoEngine)
}
