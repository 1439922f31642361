use std::error::Error;

use xstash::{install, run_script, App, Value};

/// Runs a script against an app built from `input` and compares the values
/// it `show`s with `output`.
#[macro_export]
macro_rules! test {
    ($name: ident, $script: expr, $input: expr, $output: expr) => {
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            $crate::common::run_test($script, $input, $output)
        }
    };
}

/// Runs a script that is expected to fail with the given message.
#[macro_export]
macro_rules! test_error {
    ($name: ident, $script: expr, $input: expr, $message: expr) => {
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            $crate::common::run_error_test($script, $input, $message)
        }
    };
}

fn prepare(input: &str) -> Result<App, Box<dyn Error>> {
    let input: Value = serde_json::from_str(input)?;
    let mut app = App::from_document(input)?;
    assert!(install(&mut app));
    Ok(app)
}

pub(crate) fn run_test(script: &str, input: &str, output: &str) -> Result<(), Box<dyn Error>> {
    let mut app = prepare(input)?;
    let expected: Vec<_> = serde_json::de::Deserializer::from_str(output)
        .into_iter::<Value>()
        .collect::<Result<_, serde_json::Error>>()?;
    let output = run_script(&mut app, script)?;
    if expected != output {
        eprintln!("{expected:?} {output:?}");
    }
    assert_eq!(expected, output);
    Ok(())
}

pub(crate) fn run_error_test(script: &str, input: &str, message: &str) -> Result<(), Box<dyn Error>> {
    let mut app = prepare(input)?;
    match run_script(&mut app, script) {
        Ok(output) => panic!("Expected `{message}` but the script succeeded with {output:?}"),
        Err(e) => assert_eq!(e.to_string(), message),
    }
    Ok(())
}
