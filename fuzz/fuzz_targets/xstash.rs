#![no_main]
use std::error::Error;

use libfuzzer_sys::fuzz_target;
use xstash::{install, run_script, App, Value};

fuzz_target!(|si: (&str, &str)| {
    let (script, input) = si;
    || -> Result<(), Box<dyn Error>> {
        let input: Value = serde_json::from_str(input)?;
        let mut app = App::from_document(input)?;
        install(&mut app);
        let _output = run_script(&mut app, script)?;
        Ok(())
    }()
    .ok();
});
