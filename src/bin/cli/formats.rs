#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum SerializationFormat {
    Json,
    Yaml,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    Compact(SerializationFormat),
    Pretty(SerializationFormat),
}

impl OutputFormat {
    pub fn new(format: SerializationFormat, compact: bool) -> Self {
        if compact {
            OutputFormat::Compact(format)
        } else {
            OutputFormat::Pretty(format)
        }
    }
}
