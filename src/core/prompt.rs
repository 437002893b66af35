use crate::domain::model::FeatureField;
use crate::domain::ports::InputSource;
use crate::utils::error::{PredictError, Result};
use std::io::{BufRead, Write};

/// Asks for each value on a console-like pair of streams.
pub struct ConsolePrompt<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> InputSource for ConsolePrompt<R, W> {
    fn read_value(&mut self, field: FeatureField) -> Result<String> {
        write!(self.writer, "{}", field.prompt())?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(PredictError::InputError {
                message: "EOF when reading a line".to_string(),
            });
        }

        let value = line.trim_end_matches(['\r', '\n']).to_string();
        tracing::trace!(field = field.name(), "read value from prompt");
        Ok(value)
    }
}

/// Values supplied up front; any field left unset is asked for on `fallback`.
pub struct PresetInput<I: InputSource> {
    radius: Option<String>,
    height: Option<String>,
    fallback: I,
}

impl<I: InputSource> PresetInput<I> {
    pub fn new(radius: Option<String>, height: Option<String>, fallback: I) -> Self {
        Self {
            radius,
            height,
            fallback,
        }
    }
}

impl<I: InputSource> InputSource for PresetInput<I> {
    fn read_value(&mut self, field: FeatureField) -> Result<String> {
        let preset = match field {
            FeatureField::Radius => self.radius.take(),
            FeatureField::Height => self.height.take(),
        };
        match preset {
            Some(value) => {
                tracing::debug!(field = field.name(), "using value supplied on the command line");
                Ok(value)
            }
            None => self.fallback.read_value(field),
        }
    }
}

/// Parses raw input as a 64-bit float; surrounding whitespace is ignored.
pub fn parse_feature(field: FeatureField, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| PredictError::ParseError {
            field: field.name().to_string(),
            value: raw.to_string(),
        })
}
