use std::fmt::Display;

/// Writes values separated by single spaces, as UCI messages are.
pub struct SpaceSepFormatter<'a, 'b> {
    formatter: &'b mut std::fmt::Formatter<'a>,
    written: bool,
}

impl<'a, 'b> SpaceSepFormatter<'a, 'b> {
    pub fn new(f: &'b mut std::fmt::Formatter<'a>) -> Self {
        Self {
            formatter: f,
            written: false,
        }
    }

    fn sep(&mut self) -> std::fmt::Result {
        if !self.written {
            self.written = true;
        } else {
            write!(self.formatter, " ")?;
        }

        Ok(())
    }

    pub fn push<T: Display>(&mut self, value: &T) -> std::fmt::Result {
        self.sep()?;
        write!(self.formatter, "{value}")
    }

    pub fn push_str(&mut self, name: &str) -> std::fmt::Result {
        self.sep()?;
        write!(self.formatter, "{name}")
    }

    pub fn push_option<T: Display>(&mut self, name: &str, value: Option<T>) -> std::fmt::Result {
        if let Some(value) = value {
            self.sep()?;
            write!(self.formatter, "{name} {value}")?;
        }

        Ok(())
    }

    /// Writes `name` followed by every value, or nothing if there are no
    /// values.
    pub fn push_list<T: Display>(&mut self, name: &str, values: &[T]) -> std::fmt::Result {
        if values.is_empty() {
            return Ok(());
        }

        self.push_str(name)?;
        for value in values {
            self.push(value)?;
        }

        Ok(())
    }
}
