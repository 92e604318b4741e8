use std::fmt;
use std::str::FromStr;

/// Severity of a log statement. The resolver never looks at it; it is carried
/// through to the sink unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    Error,
    Warning,
    Info,
    #[default]
    Debug,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            other => Err(format!("unknown level '{}'", other)),
        }
    }
}

impl From<Level> for tracing::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => tracing::Level::ERROR,
            Level::Warning => tracing::Level::WARN,
            Level::Info => tracing::Level::INFO,
            Level::Debug => tracing::Level::DEBUG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("WARN".parse::<Level>(), Ok(Level::Warning));
        assert_eq!("Info".parse::<Level>(), Ok(Level::Info));
        assert!("trace".parse::<Level>().is_err());
        assert_eq!(Level::default(), Level::Debug);
    }

    #[test]
    fn maps_onto_tracing_levels() {
        assert_eq!(tracing::Level::from(Level::Warning), tracing::Level::WARN);
        assert_eq!(tracing::Level::from(Level::Error), tracing::Level::ERROR);
    }
}
