//! Application entry point reference (`package.module:function`)

use std::fmt;
use std::str::FromStr;

/// Reference to the function the bootstrap unit hands control to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    module: String,
    function: String,
}

impl EntryPoint {
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    /// Top-level package of the entry module, if it is inside one.
    ///
    /// `src.main` -> `src`, `main` -> `None`
    pub fn package(&self) -> Option<&str> {
        self.module.split_once('.').map(|(package, _)| package)
    }
}

impl FromStr for EntryPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, function) = s
            .split_once(':')
            .ok_or_else(|| format!("entry '{s}' must look like 'package.module:function'"))?;

        let valid_ident = |part: &str| {
            !part.is_empty()
                && !part.starts_with(|c: char| c.is_ascii_digit())
                && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        };

        if !module.split('.').all(valid_ident) {
            return Err(format!("entry module '{module}' is not a dotted identifier"));
        }
        if !valid_ident(function) {
            return Err(format!("entry function '{function}' is not an identifier"));
        }

        Ok(Self {
            module: module.to_string(),
            function: function.to_string(),
        })
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_module_and_function() {
        let ep: EntryPoint = "src.main:main".parse().unwrap();
        assert_eq!(ep.module(), "src.main");
        assert_eq!(ep.function(), "main");
        assert_eq!(ep.to_string(), "src.main:main");
    }

    #[test]
    fn package_is_first_module_segment() {
        let nested: EntryPoint = "app.ui.main:run".parse().unwrap();
        assert_eq!(nested.package(), Some("app"));
        let flat: EntryPoint = "main:run".parse().unwrap();
        assert_eq!(flat.package(), None);
    }

    #[test]
    fn rejects_missing_function() {
        assert!("src.main".parse::<EntryPoint>().is_err());
    }

    #[test]
    fn rejects_empty_segments() {
        assert!("src..main:main".parse::<EntryPoint>().is_err());
        assert!("src.main:".parse::<EntryPoint>().is_err());
    }

    #[test]
    fn rejects_injection_characters() {
        assert!("os; import sys:main".parse::<EntryPoint>().is_err());
    }
}
