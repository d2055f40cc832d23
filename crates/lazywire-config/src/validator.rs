//! Configuration validation.

use crate::schema::Config;

/// Depth above which nesting is almost certainly a wiring mistake.
const MAX_REASONABLE_DEPTH: usize = 1024;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_registry(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_registry(config: &Config, result: &mut ValidationResult) {
        match config.registry.max_depth {
            // Parsing rejects zero, but the field can still be set directly
            Some(0) => result.add_error(ValidationError::new(
                "registry.max_depth",
                "max_depth must be greater than 0",
            )),
            Some(depth) if depth > MAX_REASONABLE_DEPTH => {
                result.add_warning(ValidationWarning::new(
                    "registry.max_depth",
                    format!(
                        "max_depth is very high (>{}), deep factory chains may overflow the stack",
                        MAX_REASONABLE_DEPTH
                    ),
                ));
            }
            _ => {}
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, LOG_LEVELS
                ),
            ));
        }

        if config.logging.log_dir.is_some() && config.logging.max_log_files == 0 {
            result.add_warning(ValidationWarning::new(
                "logging.max_log_files",
                "max_log_files is 0, rotated log files will never be pruned",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
