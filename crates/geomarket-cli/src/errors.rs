use console::style;
use geomarket_core::error::MarketError;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// The marketplace API could not be reached or answered with an error
pub fn api_unavailable(reason: &str, remediation: &str) -> CliError {
    CliError::new("Marketplace API unavailable")
        .with_context(format!("The request could not be completed.\n\nError: {}", reason))
        .with_suggestion(remediation.to_string())
        .with_suggestion("Or pass the API location explicitly: geomarket --api-url http://host:8080/api ...")
        .with_help("Run: geomarket config")
}

/// The saved draft has not reached the review step
pub fn order_incomplete(step: u8) -> CliError {
    CliError::new("Order draft is incomplete")
        .with_context(format!(
            "The saved draft is still at step {} of 6.\n\nEvery step before review must be completed before submitting.",
            step
        ))
        .with_suggestion("Continue the wizard: geomarket order --resume")
        .with_suggestion("Check what is missing: geomarket draft")
        .with_help("Run: geomarket order --help")
}

/// Unknown family, type or tier
pub fn unknown_product(message: &str) -> CliError {
    CliError::new(message.to_string())
        .with_suggestion("List families: geomarket families")
        .with_suggestion("List products of a family: geomarket products imagery")
}

/// Area of interest could not be built
pub fn invalid_area(reason: &str) -> CliError {
    CliError::new("Invalid area of interest")
        .with_context(format!("Reason: {}", reason))
        .with_suggestion("Circles are LAT,LNG,RADIUS_KM with a positive radius, e.g. --circle -6.2,106.8,25")
        .with_suggestion("Polygons need a GeoJSON file with at least 3 distinct vertices")
        .with_help("Run: geomarket search --help")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check .geomarket/config.toml for syntax errors")
        .with_suggestion("Check GEOMARKET_* environment variables")
        .with_help("Run: geomarket config")
}

/// Map a domain error to a CLI error with suggestions
pub fn from_market_error(error: &MarketError) -> CliError {
    match error {
        MarketError::CatalogUnavailable { reason, remediation }
        | MarketError::OrderDeskUnavailable { reason, remediation } => {
            api_unavailable(reason, remediation)
        }
        MarketError::OrderSubmissionFailed { reason } => {
            api_unavailable(reason, "Check that the order service is running, then submit again")
        }
        MarketError::OrderIncomplete { step } => order_incomplete(*step),
        MarketError::FamilyNotFound { .. }
        | MarketError::FamilyUnavailable { .. }
        | MarketError::ProductTypeNotFound { .. }
        | MarketError::TierNotFound { .. } => unknown_product(&error.to_string()),
        MarketError::InvalidGeometry { reason } => invalid_area(reason),
        MarketError::ConfigInvalid { key, reason } => invalid_config(key, reason),
        MarketError::ConfigMissing { key } => invalid_config(key, "A value is required"),
        other => CliError::new(other.to_string()),
    }
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(market_error) = error.downcast_ref::<MarketError>() {
        return from_market_error(market_error);
    }

    let message = format!("{:#}", error);
    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
    } else {
        CliError::new(message)
    }
}
