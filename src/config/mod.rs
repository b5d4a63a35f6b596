//! Statutory configuration for the payroll engine.
//!
//! This module provides the income-tax scale, the social-security ceiling and
//! the professional-expense parameters, either built in
//! ([`StatutoryConfig::standard`]) or loaded from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/statutory.yaml").unwrap();
//! println!("Ceiling: {}", config.config().social_security_ceiling());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BracketCeiling, IncomeTaxSection, ProfessionalExpensesSection, SocialSecuritySection,
    StatutoryConfig, StatutoryFile, TaxBracket, TaxBracketEntry, standard_tax_brackets,
};
