// crates/wirecheck-core/src/core/report.rs
// ============================================================================
// Module: Wirecheck Report
// Description: Per-exchange report partitioned by violation category.
// Purpose: Hand consumers request, response, and contract-level ledgers at once.
// Dependencies: crate::core::{model, violations}
// ============================================================================

//! ## Overview
//! A [`Report`] is created fresh for every checked exchange. It owns three
//! independent ledgers and keeps a shared handle to the contract it was
//! checked against. A report is empty only when all three ledgers are empty;
//! "no violations" is the success signal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::core::model::ContractModel;
use crate::core::violations::Violation;
use crate::core::violations::ViolationRecord;
use crate::core::violations::Violations;

// ============================================================================
// SECTION: Report Scope
// ============================================================================

/// Ledger selection used by assertion helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportScope {
    /// Every ledger.
    All,
    /// Contract-validation ledger only.
    Contract,
    /// Request and response ledgers.
    Exchange,
    /// Request ledger only.
    Request,
    /// Response ledger only.
    Response,
}

impl ReportScope {
    /// Returns (contract, request, response) inclusion flags.
    const fn flags(self) -> (bool, bool, bool) {
        match self {
            Self::All => (true, true, true),
            Self::Contract => (true, false, false),
            Self::Exchange => (false, true, true),
            Self::Request => (false, true, false),
            Self::Response => (false, false, true),
        }
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Violations recorded for one checked exchange.
#[derive(Debug, Clone)]
pub struct Report {
    /// Contract the exchange was checked against.
    contract: Arc<ContractModel>,
    /// Request violations.
    request: Violations,
    /// Response violations.
    response: Violations,
    /// Contract-validation violations.
    validation: Violations,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub const fn new(contract: Arc<ContractModel>) -> Self {
        Self {
            contract,
            request: Violations::new(),
            response: Violations::new(),
            validation: Violations::new(),
        }
    }

    /// Creates a report whose contract ledger holds one entry per result.
    #[must_use]
    pub fn from_validation_results<I, R>(contract: Arc<ContractModel>, results: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: fmt::Display,
    {
        let mut report = Self::new(contract);
        for result in results {
            report.validation.add(Violation::CheckingException {
                detail: result.to_string(),
            });
        }
        report
    }

    /// Creates a report recording a failure of the checking process itself.
    #[must_use]
    pub fn from_error(contract: Arc<ContractModel>, error: &dyn Error) -> Self {
        let mut report = Self::new(contract);
        report.record_error(error);
        report
    }

    /// Records a checking failure in the contract ledger.
    pub fn record_error(&mut self, error: &dyn Error) {
        let mut detail = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        self.validation.add(Violation::CheckingException {
            detail,
        });
    }

    /// Returns the contract the exchange was checked against.
    #[must_use]
    pub fn contract(&self) -> &ContractModel {
        &self.contract
    }

    /// Returns the request ledger.
    #[must_use]
    pub const fn request_violations(&self) -> &Violations {
        &self.request
    }

    /// Returns the response ledger.
    #[must_use]
    pub const fn response_violations(&self) -> &Violations {
        &self.response
    }

    /// Returns the contract-validation ledger.
    #[must_use]
    pub const fn validation_violations(&self) -> &Violations {
        &self.validation
    }

    /// Returns the request ledger for writing.
    pub const fn request_violations_mut(&mut self) -> &mut Violations {
        &mut self.request
    }

    /// Returns the response ledger for writing.
    pub const fn response_violations_mut(&mut self) -> &mut Violations {
        &mut self.response
    }

    /// Returns the contract-validation ledger for writing.
    pub const fn validation_violations_mut(&mut self) -> &mut Violations {
        &mut self.validation
    }

    /// Returns true when all three ledgers are empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.request.is_empty() && self.response.is_empty() && self.validation.is_empty()
    }

    /// Returns true when the ledgers selected by `scope` are empty.
    #[must_use]
    pub fn passes(&self, scope: ReportScope) -> bool {
        self.violations_in(scope).is_empty()
    }

    /// Returns the records of the ledgers selected by `scope`, contract first.
    #[must_use]
    pub fn violations_in(&self, scope: ReportScope) -> Vec<&ViolationRecord> {
        let (contract, request, response) = scope.flags();
        let mut records = Vec::new();
        if contract {
            records.extend(self.validation.iter());
        }
        if request {
            records.extend(self.request.iter());
        }
        if response {
            records.extend(self.response.iter());
        }
        records
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Report{{request_violations={}, response_violations={}, validation_violations={}}}",
            self.request, self.response, self.validation
        )
    }
}
