//! Validation report types for structured error reporting.
//!
//! A report lists every layout problem found in a label, in the order the
//! checks ran. The first issue is the one a failing label build reports.

use std::fmt;

use crate::error::PinlabelError;
use crate::geometry::{BBox, Mm};
use crate::scene::ElementId;

/// The result of validating a label layout.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues with the given code.
    pub fn count(&self, code: IssueCode) -> usize {
        self.issues.iter().filter(|i| i.code == code).count()
    }

    /// Fails with the first issue, if any.
    pub fn into_result(self) -> Result<(), PinlabelError> {
        match self.issues.first() {
            Some(issue) => Err(issue.to_error()),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(f, "Validation found {} issue(s):", self.issues.len())?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single layout problem.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationIssue {
    /// A stable code for the issue type.
    pub code: IssueCode,

    /// A human-readable description of the issue.
    pub message: String,

    /// The element(s) involved.
    pub context: IssueContext,
}

impl ValidationIssue {
    pub fn out_of_bounds(element: ElementId, bbox: BBox<Mm>) -> Self {
        Self::from_context(
            IssueCode::OutOfBounds,
            IssueContext::Element { id: element, bbox },
        )
    }

    pub fn overlap(first: ElementId, second: ElementId, depth: f64) -> Self {
        Self::from_context(
            IssueCode::Overlap,
            IssueContext::Pair {
                first,
                second,
                depth,
            },
        )
    }

    pub fn text_out_of_area(element: ElementId, bbox: BBox<Mm>) -> Self {
        Self::from_context(
            IssueCode::TextOutOfArea,
            IssueContext::Element { id: element, bbox },
        )
    }

    fn from_context(code: IssueCode, context: IssueContext) -> Self {
        let mut issue = Self {
            code,
            message: String::new(),
            context,
        };
        issue.message = issue.to_error().to_string();
        issue
    }

    /// The error a failing label build reports for this issue.
    pub fn to_error(&self) -> PinlabelError {
        match self.context {
            IssueContext::Pair {
                first,
                second,
                depth,
            } => PinlabelError::Overlap {
                first,
                second,
                depth,
            },
            IssueContext::Element { id, bbox } if self.code == IssueCode::TextOutOfArea => {
                PinlabelError::TextOutOfArea { element: id, bbox }
            }
            IssueContext::Element { id, bbox } => PinlabelError::OutOfBounds { element: id, bbox },
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {:?} in {}: {}", self.code, self.context, self.message)
    }
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// Two element boxes overlap on both axes.
    Overlap,
    /// An element box extends past the label edge.
    OutOfBounds,
    /// The text block extends past the margin-reduced text area.
    TextOutOfArea,
}

/// The element(s) an issue refers to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IssueContext {
    Element { id: ElementId, bbox: BBox<Mm> },
    Pair {
        first: ElementId,
        second: ElementId,
        /// Smaller of the x and y overlap extents, in mm.
        depth: f64,
    },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Element { id, .. } => write!(f, "{}", id),
            IssueContext::Pair { first, second, .. } => write!(f, "{}/{}", first, second),
        }
    }
}
