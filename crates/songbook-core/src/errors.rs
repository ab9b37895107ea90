use thiserror::Error;

/// Result type alias using the canonical structured error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in Songbook. Each kind maps to a stable error code that can be used for
/// programmatic error handling, testing, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Backing store
    /// The store cannot be reached or the connection is unusable
    StoreUnavailable,
    /// A write violated a store-level constraint (uniqueness, not-null, ...)
    ConstraintViolation,
    /// The entity's table does not exist yet
    SchemaNotReady,
    /// Any other store failure
    Persistence,

    // Structural/Validation
    InvalidInput,
    NotFound,

    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::StoreUnavailable => "ERR_STORE_UNAVAILABLE",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::SchemaNotReady => "ERR_SCHEMA_NOT_READY",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, entity type, row id) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity type context (e.g. `Song`)
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity type context, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain-level failures raised while mapping entities to rows
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SongbookError {
    /// A row read back from the store does not have the expected column count
    #[error("Row for {entity} has {actual} data columns, expected {expected}")]
    RowShapeMismatch {
        entity: String,
        expected: usize,
        actual: usize,
    },

    /// No row exists with the requested identity
    #[error("{entity} not found: {id}")]
    EntityNotFound { entity: String, id: i64 },

    /// A data field name cannot be used as a column name
    #[error("Invalid column name for {entity}: {column}")]
    InvalidColumnName { entity: String, column: String },
}

/// Conversion from SongbookError to ExError
impl From<SongbookError> for ExError {
    fn from(err: SongbookError) -> Self {
        match err {
            SongbookError::RowShapeMismatch {
                entity,
                expected,
                actual,
            } => ExError::new(ExErrorKind::Serialization)
                .with_entity(entity)
                .with_message(format!(
                    "Row has {} data columns, expected {}",
                    actual, expected
                )),

            SongbookError::EntityNotFound { entity, id } => ExError::new(ExErrorKind::NotFound)
                .with_entity(entity)
                .with_entity_id(id.to_string())
                .with_message("Entity not found"),

            SongbookError::InvalidColumnName { entity, column } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity(entity)
                    .with_message(format!("Invalid column name '{}'", column))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_kind_codes() {
        assert_eq!(
            ExErrorKind::StoreUnavailable.code(),
            "ERR_STORE_UNAVAILABLE"
        );
        assert_eq!(
            ExErrorKind::ConstraintViolation.code(),
            "ERR_CONSTRAINT_VIOLATION"
        );
        assert_eq!(ExErrorKind::SchemaNotReady.code(), "ERR_SCHEMA_NOT_READY");
    }

    #[test]
    fn test_display_includes_code_op_and_message() {
        let err = ExError::new(ExErrorKind::SchemaNotReady)
            .with_op("persist")
            .with_entity("Song")
            .with_message("no such table: songs");

        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_SCHEMA_NOT_READY]"));
        assert!(rendered.contains("in operation 'persist'"));
        assert!(rendered.contains("no such table: songs"));
        assert!(rendered.contains("(entity: Song)"));
    }

    #[test]
    fn test_source_chain_exposed_through_std_error() {
        let inner = ExError::new(ExErrorKind::StoreUnavailable).with_message("disk gone");
        let outer = ExError::new(ExErrorKind::Persistence).with_source(inner);

        let source = std::error::Error::source(&outer).expect("source should be set");
        assert!(source.to_string().contains("disk gone"));
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::StoreUnavailable)
        );
    }
}
