use crate::lexer::VarType;
use crate::semantic::SemanticError;
use serde::Serialize;
use std::collections::HashMap;

/// Declared-variable information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: VarType,
    pub line: usize,
    pub initialized: bool,
}

/// Flat symbol table — the language has no blocks or functions, so
/// there is a single scope per analysis.
#[derive(Debug, Default)]
pub struct SymbolTable {
    variables: HashMap<String, SymbolEntry>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Declare a variable. A name may appear at most once; redeclaring
    /// is an error naming the original declaration line, never a silent
    /// overwrite.
    pub fn declare(
        &mut self,
        name: &str,
        var_type: VarType,
        line: usize,
    ) -> Result<(), SemanticError> {
        if let Some(existing) = self.variables.get(name) {
            return Err(SemanticError::Redeclaration(
                name.to_string(),
                existing.line,
            ));
        }

        self.variables.insert(
            name.to_string(),
            SymbolEntry {
                name: name.to_string(),
                var_type,
                line,
                initialized: false,
            },
        );
        Ok(())
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.variables.get(name)
    }

    pub fn mark_initialized(&mut self, name: &str) {
        if let Some(entry) = self.variables.get_mut(name) {
            entry.initialized = true;
        }
    }

    /// Clear every declaration. Must run between independent analyses
    /// that share one table.
    pub fn reset(&mut self) {
        self.variables.clear();
    }

    /// Copy of the table as exposed in analysis results
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, SymbolEntry> {
        self.variables.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
