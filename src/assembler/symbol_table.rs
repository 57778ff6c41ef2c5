//! Symbol table management for labels

use crate::assembler::Symbol;

/// Maximum label length in characters.
pub const MAX_LABEL_LEN: usize = 32;

/// Label definitions collected during the first pass.
///
/// Names are case-sensitive and kept in definition order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Create a new empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name` at `address`.
    ///
    /// On a duplicate, the table is left unchanged and the earlier definition
    /// is returned.
    pub fn define(&mut self, name: &str, address: u16, defined_at: usize) -> Result<(), &Symbol> {
        if let Some(index) = self.symbols.iter().position(|s| s.name == name) {
            return Err(&self.symbols[index]);
        }

        self.symbols.push(Symbol {
            name: name.to_string(),
            address,
            defined_at,
        });

        Ok(())
    }

    /// Address of `name`, if defined.
    pub fn resolve(&self, name: &str) -> Option<u16> {
        self.symbols
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.address)
    }

    /// All definitions, in source order.
    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}

/// Validate a label name.
///
/// Labels must:
/// - Start with a letter [a-zA-Z]
/// - Contain only alphanumeric characters and underscores
/// - Not exceed 32 characters in length
pub fn validate_label(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err("label name cannot be empty".to_string());
    };

    if name.len() > MAX_LABEL_LEN {
        return Err(format!(
            "label name too long (max {} characters): {}",
            MAX_LABEL_LEN, name
        ));
    }

    if !first.is_ascii_alphabetic() {
        return Err(format!("label must start with a letter, not '{}'", first));
    }

    if let Some(ch) = chars.find(|&ch| !ch.is_ascii_alphanumeric() && ch != '_') {
        return Err(format!(
            "label contains invalid character '{}' (only letters, digits, and underscores allowed)",
            ch
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_resolve() {
        let mut table = SymbolTable::new();

        assert!(table.define("START", 0x8000, 1).is_ok());
        assert!(table.define("loop", 0x8010, 5).is_ok());

        assert_eq!(table.resolve("START"), Some(0x8000));
        assert_eq!(table.resolve("loop"), Some(0x8010));
        assert_eq!(table.resolve("LOOP"), None);
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let mut table = SymbolTable::new();

        table.define("START", 0x8000, 1).unwrap();
        let existing = table.define("START", 0x9000, 10).unwrap_err();
        assert_eq!(existing.defined_at, 1);

        assert_eq!(table.resolve("START"), Some(0x8000));
        assert_eq!(table.into_symbols().len(), 1);
    }

    #[test]
    fn test_validate_label_valid() {
        assert!(validate_label("START").is_ok());
        assert!(validate_label("loop_1").is_ok());
        assert!(validate_label("MyLabel").is_ok());
        assert!(validate_label(&"A".repeat(32)).is_ok());
    }

    #[test]
    fn test_validate_label_invalid() {
        assert!(validate_label("").is_err());
        assert!(validate_label("1START").is_err());
        assert!(validate_label("_start").is_err());
        assert!(validate_label("MY-LABEL").is_err());
        assert!(validate_label(&"A".repeat(33)).is_err());
    }
}
