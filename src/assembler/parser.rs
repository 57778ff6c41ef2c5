//! Assembly source line splitter.
//!
//! A line has the shape `[LABEL:] [MNEMONIC [OPERAND]] [; comment]`. The
//! parser only separates those parts; validation happens in the encoder and
//! the symbol table.

/// A parsed line of assembly source
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssemblyLine {
    /// Optional label definition (e.g., "START" from "START:")
    pub label: Option<String>,

    /// Optional mnemonic or directive (e.g., "LDA", ".byte"), as written
    pub mnemonic: Option<String>,

    /// Operand text with all whitespace removed (e.g., "#$42", "$1234,X")
    pub operand: String,
}

impl AssemblyLine {
    /// Returns true if the line carries neither a label nor a statement.
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.mnemonic.is_none()
    }
}

/// Splits one source line into label, mnemonic and operand.
///
/// # Examples
///
/// ```
/// use emu6502::assembler::parser::parse_line;
///
/// let line = parse_line("loop: lda $10, x ; fetch");
/// assert_eq!(line.label.as_deref(), Some("loop"));
/// assert_eq!(line.mnemonic.as_deref(), Some("lda"));
/// assert_eq!(line.operand, "$10,x");
/// ```
pub fn parse_line(source: &str) -> AssemblyLine {
    let code = match source.split_once(';') {
        Some((code, _comment)) => code,
        None => source,
    };
    let mut rest = code.trim();

    let mut line = AssemblyLine::default();

    if let Some((head, tail)) = rest.split_once(':') {
        let head = head.trim();
        if !head.is_empty() && !head.contains(char::is_whitespace) {
            line.label = Some(head.to_string());
            rest = tail.trim();
        }
    }

    if rest.is_empty() {
        return line;
    }

    let (mnemonic, operand) = match rest.split_once(char::is_whitespace) {
        Some((mnemonic, operand)) => (mnemonic, operand),
        None => (rest, ""),
    };
    line.mnemonic = Some(mnemonic.to_string());
    line.operand = operand.split_whitespace().collect();

    line
}
