use super::LineNumber;

/// An interpreter error: a numeric code, an optional source line (known only
/// for lexical diagnostics) and an optional free-form message.
///
/// Every error aborts the run; there is no recovery mode.
pub struct Error {
    code: u16,
    line_number: LineNumber,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            line_number: None,
            message: String::new(),
        }
    }

    pub fn in_line_number(self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: line,
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.into(),
            ..self
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }
}

pub enum ErrorCode {
    Break = 1,
    SyntaxError = 2,
    IllegalCharacter = 3,
    UnterminatedString = 4,
    UnterminatedComment = 5,
    UndefinedSymbol = 6,
    UndefinedSubroutine = 7,
    DivisionByZero = 11,
    MissingTerminator = 26,
    InternalError = 51,
    InvalidInput = 62,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            1 => "BREAK",
            2 => "SYNTAX ERROR",
            3 => "ILLEGAL CHARACTER",
            4 => "UNTERMINATED STRING",
            5 => "UNTERMINATED COMMENT",
            6 => "UNDEFINED SYMBOL",
            7 => "UNDEFINED SUBROUTINE",
            11 => "DIVISION BY ZERO",
            26 => "MISSING TERMINATOR",
            51 => "INTERNAL ERROR",
            62 => "INVALID INPUT",
            _ => "",
        };
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" IN LINE {}", line_number));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if code_str.is_empty() {
            write!(f, "PROGRAM ERROR {}{}", self.code, suffix)
        } else {
            write!(f, "{}{}", code_str, suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = Error::new(ErrorCode::SyntaxError);
        assert_eq!(error.to_string(), "SYNTAX ERROR");
        let error = Error::new(ErrorCode::IllegalCharacter)
            .in_line_number(Some(3))
            .message("@");
        assert_eq!(error.to_string(), "ILLEGAL CHARACTER IN LINE 3; @");
    }
}
