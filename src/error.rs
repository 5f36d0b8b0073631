use core::fmt;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /**
    Fold any lower-level failure into a `ParseError` carrying the input being decoded.

    The decoder surfaces a single error type no matter which layer rejected the
    input, so callers only ever see `ParseError` from `decode`.
    */
    pub(crate) fn into_parse(self, input: &str) -> Error {
        match self.kind {
            ErrorKind::Parse(err) => Error::from(err.with_input(input)),
            ErrorKind::Overflow(err) => Error::from(ParseError::overflow(err).with_input(input)),
            kind => Error { kind },
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error {
            kind: ErrorKind::Parse(err),
        }
    }
}

impl From<OverflowError> for Error {
    fn from(err: OverflowError) -> Self {
        Error {
            kind: ErrorKind::Overflow(err),
        }
    }
}

impl From<UnsupportedError> for Error {
    fn from(err: UnsupportedError) -> Self {
        Error {
            kind: ErrorKind::Unsupported(err),
        }
    }
}

impl From<ArgumentError> for Error {
    fn from(err: ArgumentError) -> Self {
        Error {
            kind: ErrorKind::Argument(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::Parse(ref err) => fmt::Display::fmt(err, f),
            ErrorKind::Overflow(ref err) => fmt::Display::fmt(err, f),
            ErrorKind::Unsupported(ref err) => fmt::Display::fmt(err, f),
            ErrorKind::Argument(ref err) => fmt::Display::fmt(err, f),
        }
    }
}

#[non_exhaustive]
#[derive(Debug)]
pub enum ErrorKind {
    Parse(ParseError),
    Overflow(OverflowError),
    Unsupported(UnsupportedError),
    Argument(ArgumentError),
}

#[derive(Debug)]
pub struct ParseError {
    input: String,
    kind: ParseErrorKind,
}

#[derive(Debug)]
enum ParseErrorKind {
    Char { got: u8 },
    End,
    Overflow(OverflowError),
}

impl ParseError {
    pub(crate) fn unexpected_char(got: u8) -> Self {
        ParseError {
            input: String::new(),
            kind: ParseErrorKind::Char { got },
        }
    }

    pub(crate) fn unexpected_end() -> Self {
        ParseError {
            input: String::new(),
            kind: ParseErrorKind::End,
        }
    }

    pub(crate) fn overflow(cause: OverflowError) -> Self {
        ParseError {
            input: String::new(),
            kind: ParseErrorKind::Overflow(cause),
        }
    }

    pub(crate) fn with_input(mut self, input: &str) -> Self {
        if self.input.is_empty() {
            self.input = input.into();
        }

        self
    }

    /**
    The input that failed to decode, if the failing layer knew it.
    */
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ParseErrorKind::Char { got } => {
                write!(f, "unexpected `{}`, expected a hex digit", got as char)?;
            }
            ParseErrorKind::End => {
                write!(f, "unexpected end of input")?;
            }
            ParseErrorKind::Overflow(ref cause) => {
                write!(f, "the encoded value overflowed: {}", cause)?;
            }
        }

        if self.input.len() > 0 {
            write!(f, "; while decoding `{}`", self.input)?;
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct OverflowError {
    max_bits: u64,
    required_bits: Option<u64>,
    note: &'static str,
}

impl OverflowError {
    pub(crate) fn would_overflow(max_bits: u64, required_bits: u64, note: &'static str) -> Self {
        OverflowError {
            max_bits,
            required_bits: Some(required_bits),
            note,
        }
    }

    pub(crate) fn out_of_range(max_bits: u64, note: &'static str) -> Self {
        OverflowError {
            max_bits,
            required_bits: None,
            note,
        }
    }

    pub fn max_bits(&self) -> u64 {
        self.max_bits
    }

    pub fn required_bits(&self) -> Option<u64> {
        self.required_bits
    }
}

impl fmt::Display for OverflowError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "the value cannot fit into `{}` bits", self.max_bits)?;

        if let Some(required_bits) = self.required_bits {
            write!(f, "; the width needed is `{}` bits", required_bits)?;
        }

        if self.note.len() > 0 {
            write!(f, "; {}", self.note)?;
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct UnsupportedError {
    accessor: &'static str,
    expected: &'static str,
    got: &'static str,
}

impl UnsupportedError {
    pub(crate) fn wrong_range(
        accessor: &'static str,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        UnsupportedError {
            accessor,
            expected,
            got,
        }
    }
}

impl fmt::Display for UnsupportedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "`{}` is only available on `{}` values; this value is `{}`",
            self.accessor, self.expected, self.got
        )
    }
}

#[derive(Debug)]
pub struct ArgumentError {
    note: &'static str,
}

impl ArgumentError {
    pub(crate) fn new(note: &'static str) -> Self {
        ArgumentError { note }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.note)
    }
}

mod std_support {
    use super::*;

    use std::error;

    impl error::Error for Error {}

    impl error::Error for ParseError {}

    impl error::Error for OverflowError {}

    impl error::Error for UnsupportedError {}

    impl error::Error for ArgumentError {}
}
