/// Configuration for scanning and navigation.
///
/// The defaults favour robustness on loosely formed real-world payloads. Both
/// switches tighten the accepted grammar towards RFC 8259 for callers that
/// would rather reject such input.
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Reject numbers with redundant leading zeros such as `01` or `-007`.
    ///
    /// When `false`, the scanner accepts any run of digits as the integer
    /// part of a number.
    ///
    /// # Default
    ///
    /// `false`
    pub strict_numbers: bool,

    /// Require exactly one comma between object members and array elements,
    /// and no comma before the closing delimiter.
    ///
    /// When `false`, any run of whitespace and commas separates members, so
    /// `[1,,2,]` and `[1 2]` both enumerate two elements.
    ///
    /// # Examples
    ///
    /// ```json
    /// {"a": 1,, "b": 2,}
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub strict_separators: bool,
}

impl ScanOptions {
    /// Options accepting only RFC 8259 numbers and separators.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            strict_numbers: true,
            strict_separators: true,
        }
    }
}
