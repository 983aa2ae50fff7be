pub(crate) const TERMINATOR: &str = "--";
pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const SHORT_PREFIX: char = '-';

// Besides alphanumerics, these may appear in a long flag name.
pub(crate) const LONG_NAME_PUNCTUATION: [char; 3] = ['-', '_', '.'];
