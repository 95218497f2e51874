//! Formula scanners.
//!
//! Each scanner walks the text of one documentation block and returns the
//! embedded-math occurrences it recognizes: Doxygen `\f...` commands,
//! Markdown dollar delimiters, or Sphinx `:math:` roles and `.. math::`
//! directives. Occurrences carry absolute source spans plus the normalized
//! LaTeX text; malformed or empty markup is dropped silently.

pub mod doxygen;
pub mod markdown;
pub mod sphinx;
