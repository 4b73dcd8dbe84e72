//! Cascade Theme - design-token trees with reference resolution.
//!
//! A theme is a nested tree of values (strings, numbers, booleans,
//! sequences and mappings). Strings may point at other parts of the same
//! tree with `{dot.path}` references:
//!
//! ```yaml
//! palette:
//!   blue: "#1e6fd9"
//! space:
//!   unit: 4
//!   md: "{space.unit}"
//! button:
//!   background: "{palette.blue}"
//!   padding: "{space.md}px calc({space.md}px * 2)"
//! ```
//!
//! [`resolve_theme`] turns such a tree into one with every reference
//! substituted. A string that is exactly one reference takes the referenced
//! value with its type intact; references embedded in larger strings are
//! interpolated as text.
//!
//! # Quick Start
//!
//! ```rust
//! use cascade_theme::{resolve_theme, ThemeValue};
//!
//! let theme = ThemeValue::from_yaml_str(r##"
//! palette:
//!   blue: "#1e6fd9"
//! button:
//!   background: "{palette.blue}"
//!   border: "1px solid {palette.blue}"
//! "##).unwrap();
//!
//! let resolved = resolve_theme(&theme).unwrap();
//! assert_eq!(
//!     resolved.get_path("button.border"),
//!     Some(&ThemeValue::from("1px solid #1e6fd9"))
//! );
//! ```
//!
//! # Errors
//!
//! Resolution stops at the first problem:
//!
//! | Error | Cause |
//! |-------|-------|
//! | [`ThemeError::MissingReference`] | the referenced path does not exist |
//! | [`ThemeError::CircularReference`] | a reference depends on itself |
//! | [`ThemeError::InterpolationType`] | an embedded reference is not a string or number |

mod error;
mod load;
mod path;
pub mod reference;
mod resolver;
mod value;

pub use error::{Result, ThemeError, ThemeLoadError};
pub use load::{load_theme, ThemeFormat};
pub use path::{join_index, join_key, parse_path, resolve_path, PathSegment};
pub use resolver::{resolve_theme, ThemeResolver};
pub use value::{ThemeMap, ThemeValue};
