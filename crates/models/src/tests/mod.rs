/// Enum wire-format and parsing tests
pub mod enum_tests;
