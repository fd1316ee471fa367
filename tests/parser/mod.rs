//! Parser tests: losslessness and error recovery on arbitrary input.

mod tests_lossless;
