//! Brace-balance tracking for top-level detection.
//!
//! Scans each line character by character: `{` enters a block, `}` leaves
//! one. Declarations only count as exportable while the running depth is at
//! the file's top level. Brace characters inside string literals or comments
//! are not special-cased; the balance is perturbed by them (known
//! imprecision, kept as-is).

/// Net brace balance of a single line.
///
/// Positive means the line opens more blocks than it closes, negative the
/// reverse. The `} else {` idiom nets to exactly zero, so an `else` clause
/// never hides subsequent top-level declarations.
pub fn line_balance(line: &str) -> i64 {
    let mut balance = 0i64;

    for c in line.chars() {
        match c {
            '{' => balance += 1,
            '}' => balance -= 1,
            _ => {}
        }
    }

    balance
}

/// Running nesting depth across the lines of one source file.
///
/// Depth starts at 0 (top level). Unbalanced input can drive the depth
/// negative; such lines are simply never top-level again until the closes
/// are matched by opens.
#[derive(Debug, Default)]
pub struct NestingTracker {
    depth: i64,
}

impl NestingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the next line starts at top level.
    pub fn at_top_level(&self) -> bool {
        self.depth == 0
    }

    /// Current depth relative to the start of the file.
    pub fn depth(&self) -> i64 {
        self.depth
    }

    /// Applies a line's balance to the running depth and returns the
    /// line's own net delta.
    pub fn advance(&mut self, line: &str) -> i64 {
        let delta = line_balance(line);
        self.depth += delta;
        delta
    }
}
