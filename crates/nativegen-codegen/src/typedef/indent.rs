//! Line-based re-indentation of rendered declarations.
//!
//! The indenter does not tokenize. It sniffs line endings and keeps a single
//! depth counter, which is enough for the restricted shapes the bindings
//! generator emits. Golden outputs depend on the exact whitespace produced
//! here.

/// Spaces added per nesting level.
const INDENT_UNIT: usize = 2;

/// Depth counter carried across the lines of one block.
#[derive(Debug, Default)]
struct Indenter {
    base: usize,
    depth: usize,
}

impl Indenter {
    const fn new(base: usize) -> Self {
        Self { base, depth: 0 }
    }

    /// Returns the indent width for an already trimmed, non-empty line and
    /// advances the depth counter.
    fn measure(&mut self, line: &str) -> usize {
        let in_doc_comment = line.starts_with('*');
        let opens_block = line.ends_with('{') || line.ends_with('=');

        let width = if opens_block && !in_doc_comment {
            self.depth += 1;
            self.base + (self.depth - 1) * INDENT_UNIT
        } else {
            let closes_block = line.ends_with('}');
            let is_union_variant = line.starts_with('|');
            if closes_block && self.depth > 0 && !in_doc_comment && !is_union_variant {
                self.depth -= 1;
            }
            self.base + self.depth * INDENT_UNIT
        };

        // align ` * ` continuation lines under the opening `/**`
        if in_doc_comment { width + 1 } else { width }
    }
}

/// Re-indents `src` starting at `base` spaces.
///
/// Every line is trimmed first. Blank lines are emitted as empty strings.
///
/// # Examples
///
/// ```
/// use nativegen_codegen::typedef::reindent;
///
/// let out = reindent("export interface A {\nb: {\nc: number\n}\n}", 0);
/// assert_eq!(out, "export interface A {\n  b: {\n    c: number\n  }\n}");
/// ```
#[must_use]
pub fn reindent(src: &str, base: usize) -> String {
    let mut indenter = Indenter::new(base);

    src.split('\n')
        .map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return String::new();
            }
            let width = indenter.measure(line);
            " ".repeat(width) + line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_interface() {
        let out = reindent("export interface P {\n    x: number\n  y: number\n}", 0);
        assert_eq!(out, "export interface P {\n  x: number\n  y: number\n}");
    }

    #[test]
    fn test_two_level_nesting_with_base() {
        let src = "export interface Outer {\ninner: {\nvalue: string\n}\nafter: number\n}";
        let out = reindent(src, 2);
        assert_eq!(
            out,
            "  export interface Outer {\n    inner: {\n      value: string\n    }\n    after: number\n  }"
        );
    }

    #[test]
    fn test_blank_lines_are_not_indented() {
        let out = reindent("class A {\n   \nfoo(): void\n}", 4);
        assert_eq!(out, "    class A {\n\n      foo(): void\n    }");
    }

    #[test]
    fn test_doc_comment_lines_get_extra_space() {
        let src = "/**\n* Adds numbers.\n*/\nexport declare function sum(): number";
        let out = reindent(src, 0);
        assert_eq!(out, "/**\n * Adds numbers.\n */\nexport declare function sum(): number");
    }

    #[test]
    fn test_doc_comment_inside_block() {
        let src = "export interface A {\n/** field */\nb: number\n}";
        let out = reindent(src, 0);
        assert_eq!(out, "export interface A {\n  /** field */\n  b: number\n}");
    }

    #[test]
    fn test_type_alias_equals_opens_level() {
        let src = "export type Shape = \n| 'circle'\n| 'square'";
        let out = reindent(src, 0);
        assert_eq!(out, "export type Shape =\n  | 'circle'\n  | 'square'");
    }

    #[test]
    fn test_union_variant_ending_in_brace_does_not_dedent() {
        let src = "export type U = \n| { a: string }\n| { b: number }";
        let out = reindent(src, 0);
        assert_eq!(out, "export type U =\n  | { a: string }\n  | { b: number }");
    }

    #[test]
    fn test_stray_closing_brace_stays_at_base() {
        assert_eq!(reindent("}", 2), "  }");
    }
}
