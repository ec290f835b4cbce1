//! Graphviz DOT export.
//!
//! Nodes are labelled `"<vertex>,<value>"`. An invisible chain of rank nodes
//! `r0 -> r1 -> ...` is paired with the tree nodes in descending value order
//! through `rank=same` groups, so a layout engine stacks nodes by value.
//! Values are printed the way JavaScript's `Number.prototype.toString` prints
//! them, so `1e21` renders as `1e+21` and `0.0000001` as `1e-7`.

use std::{
    fmt::{self, Display, Formatter},
    io,
    num::FpCategory,
};

use super::{DynamicTree, TreeNode};

struct Dot<'a>(&'a DynamicTree);

struct Label<'a>(&'a TreeNode);

impl Display for Label<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\"{},{}\"", self.0.vertex, JsNumber(self.0.value))
    }
}

/// Shortest round-trip digits laid out with ECMAScript's number-to-string
/// rules: plain notation for decimal exponents in `-6..21`, exponent notation
/// with an explicit sign otherwise.
struct JsNumber(f64);

impl Display for JsNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let value = self.0;
        match value.classify() {
            FpCategory::Nan => return f.write_str("NaN"),
            FpCategory::Zero => return f.write_str("0"),
            FpCategory::Infinite if value.is_sign_negative() => return f.write_str("-Infinity"),
            FpCategory::Infinite => return f.write_str("Infinity"),
            FpCategory::Normal | FpCategory::Subnormal => {}
        }

        let scientific = format!("{:e}", value.abs());
        let (mantissa, exponent) = scientific.split_once('e').ok_or(fmt::Error)?;
        let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
        let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
        let count = i32::try_from(digits.len()).map_err(|_| fmt::Error)?;
        // Position of the decimal point relative to the first digit.
        let point = exponent + 1;

        if value.is_sign_negative() {
            f.write_str("-")?;
        }
        if count <= point && point <= 21 {
            f.write_str(&digits)?;
            for _ in count..point {
                f.write_str("0")?;
            }
            Ok(())
        } else if 0 < point && point <= 21 {
            let split = usize::try_from(point).map_err(|_| fmt::Error)?;
            let (whole, fraction) = digits.split_at_checked(split).ok_or(fmt::Error)?;
            write!(f, "{whole}.{fraction}")
        } else if -6 < point && point <= 0 {
            f.write_str("0.")?;
            for _ in point..0 {
                f.write_str("0")?;
            }
            f.write_str(&digits)
        } else {
            let mut chars = digits.chars();
            let lead = chars.next().ok_or(fmt::Error)?;
            let rest = chars.as_str();
            let sign = if exponent < 0 { '-' } else { '+' };
            let magnitude = exponent.unsigned_abs();
            if rest.is_empty() {
                write!(f, "{lead}e{sign}{magnitude}")
            } else {
                write!(f, "{lead}.{rest}e{sign}{magnitude}")
            }
        }
    }
}

impl Display for Dot<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let tree = self.0;
        f.write_str("digraph G {\n")?;

        let mut ranked: Vec<&TreeNode> = tree.live_nodes().collect();
        ranked.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.vertex.cmp(&b.vertex)));

        if !ranked.is_empty() {
            for rank in 0..ranked.len() {
                writeln!(f, "r{rank} [style=invis];")?;
            }
            f.write_str("r0")?;
            for rank in 1..ranked.len() {
                write!(f, " -> r{rank}")?;
            }
            f.write_str(" [style=invis];\n")?;
        }

        for node in tree.live_nodes() {
            for child in &node.children {
                if let Ok(child_node) = tree.node(*child) {
                    writeln!(f, "{} -> {};", Label(node), Label(child_node))?;
                }
            }
        }

        for (rank, node) in ranked.iter().enumerate() {
            writeln!(f, "{{rank=same; r{rank}; {};}}", Label(node))?;
        }

        f.write_str("}")
    }
}

impl DynamicTree {
    /// Renders the tree as a DOT digraph.
    ///
    /// # Examples
    /// ```
    /// use contour_core::{DynamicTree, TreeKind, VertexId};
    ///
    /// let mut tree = DynamicTree::new(TreeKind::Contour);
    /// tree.add_node(VertexId::new(0), 1.5);
    /// tree.add_node(VertexId::new(1), 4.0);
    /// tree.connect_nodes(VertexId::new(1), VertexId::new(0))?;
    ///
    /// assert_eq!(
    ///     tree.to_dot(),
    ///     "digraph G {\n\
    ///      r0 [style=invis];\n\
    ///      r1 [style=invis];\n\
    ///      r0 -> r1 [style=invis];\n\
    ///      \"1,4\" -> \"0,1.5\";\n\
    ///      {rank=same; r0; \"1,4\";}\n\
    ///      {rank=same; r1; \"0,1.5\";}\n\
    ///      }",
    /// );
    /// # Ok::<(), contour_core::TreeError>(())
    /// ```
    #[must_use]
    pub fn to_dot(&self) -> String {
        Dot(self).to_string()
    }

    /// Writes the DOT rendering of the tree to `writer`.
    ///
    /// # Errors
    /// Returns any I/O error raised by `writer`.
    pub fn write_dot<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", Dot(self))
    }
}
