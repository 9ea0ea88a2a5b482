//! Derivation report: pretty-printed blocks followed by code statements

mod code;
mod pretty;

pub use code::CodeFormatter;
pub use pretty::matrix_lines;

use std::io::Write;

use crate::condense::Condensation;
use crate::elements::ElementKind;
use crate::error::CondenseResult;
use crate::options::CondensationOptions;
use crate::symbolic::SymMatrix;

/// Text report of one condensation
///
/// Stiffness entries are emitted as `k.SetSym(i, j, expr)` over the upper
/// triangle, vector entries as `r.SetVec(i, expr)`.
pub struct Report<'a> {
    condensation: &'a Condensation,
    options: &'a CondensationOptions,
    element: Option<ElementKind>,
}

impl<'a> Report<'a> {
    pub fn new(condensation: &'a Condensation, options: &'a CondensationOptions) -> Self {
        Self {
            condensation,
            options,
            element: None,
        }
    }

    /// Name the element whose local system was condensed
    pub fn with_element(mut self, element: ElementKind) -> Self {
        self.element = Some(element);
        self
    }

    pub fn render(&self) -> String {
        let options = self.options;
        let full = &self.condensation.full;
        let code = CodeFormatter::new(options.max_expanded_power);
        let mut lines = vec![format!(
            "Size: {}, hinges: {}",
            self.condensation.size(),
            self.condensation.hinges
        )];

        if let Some(element) = self.element {
            let released: Vec<&str> = self
                .condensation
                .hinges
                .indices()
                .iter()
                .filter_map(|&i| element.dof_label(i))
                .collect();
            lines.push(format!(
                "Element: {}, released: [{}]",
                element,
                released.join(", ")
            ));
        }

        lines.push(String::new());
        if options.show_matrices {
            lines.push("Stiffness matrix:".to_string());
            lines.extend(matrix_lines(&full.k));
            lines.push(String::new());
        }
        for (i, j, entry) in full.k.upper_triangle() {
            lines.push(format!(
                "{}.SetSym({}, {}, {})",
                options.stiffness_name,
                i,
                j,
                code.expr(entry)
            ));
        }

        self.vector_section(&mut lines, "Load vector:", &options.load_name, &full.r, &code);
        self.vector_section(
            &mut lines,
            "Displacement vector:",
            &options.displacement_name,
            &full.d,
            &code,
        );

        let indent = " ".repeat(options.indent);
        lines
            .iter()
            .map(|line| {
                if line.is_empty() {
                    "\n".to_string()
                } else {
                    format!("{}{}\n", indent, line)
                }
            })
            .collect()
    }

    fn vector_section(
        &self,
        lines: &mut Vec<String>,
        title: &str,
        name: &str,
        v: &SymMatrix,
        code: &CodeFormatter,
    ) {
        lines.push(String::new());
        if self.options.show_matrices {
            lines.push(title.to_string());
            lines.extend(matrix_lines(v));
            lines.push(String::new());
        }
        for i in 0..v.nrows() {
            lines.push(format!("{}.SetVec({}, {})", name, i, code.expr(v.entry(i))));
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> CondenseResult<()> {
        out.write_all(self.render().as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
