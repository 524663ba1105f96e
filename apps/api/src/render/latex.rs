use crate::blocks::models::Block;
use crate::blocks::store::BlockStore;
use crate::errors::AppError;

pub const DEFAULT_TEMPLATE: &str = "default";

const PREAMBLE: &str = r"\documentclass[11pt,a4paper]{article}
\usepackage[utf8]{inputenc}
\usepackage[margin=1in]{geometry}
\usepackage{enumitem}
\usepackage{hyperref}

\begin{document}

\section*{Professional Experience}

";

const END: &str = r"\end{document}";

/// Escapes LaTeX special characters, one character at a time so replacement
/// text is never escaped again.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '\\' => out.push_str(r"\textbackslash{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders blocks as a LaTeX document, one itemized subsection per category
/// in first-seen order.
pub fn render_document(blocks: &[Block], template: &str) -> Result<String, AppError> {
    if template != DEFAULT_TEMPLATE {
        return Err(AppError::Validation(format!("Unknown CV template '{template}'")));
    }

    let mut latex = String::from(PREAMBLE);
    for group in BlockStore::from_blocks(blocks.to_vec()).by_category() {
        latex.push_str(&format!(
            "\\subsection*{{{}}}\n\n",
            escape_latex(&group.category)
        ));
        latex.push_str("\\begin{itemize}[leftmargin=*]\n");
        for block in &group.blocks {
            latex.push_str(&format!("  \\item {}\n", escape_latex(&block.content)));
        }
        latex.push_str("\\end{itemize}\n\n");
    }
    latex.push_str(END);
    Ok(latex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::classify::classify;

    #[test]
    fn test_escape_does_not_double_escape() {
        assert_eq!(escape_latex(r"a\b"), r"a\textbackslash{}b");
        assert_eq!(escape_latex("50% of $2M & {x}"), r"50\% of \$2M \& \{x\}");
        assert_eq!(escape_latex("~^_#"), r"\textasciitilde{}\textasciicircum{}\_\#");
    }

    #[test]
    fn test_render_groups_by_first_seen_category() {
        let blocks = vec![
            classify("SCALE & PERFORMANCE", None, "a", "Cut latency 40%"),
            classify("DEVOPS & OPERATIONAL EXCELLENCE", None, "b", "Automated deploys"),
            classify("SCALE & PERFORMANCE", None, "c", "Sharded the DB"),
        ];
        let doc = render_document(&blocks, "default").unwrap();

        assert!(doc.starts_with(r"\documentclass"));
        assert!(doc.ends_with(r"\end{document}"));
        let scale = doc.find(r"\subsection*{SCALE \& PERFORMANCE}").unwrap();
        let devops = doc.find(r"\subsection*{DEVOPS \& OPERATIONAL EXCELLENCE}").unwrap();
        assert!(scale < devops);
        assert_eq!(doc.matches(r"\subsection*").count(), 2);
        assert!(doc.contains(r"  \item Cut latency 40\%"));
    }

    #[test]
    fn test_render_empty_selection() {
        let doc = render_document(&[], DEFAULT_TEMPLATE).unwrap();
        assert!(!doc.contains(r"\subsection*"));
    }

    #[test]
    fn test_unknown_template_rejected() {
        let result = render_document(&[], "modern");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
