//! LaTeX document assembly and the compile-service URL.
//!
//! Section bodies come from the LLM and are inserted verbatim (after ASCII
//! cleanup). Only the header fields taken from the request are escaped.

use anyhow::Context;
use reqwest::Url;

use crate::resume::models::{Candidate, Links, ResumeLayout, ResumeSections};

const PREAMBLE: &str = r"\documentclass[12pt]{article}
\usepackage[margin=0.7in]{geometry}
\usepackage{helvet}
\renewcommand{\familydefault}{\sfdefault}
\usepackage{enumitem}
\setlist[itemize]{leftmargin=*,noitemsep,topsep=0pt}
\usepackage[hidelinks]{hyperref}
";

const PARACOL_PACKAGE: &str = "\\usepackage{paracol}\n";

const PAGE_SETUP: &str = r"\pagenumbering{gobble}
\linespread{1.1}
";

/// Separator between inline contact items.
const INLINE_SEPARATOR: &str = r" \,|\, ";

/// Unicode punctuation that breaks pdflatex, with ASCII stand-ins.
const UNICODE_REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2011}', "-"),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201c}', "\""),
    ('\u{201d}', "\""),
    ('\u{2022}', "*"),
];

/// Replaces smart quotes, dashes and bullets with ASCII equivalents.
pub fn clean_latex_content(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for c in text.chars() {
        match UNICODE_REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => cleaned.push_str(to),
            None => cleaned.push(c),
        }
    }
    cleaned
}

/// Escapes LaTeX special characters in plain text.
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '^' => escaped.push_str(r"\textasciicircum{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes characters hyperref cannot take raw inside `\href{...}`.
fn escape_url(url: &str) -> String {
    url.replace('%', r"\%").replace('#', r"\#")
}

/// `\href{url}{name}` per link, joined by the inline separator.
pub fn render_links(links: &Links) -> String {
    links
        .0
        .iter()
        .map(|(name, url)| format!(r"\href{{{}}}{{{}}}", escape_url(url), escape_latex(name)))
        .collect::<Vec<_>>()
        .join(INLINE_SEPARATOR)
}

fn render_header(candidate: &Candidate, links: &Links, layout: ResumeLayout) -> String {
    let name = escape_latex(&candidate.name);
    let email_url = escape_url(&candidate.email);
    let email = escape_latex(&candidate.email);
    let phone = escape_latex(&candidate.phone);
    let links = render_links(links);

    let contact = match layout {
        ResumeLayout::Horizontal => {
            let mut items = vec![format!(r"\href{{mailto:{email_url}}}{{{email}}}"), phone];
            if !links.is_empty() {
                items.push(links);
            }
            format!(
                "    {{\\LARGE \\textbf{{ {name} }}}} \\\\[2pt]\n    {}\n",
                items.join(INLINE_SEPARATOR)
            )
        }
        ResumeLayout::Vertical => {
            let mut block = format!(
                "    {{\\LARGE \\textbf{{ {name} }}}} \\\\[4pt]\n    \\href{{mailto:{email_url}}}{{{email}}} \\\\[2pt]\n    {phone}"
            );
            if !links.is_empty() {
                block.push_str(&format!(" \\\\[2pt]\n    {links}"));
            }
            block.push('\n');
            block
        }
    };

    format!("\\begin{{center}}\n{contact}\\end{{center}}\n\\vspace{{4pt}}\n")
}

/// Assembles the full document for `layout` and cleans it for pdflatex.
pub fn assemble_document(
    candidate: &Candidate,
    links: &Links,
    sections: &ResumeSections,
    layout: ResumeLayout,
) -> String {
    let header = render_header(candidate, links, layout);

    let mut parts: Vec<&str> = vec![PREAMBLE];
    if layout == ResumeLayout::Horizontal {
        parts.push(PARACOL_PACKAGE);
    }
    parts.extend([PAGE_SETUP, "\n\\begin{document}\n", header.as_str()]);

    match layout {
        ResumeLayout::Horizontal => parts.extend([
            "\\begin{paracol}{2}\n",
            sections.education.as_str(),
            "\n",
            sections.skills.as_str(),
            "\n\\switchcolumn\n",
            sections.experience.as_str(),
            "\n",
            sections.projects.as_str(),
            "\n\\end{paracol}\n",
            sections.additional.as_str(),
            "\n",
        ]),
        ResumeLayout::Vertical => parts.extend([
            sections.education.as_str(),
            "\n",
            sections.skills.as_str(),
            "\n",
            sections.experience.as_str(),
            "\n",
            sections.projects.as_str(),
            "\n",
            sections.additional.as_str(),
            "\n",
        ]),
    }
    parts.push("\\end{document}\n");

    clean_latex_content(&parts.concat())
}

/// URL that compiles `latex` to PDF on the external service.
pub fn compile_url(base: &str, latex: &str) -> anyhow::Result<Url> {
    Url::parse_with_params(base, &[("text", latex)])
        .with_context(|| format!("invalid LaTeX compile URL '{base}'"))
}
