//! Template Compositor — maps a structured resume to LaTeX document source.
//!
//! Pure and deterministic: no I/O, no side effects, safe to call repeatedly
//! and concurrently. Every user-supplied string passes through
//! [`escape_latex`] before interpolation, so free text containing LaTeX
//! syntax cannot alter document structure or smuggle in commands.

use std::fmt::Write;

use crate::models::resume::ResumeData;

/// Skill strings are joined with this separator on the Skills line.
const SKILL_SEPARATOR: &str = ", ";

const PREAMBLE: &str = "\\documentclass{article}\n\
\\usepackage{geometry}\n\
\\geometry{a4paper, margin=1in}\n\
\\begin{document}\n\n";

/// Escapes the ten characters that are syntactically significant to LaTeX.
///
/// Backslash, caret and tilde have no single-character escape and map to
/// their `\text...{}` command forms.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '$' => out.push_str("\\$"),
            '&' => out.push_str("\\&"),
            '#' => out.push_str("\\#"),
            '%' => out.push_str("\\%"),
            '_' => out.push_str("\\_"),
            '^' => out.push_str("\\textasciicircum{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a complete, compilable LaTeX document for one resume.
///
/// Sections appear in a fixed order (Work Experience, Projects, Education,
/// Skills); entries render in input list order. An empty list yields the
/// section heading with an empty body.
pub fn compose_resume(data: &ResumeData) -> String {
    let mut doc = String::with_capacity(2048);
    doc.push_str(PREAMBLE);

    // Identity block
    let _ = writeln!(doc, "\\begin{{center}}");
    let _ = writeln!(
        doc,
        "    {{\\LARGE \\textbf{{{}}}}} \\\\",
        escape_latex(&data.name)
    );
    let _ = writeln!(doc, "    \\vspace{{0.2cm}}");
    let _ = writeln!(
        doc,
        "    {} | {} | {} \\\\",
        escape_latex(&data.location),
        escape_latex(&data.phone),
        escape_latex(&data.email)
    );
    let _ = writeln!(doc, "\\end{{center}}");
    doc.push('\n');

    push_section_heading(&mut doc, "Work Experience");
    for exp in &data.work_experience_list {
        push_entry(
            &mut doc,
            format!(
                "\\textbf{{{}}} at {}",
                escape_latex(&exp.title),
                escape_latex(&exp.company)
            ),
            format!(
                "{} | {} -- {}",
                escape_latex(&exp.city),
                escape_latex(&exp.start_date),
                escape_latex(&exp.end_date)
            ),
            &exp.description,
        );
    }

    push_section_heading(&mut doc, "Projects");
    for project in &data.side_project_list {
        push_entry(
            &mut doc,
            format!("\\textbf{{{}}}", escape_latex(&project.project_name)),
            format!(
                "{} -- {}",
                escape_latex(&project.start_date),
                escape_latex(&project.end_date)
            ),
            &project.description,
        );
    }

    push_section_heading(&mut doc, "Education");
    for edu in &data.education_experience_list {
        push_entry(
            &mut doc,
            format!(
                "\\textbf{{{}}} at {}",
                escape_latex(&edu.degree),
                escape_latex(&edu.school)
            ),
            format!(
                "{} | {} -- {}",
                escape_latex(&edu.city),
                escape_latex(&edu.start_date),
                escape_latex(&edu.end_date)
            ),
            &edu.description,
        );
    }

    push_section_heading(&mut doc, "Skills");
    let skills: Vec<String> = data.skills_list.iter().map(|s| escape_latex(s)).collect();
    let _ = writeln!(doc, "{}", skills.join(SKILL_SEPARATOR));
    doc.push('\n');

    doc.push_str("\\end{document}\n");
    doc
}

fn push_section_heading(doc: &mut String, title: &str) {
    let _ = writeln!(doc, "\\section*{{{title}}}");
}

/// One experience / project / education entry: bold title line, metadata
/// line, description line, fixed vertical gap.
fn push_entry(doc: &mut String, title_line: String, meta_line: String, description: &str) {
    let _ = writeln!(doc, "{title_line} \\\\");
    let _ = writeln!(doc, "{meta_line} \\\\");
    let _ = writeln!(doc, "{} \\\\", escape_latex(description));
    let _ = writeln!(doc, "\\vspace{{0.5cm}}");
    doc.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationExperience, SideProject, WorkExperience};

    fn minimal_data() -> ResumeData {
        ResumeData {
            name: "Ada Lovelace".to_string(),
            location: "London".to_string(),
            phone: "+44 1234 567890".to_string(),
            email: "ada@example.org".to_string(),
            ..ResumeData::default()
        }
    }

    fn ada_fixture() -> ResumeData {
        ResumeData {
            work_experience_list: vec![WorkExperience {
                company: "Analytical Engines".to_string(),
                title: "Engineer".to_string(),
                city: "London".to_string(),
                start_date: "2020-01".to_string(),
                end_date: "2022-01".to_string(),
                description: "Built programs.".to_string(),
            }],
            skills_list: vec!["Math".to_string(), "Logic".to_string()],
            ..minimal_data()
        }
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_latex("Built programs."), "Built programs.");
    }

    #[test]
    fn test_escape_single_char_specials() {
        assert_eq!(escape_latex("R&D"), "R\\&D");
        assert_eq!(escape_latex("100%"), "100\\%");
        assert_eq!(escape_latex("$5"), "\\$5");
        assert_eq!(escape_latex("#1"), "\\#1");
        assert_eq!(escape_latex("snake_case"), "snake\\_case");
        assert_eq!(escape_latex("{x}"), "\\{x\\}");
    }

    #[test]
    fn test_escape_command_chars() {
        assert_eq!(escape_latex("a\\b"), "a\\textbackslash{}b");
        assert_eq!(escape_latex("x^2"), "x\\textasciicircum{}2");
        assert_eq!(escape_latex("~/bin"), "\\textasciitilde{}/bin");
    }

    #[test]
    fn test_empty_lists_render_all_section_headings() {
        let source = compose_resume(&minimal_data());
        assert!(source.contains("\\section*{Work Experience}"));
        assert!(source.contains("\\section*{Projects}"));
        assert!(source.contains("\\section*{Education}"));
        assert!(source.contains("\\section*{Skills}"));
        // Empty sections carry no entry markup and no placeholder text.
        assert!(!source.contains("\\vspace{0.5cm}"));
        assert!(!source.contains(" at "));
    }

    #[test]
    fn test_document_is_complete() {
        let source = compose_resume(&minimal_data());
        assert!(source.starts_with("\\documentclass{article}"));
        assert!(source.contains("\\begin{document}"));
        assert!(source.trim_end().ends_with("\\end{document}"));
    }

    #[test]
    fn test_entries_preserve_input_order() {
        let mut data = minimal_data();
        data.work_experience_list = vec![
            WorkExperience {
                company: "First Corp".to_string(),
                title: "Junior".to_string(),
                ..WorkExperience::default()
            },
            WorkExperience {
                company: "Second Corp".to_string(),
                title: "Senior".to_string(),
                ..WorkExperience::default()
            },
        ];
        data.education_experience_list = vec![
            EducationExperience {
                school: "Alpha University".to_string(),
                ..EducationExperience::default()
            },
            EducationExperience {
                school: "Beta College".to_string(),
                ..EducationExperience::default()
            },
        ];
        let source = compose_resume(&data);
        assert!(source.find("First Corp").unwrap() < source.find("Second Corp").unwrap());
        assert!(source.find("Alpha University").unwrap() < source.find("Beta College").unwrap());
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let data = ada_fixture();
        assert_eq!(compose_resume(&data), compose_resume(&data));
    }

    #[test]
    fn test_project_metadata_is_date_range_only() {
        let mut data = minimal_data();
        data.side_project_list = vec![SideProject {
            project_name: "Difference Engine".to_string(),
            start_date: "1833".to_string(),
            end_date: "1842".to_string(),
            description: "Mechanical computation.".to_string(),
        }];
        let source = compose_resume(&data);
        assert!(source.contains("\\textbf{Difference Engine} \\\\"));
        assert!(source.contains("1833 -- 1842 \\\\"));
    }

    #[test]
    fn test_skills_joined_with_comma_space() {
        let source = compose_resume(&ada_fixture());
        assert!(source.contains("Math, Logic"));
    }

    #[test]
    fn test_injection_in_description_is_neutralized() {
        let mut data = minimal_data();
        data.work_experience_list = vec![WorkExperience {
            description: "\\input{/etc/passwd} & $x_1$ 100%".to_string(),
            ..WorkExperience::default()
        }];
        let source = compose_resume(&data);
        assert!(!source.contains("\\input{"));
        assert!(source.contains("\\textbackslash{}input\\{/etc/passwd\\}"));
        assert!(source.contains("\\&"));
        assert!(source.contains("\\$x\\_1\\$"));
        assert!(source.contains("100\\%"));
    }

    #[test]
    fn test_injection_in_name_is_neutralized() {
        let mut data = minimal_data();
        data.name = "Ada} \\end{document}".to_string();
        let source = compose_resume(&data);
        // The document still terminates exactly once, at our own epilogue.
        assert_eq!(source.matches("\\end{document}").count(), 1);
        assert!(source.contains("Ada\\} \\textbackslash{}end\\{document\\}"));
    }

    #[test]
    fn test_ada_lovelace_end_to_end() {
        let source = compose_resume(&ada_fixture());
        assert!(source.contains("Ada Lovelace"));

        let work_section = &source[source.find("\\section*{Work Experience}").unwrap()
            ..source.find("\\section*{Projects}").unwrap()];
        assert!(work_section.contains("Engineer"));
        assert!(work_section.contains("Analytical Engines"));
        assert!(work_section.contains("London | 2020-01 -- 2022-01"));
        assert!(work_section.contains("Built programs."));

        let skills_section = &source[source.find("\\section*{Skills}").unwrap()..];
        assert!(skills_section.contains("Math, Logic"));
    }
}
