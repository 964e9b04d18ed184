use crate::escape::{escape_latex, protect_line_start, sanitize_mailto, strip_prefix_ignore_case};

const COLUMN_WIDTH: &str = "0.48\\linewidth";
const ROW_GAP: &str = "\\vspace{6pt}";

/// Render blank-line separated reference records.
///
/// Records are placed two per row in side-by-side minipages. A trailing odd
/// record is stacked on its own below the rows.
pub fn render_references(raw: &str) -> String {
    let records = parse_records(raw);

    records
        .chunks(2)
        .map(|row| match row {
            [left, right] => format!(
                "{}\n\\hfill\n{}",
                minipage(&render_record(left)),
                minipage(&render_record(right)),
            ),
            [single] => format!("{{\\small\n{}\n}}", render_record(single)),
            _ => String::new(),
        })
        .collect::<Vec<_>>()
        .join(&format!("\n\n{ROW_GAP}\n\n"))
}

pub(crate) fn parse_records(raw: &str) -> Vec<Vec<&str>> {
    let mut records = Vec::new();
    let mut current = Vec::new();

    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                records.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        records.push(current);
    }

    records
}

fn render_record(lines: &[&str]) -> String {
    let mut rendered = Vec::with_capacity(lines.len());
    let mut iter = lines.iter();

    if let Some(name) = iter.next() {
        rendered.push(format!("\\textbf{{{}}}", escape_latex(name)));
    }
    rendered.extend(iter.map(|line| render_contact_line(line)));

    rendered.join("\\\\\n")
}

fn render_contact_line(line: &str) -> String {
    if let Some(number) = strip_prefix_ignore_case(line, "phone:") {
        return format!("\\faPhone\\ {}", escape_latex(number.trim()));
    }
    if let Some(address) = strip_prefix_ignore_case(line, "email:") {
        let address = address.trim();
        return match sanitize_mailto(address) {
            Some(target) => format!(
                "\\faEnvelope\\ \\href{{{target}}}{{{}}}",
                escape_latex(address)
            ),
            None => "\\faEnvelope".to_string(),
        };
    }
    protect_line_start(escape_latex(line))
}

fn minipage(body: &str) -> String {
    format!("\\begin{{minipage}}[t]{{{COLUMN_WIDTH}}}\n\\small\n{body}\n\\end{{minipage}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_records_is_empty() {
        assert_eq!(render_references(""), "");
        assert_eq!(render_references("\n  \n\n"), "");
    }

    #[test]
    fn records_split_on_blank_runs() {
        let records = parse_records("A\nB\n\n\n\nC\n  \nD  ");
        assert_eq!(records, vec![vec!["A", "B"], vec!["C"], vec!["D"]]);
    }

    #[test]
    fn two_records_side_by_side() {
        let out = render_references("Alice\nPhone: 111\n\nBob\nPhone: 222");
        assert_eq!(out.matches("\\begin{minipage}").count(), 2);
        assert_eq!(out.matches("\\end{minipage}").count(), 2);

        let alice = out.find("\\textbf{Alice}").unwrap();
        let first_phone = out.find("\\faPhone\\ 111").unwrap();
        let split = out.find("\\hfill").unwrap();
        let bob = out.find("\\textbf{Bob}").unwrap();
        let second_phone = out.find("\\faPhone\\ 222").unwrap();
        assert!(alice < first_phone && first_phone < split);
        assert!(split < bob && bob < second_phone);
    }

    #[test]
    fn single_record_is_stacked() {
        let out = render_references("Alice\nManager, Acme & Co");
        assert!(!out.contains("minipage"));
        assert_eq!(out, "{\\small\n\\textbf{Alice}\\\\\nManager, Acme \\& Co\n}");
    }

    #[test]
    fn third_record_goes_below() {
        let out = render_references("A\n\nB\n\nC");
        assert_eq!(out.matches("\\begin{minipage}").count(), 2);
        let row_end = out.rfind("\\end{minipage}").unwrap();
        let third = out.find("\\textbf{C}").unwrap();
        assert!(row_end < third);
    }

    #[test]
    fn prefixes_are_case_insensitive() {
        let out = render_references("Alice\nPHONE: +44 1\nemail: a_b@x.org");
        assert!(out.contains("\\faPhone\\ +44 1"));
        assert!(out.contains("\\faEnvelope\\ \\href{mailto:a_b@x.org}{a\\_b@x.org}"));
    }

    #[test]
    fn bracketed_line_is_not_an_optional_argument() {
        let out = render_references("Alice\n[on leave]");
        assert!(out.contains("\\\\\n{}[on leave]"));
    }

    #[test]
    fn lines_use_forced_breaks() {
        let out = render_references("Alice\nRole\nPhone: 1");
        assert!(out.contains("\\textbf{Alice}\\\\\nRole\\\\\n\\faPhone"));
        assert!(!out.contains("\n\n"));
    }
}
