use std::error::Error as _;

use texcv::escape::escape_latex;
use texcv::model::{ResumeDocument, SectionKey};
use texcv::profile::{ProfileFormat, parse_profile};
use texcv::template::{Layout, generate};

fn full_profile() -> ResumeDocument {
    let fixture = include_str!("fixtures/full_profile.yaml");
    parse_profile(fixture, ProfileFormat::Yaml).expect("yaml profile")
}

fn minimal_profile() -> ResumeDocument {
    let fixture = include_str!("fixtures/minimal.json");
    parse_profile(fixture, ProfileFormat::detect(None, fixture)).expect("json profile")
}

/// Each `\begin{..}`/`\end{..}` in order, skipping escaped characters.
fn environment_events(src: &str) -> Vec<(bool, &str)> {
    let mut events = Vec::new();
    let mut i = 0;
    while let Some(offset) = src[i..].find('\\') {
        let at = i + offset;
        let tail = &src[at + 1..];
        for (open, prefix) in [(true, "begin{"), (false, "end{")] {
            if let Some(rest) = tail.strip_prefix(prefix)
                && let Some(close) = rest.find('}')
            {
                events.push((open, &rest[..close]));
            }
        }
        i = at + 1 + tail.chars().next().map_or(0, char::len_utf8);
    }
    events
}

fn assert_balanced(layout: Layout, src: &str) {
    let mut depth = 0_i64;
    let mut chars = src.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                assert!(depth >= 0, "{layout}: unmatched closing brace");
            }
            _ => {}
        }
    }
    assert_eq!(depth, 0, "{layout}: unbalanced braces");

    let mut stack = Vec::new();
    for (open, name) in environment_events(src) {
        if open {
            stack.push(name);
        } else {
            assert_eq!(stack.pop(), Some(name), "{layout}: mismatched \\end{{{name}}}");
        }
    }
    assert!(stack.is_empty(), "{layout}: unclosed environments {stack:?}");
}

/// `src` with the `&` of every `\href` target removed. hyperref reads a raw
/// `&` there as part of the URL, so only `%` and `#` need escaping.
fn without_href_ampersands(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(at) = rest.find("\\href{") {
        let (head, tail) = rest.split_at(at + "\\href{".len());
        out.push_str(head);
        let end = tail.find('}').unwrap_or(tail.len());
        out.push_str(&tail[..end].replace('&', ""));
        rest = &tail[end..];
    }
    out.push_str(rest);
    out
}

fn unescaped_specials(src: &str) -> Vec<char> {
    let src = without_href_ampersands(src);
    let mut found = Vec::new();
    let mut chars = src.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '&' | '%' | '#' => found.push(c),
            _ => {}
        }
    }
    found
}

#[test]
fn classic_experience_end_to_end() {
    let src = generate("classic", &full_profile()).expect("classic");

    let position = src.find("Senior Analyst").expect("position");
    let company = src.find("Acme \\& Co").expect("company");
    let dates = src.find("2020 -- Present").expect("dates");
    let detail = src.find("\\item Built \\$2M data pipeline").expect("detail");
    assert!(position < company && company < dates && dates < detail);

    // The second job has no details, so only the first opens a list.
    let experience = &src[position..src.find("MSc Sports Analytics").expect("education")];
    assert_eq!(experience.matches("\\begin{itemize}").count(), 1);
}

#[test]
fn every_layout_is_a_complete_document() {
    let doc = full_profile();
    for layout in Layout::ALL {
        let src = layout.render(&doc);
        assert!(src.starts_with("\\documentclass"), "{layout}");
        assert!(src.ends_with("\\end{document}"), "{layout}");
        assert_eq!(src.matches("\\begin{document}").count(), 1, "{layout}");
        assert!(src.contains("\\usepackage{fontawesome5}"), "{layout}");
        assert!(src.contains("\\usepackage{hyperref}"), "{layout}");
        assert_balanced(layout, &src);
    }
}

#[test]
fn scalar_fields_appear_escaped_in_every_layout() {
    let doc = full_profile();
    for layout in Layout::ALL {
        let src = layout.render(&doc);
        for (field, value) in doc.scalar_fields() {
            let escaped = escape_latex(value);
            assert!(src.contains(&escaped), "{layout}: missing {field} ({escaped})");
        }
        assert!(!src.contains("R&D"), "{layout}: raw ampersand");
        assert!(!src.contains("Football_Analyst"), "{layout}: raw underscore");
    }
}

#[test]
fn no_unescaped_specials_in_any_layout() {
    let doc = full_profile();
    for layout in Layout::ALL {
        let src = layout.render(&doc);
        assert_eq!(unescaped_specials(&src), Vec::<char>::new(), "{layout}");
        assert!(src.contains("50\\% across \\#2 markets"), "{layout}");
    }
}

#[test]
fn every_populated_section_is_rendered_by_every_layout() {
    let doc = full_profile();
    for layout in Layout::ALL {
        let src = layout.render(&doc);
        for key in SectionKey::ALL {
            assert!(
                src.contains(key.default_heading()),
                "{layout}: missing {key} heading"
            );
        }
        assert!(src.contains("Volunteering"), "{layout}: custom section");
        assert!(src.contains("Youth coaching on weekends"), "{layout}");
    }
}

#[test]
fn hidden_section_is_absent_from_every_layout() {
    let mut doc = full_profile();
    doc.set_hidden(SectionKey::Skills, true);
    for layout in Layout::ALL {
        let src = layout.render(&doc);
        assert!(!src.contains("Core Competencies"), "{layout}");
        assert!(!src.contains("video analysis"), "{layout}");
        assert!(src.contains("Professional Summary"), "{layout}");
    }
}

#[test]
fn references_rows_in_every_layout() {
    let doc = full_profile();
    for layout in Layout::ALL {
        let src = layout.render(&doc);
        assert_eq!(src.matches("\\begin{minipage}[t]").count(), 2, "{layout}");
        assert!(src.contains("\\textbf{Priya Nair}"), "{layout}");
        assert!(
            src.contains("\\href{mailto:ana.ruiz@example.com}{ana.ruiz@example.com}"),
            "{layout}"
        );
        assert!(src.contains("Director, Baker \\& Sons"), "{layout}");
    }
}

#[test]
fn section_links_are_hardened() {
    let src = generate("executive1", &full_profile()).expect("executive1");
    assert!(src.contains(
        "\\href{https://example.com/reports?season=2023\\#latest}{Match reports}"
    ));
    assert!(src.contains("\\href{https://behance.net/zoehart}{behance.net/zoehart}"));
}

#[test]
fn query_string_ampersand_stays_raw_inside_href_target() {
    let doc = full_profile();
    for layout in Layout::ALL {
        let src = layout.render(&doc);
        assert!(
            src.contains("\\href{https://youtube.com/watch?v=1&list=2}{Season highlights}"),
            "{layout}"
        );
        assert_eq!(unescaped_specials(&src), Vec::<char>::new(), "{layout}");
    }
}

#[test]
fn bulleted_sections_strip_typed_markers() {
    let src = generate("modern", &full_profile()).expect("modern");
    assert!(src.contains("\\item UEFA B licence"));
    assert!(src.contains("\\item Analyst of the year 2022"));
    assert!(src.contains("\\item Spanish (C1)"));
    assert!(!src.contains("\\item •"));
}

#[test]
fn minimal_json_profile() {
    let doc = minimal_profile();
    for layout in Layout::ALL {
        let src = layout.render(&doc);
        assert!(src.contains("Career"), "{layout}");
        assert!(src.contains("Riverside AFC"), "{layout}");
        assert!(!src.contains("Club secretary"), "{layout}");
        assert!(!src.contains("Professional Experience"), "{layout}");
        assert!(!src.contains("Education"), "{layout}");
        assert_balanced(layout, &src);
    }
}

#[test]
fn seed_profile_renders_everywhere() {
    let doc = ResumeDocument::seed();
    for layout in Layout::ALL {
        let src = generate(layout.id(), &doc).expect("known layout");
        assert!(src.contains(&escape_latex(&doc.name)), "{layout}");
        assert_balanced(layout, &src);
        assert_eq!(unescaped_specials(&src), Vec::<char>::new(), "{layout}");
    }
}

#[test]
fn unknown_layout_is_an_error() {
    let err = generate("executive3", &ResumeDocument::default()).unwrap_err();
    assert_eq!(err.to_string(), "no such template: executive3");
}

#[test]
fn render_profile_from_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/minimal.json");
    let src = texcv::render_profile(path, "detailed").expect("rendered");
    assert!(src.contains("Riverside AFC"));
    assert!(src.ends_with("\\end{document}"));
}

#[test]
fn render_profile_reports_each_stage() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/minimal.json");
    let err = texcv::render_profile(path, "executive3").unwrap_err();
    assert!(matches!(err, texcv::Error::Layout(_)));
    assert_eq!(err.to_string(), "layout: no such template: executive3");

    let err = texcv::render_profile("/definitely/not/here.yaml", "classic").unwrap_err();
    assert!(matches!(err, texcv::Error::Profile(_)));
    assert!(err.to_string().starts_with("profile: failed to read"));
    assert!(err.source().is_some());
}
