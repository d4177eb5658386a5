//! Integration tests for the full analysis pipeline.
//!
//! Builds content the way external loader/tokenizer stages would, loads
//! a project configuration from disk, and runs realistic plugins through
//! the runner, validating scope resolution, diagnostic delivery, and the
//! processing-state contract end to end.

use std::io::Write;

use tempfile::NamedTempFile;

use prosecheck::{
    Analysis, AnalysisArguments, AnalysisPlugin, BufferOutput, Content, Line, Location, Project,
    Runner, Severity, Token, Value, FRONTMATTER_MARKER,
};

/// Splits raw text into lines and whitespace tokens, standing in for the
/// external loader and tokenizer stages.
fn load_content(path: &str, raw: &str) -> Content {
    let mut content = Content::new(path);
    for (i, text) in raw.lines().enumerate() {
        let location = Location::for_line(Some(path.to_string()), i as i32);
        content.push_line(Line::new(location, text));
    }
    for line_index in 0..content.lines.len() {
        let words: Vec<String> = content.lines[line_index]
            .text
            .split_whitespace()
            .map(str::to_string)
            .collect();
        for word in words {
            let location = Location::for_line(Some(path.to_string()), line_index as i32);
            let normalized = word.to_lowercase();
            let token = Token::new(location, word).with_normalized(normalized);
            content.push_token(line_index, token).unwrap();
        }
    }
    content.mark_processed("split");
    content.mark_processed("tokenize");
    content
}

/// Document-scoped rule: extracts the frontmatter block into metadata,
/// errors when the opening marker is never closed.
struct FrontmatterPlugin;

impl AnalysisPlugin for FrontmatterPlugin {
    fn process(&self, args: AnalysisArguments<'_>) -> anyhow::Result<()> {
        let content = args.content;
        let output = args.output;

        let Some(open) = content.index_of_line(FRONTMATTER_MARKER, 0) else {
            output.write_info("no frontmatter block");
            content.mark_processed("frontmatter");
            return Ok(());
        };
        match content.index_of_line(FRONTMATTER_MARKER, open + 1) {
            Some(close) => {
                let block = content.text_range(open + 1, close);
                content
                    .metadata
                    .insert("frontmatter".to_string(), Value::from(block));
            }
            None => {
                let location = content.lines[open].location.clone();
                output.write_error("unterminated frontmatter block", &location);
            }
        }
        content.mark_processed("frontmatter");
        Ok(())
    }
}

/// Line-scoped rule: warns when adjacent tokens share a normalized form.
struct EchoWordsPlugin;

impl AnalysisPlugin for EchoWordsPlugin {
    fn process(&self, args: AnalysisArguments<'_>) -> anyhow::Result<()> {
        let containers = args
            .content
            .scoped_tokens(args.analysis.scope.as_deref())?;

        let mut findings = Vec::new();
        for container in &containers {
            for pair in container.tokens().windows(2) {
                if pair[0].normalized == pair[1].normalized {
                    findings.push((
                        format!("repeated word {:?}", pair[1].text),
                        pair[1].location.clone(),
                    ));
                }
            }
        }
        drop(containers);

        for (message, location) in &findings {
            args.output.write_warning(message, location);
        }
        args.content.mark_processed("echo-words");
        Ok(())
    }
}

fn runner() -> Runner {
    Runner::new()
        .with_plugin("frontmatter", Box::new(FrontmatterPlugin))
        .with_plugin("echo-words", Box::new(EchoWordsPlugin))
}

fn project_yaml() -> &'static str {
    r#"
name: "My Novel"
analysis:
  - name: "Frontmatter block"
    plugin: frontmatter
  - name: "No echo words"
    plugin: echo-words
    scope: lines
"#
}

#[test]
fn test_full_pipeline() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", project_yaml()).unwrap();
    let project = Project::parse_file(file.path()).unwrap();
    prosecheck::project::validate(&project).unwrap();

    let raw = "---\ntitle: Test\n---\nIt was was a dark night.";
    let mut content = load_content("ch01.md", raw);
    let mut output = BufferOutput::new();

    runner().run(&mut content, &project, &mut output).unwrap();

    // Stages ran in declaration order, after the loader stages.
    assert_eq!(
        content.processed(),
        ["split", "tokenize", "frontmatter", "echo-words"]
    );

    // Frontmatter block landed in metadata.
    assert_eq!(
        content.metadata["frontmatter"].as_str(),
        Some("title: Test\n")
    );

    // The echo rule flagged the doubled word with its location.
    let diagnostics = output.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert!(diagnostics[0].message.contains("was"));
    let location = diagnostics[0].location.as_ref().unwrap();
    assert_eq!(location.path.as_deref(), Some("ch01.md"));
    assert_eq!(location.begin_line, 3);

    // One bracket per analysis.
    assert_eq!(output.starts(), 2);
    assert_eq!(output.ends(), 2);
}

#[test]
fn test_unterminated_frontmatter_is_an_error() {
    let project = Project {
        name: "My Novel".to_string(),
        analysis: vec![Analysis {
            name: "Frontmatter block".to_string(),
            plugin: "frontmatter".to_string(),
            ..Analysis::default()
        }],
    };

    let mut content = load_content("ch02.md", "---\ntitle: Broken\nNo closing marker here.");
    let mut output = BufferOutput::new();
    runner().run(&mut content, &project, &mut output).unwrap();

    assert!(output.has_errors());
    let diagnostics = output.diagnostics();
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(
        diagnostics[0].location.as_ref().unwrap().begin_line,
        0
    );
    // The stage still recorded itself; the finding went to the sink.
    assert!(content.is_processed("frontmatter"));
}

#[test]
fn test_misconfigured_scope_propagates_but_stays_bracketed() {
    let project = Project {
        name: "My Novel".to_string(),
        analysis: vec![Analysis {
            name: "No echo words".to_string(),
            plugin: "echo-words".to_string(),
            scope: Some("paragraphs".to_string()),
            ..Analysis::default()
        }],
    };

    let mut content = load_content("ch03.md", "Hello world.");
    let mut output = BufferOutput::new();
    let err = runner()
        .run(&mut content, &project, &mut output)
        .unwrap_err();

    assert!(format!("{:#}", err).contains("paragraphs"));
    assert_eq!(output.starts(), 1);
    assert_eq!(output.ends(), 1);
    assert!(!content.is_processed("echo-words"));
}

#[test]
fn test_later_analysis_reads_earlier_metadata() {
    /// Reports whether an earlier stage stored frontmatter.
    struct MetadataReader;

    impl AnalysisPlugin for MetadataReader {
        fn process(&self, args: AnalysisArguments<'_>) -> anyhow::Result<()> {
            match args.content.metadata.get("frontmatter") {
                Some(block) => args.output.write_info(&format!(
                    "frontmatter has {} bytes",
                    block.as_str().map(str::len).unwrap_or(0)
                )),
                None => args.output.write_info("no frontmatter recorded"),
            }
            Ok(())
        }
    }

    let runner = Runner::new()
        .with_plugin("frontmatter", Box::new(FrontmatterPlugin))
        .with_plugin("report", Box::new(MetadataReader));

    let project = Project {
        name: "My Novel".to_string(),
        analysis: vec![
            Analysis {
                plugin: "frontmatter".to_string(),
                ..Analysis::default()
            },
            Analysis {
                plugin: "report".to_string(),
                ..Analysis::default()
            },
        ],
    };

    let mut content = load_content("ch04.md", "---\ntitle: Test\n---\nBody.");
    let mut output = BufferOutput::new();
    runner.run(&mut content, &project, &mut output).unwrap();

    let infos: Vec<&str> = output
        .diagnostics()
        .iter()
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(infos, ["frontmatter has 12 bytes"]);
}
