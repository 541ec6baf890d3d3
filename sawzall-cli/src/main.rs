//! Sawzall CLI
//!
//! Parse HTML from a file, stdin or the command line, select elements with a
//! CSS selector and print them.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use sawzall::dom::NodeId;
use sawzall::html::print_tree;
use sawzall::{Document, Element, parse_document, parse_fragment};
use sawzall_common::warning;

/// Sawzall: query HTML with CSS selectors
#[derive(Parser, Debug)]
#[command(name = "sawzall")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the text of every paragraph
    sawzall -s p --output text page.html

    # Read from stdin, print link targets as JSON
    curl -s https://example.com | sawzall -s 'a[href]' --output json

    # Parse inline HTML as a fragment and dump the tree
    sawzall --fragment --tree --html '<ul><li>One<li>Two</ul>'
"#)]
struct Cli {
    /// Path to an HTML file. Reads stdin when neither this nor --html is given
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Parse the input as a fragment (no implied head or body)
    #[arg(long)]
    fragment: bool,

    /// CSS selector to run; defaults to the root element
    #[arg(short, long, value_name = "SELECTOR")]
    select: Option<String>,

    /// What to print for each selected element
    #[arg(long, value_enum, default_value_t = Output::Html)]
    output: Output,

    /// Print the node tree of each selected element
    #[arg(long)]
    tree: bool,

    /// List parse errors recorded while building the tree
    #[arg(long)]
    issues: bool,

    /// Print warnings about unsupported markup to stderr
    #[arg(long)]
    warnings: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Output {
    /// Tag name
    Name,
    /// Outer HTML
    Html,
    /// Serialized children
    InnerHtml,
    /// Plain text with line breaks around blocks
    Text,
    /// `name="value"` per attribute
    Attrs,
    /// JSON array of name, attributes, text and html
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.warnings {
        warning::set_enabled(true);
    }

    let source = read_input(&cli)?;
    let document = if cli.fragment {
        parse_fragment(&source)
    } else {
        parse_document(&source)
    };

    let elements = match cli.select {
        Some(ref selector) => document.select(selector)?,
        None => vec![document.root_element()],
    };

    if cli.tree {
        print_trees(&document, cli.select.is_some(), &elements);
    } else {
        print_elements(&elements, cli.output)?;
    }

    if cli.issues {
        print_issues(&document);
    }

    Ok(())
}

/// Read the HTML source from --html, the file argument or stdin.
fn read_input(cli: &Cli) -> anyhow::Result<String> {
    if let Some(ref html) = cli.html {
        return Ok(html.clone());
    }
    if let Some(ref path) = cli.path {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()));
    }
    let mut source = String::new();
    let _ = io::stdin()
        .read_to_string(&mut source)
        .context("Failed to read stdin")?;
    Ok(source)
}

fn print_elements(elements: &[Element<'_>], output: Output) -> anyhow::Result<()> {
    if output == Output::Json {
        println!("{}", serde_json::to_string_pretty(elements)?);
        return Ok(());
    }

    for element in elements {
        match output {
            Output::Name => println!("{}", element.name()),
            Output::Html => println!("{}", element.html()),
            Output::InnerHtml => println!("{}", element.inner_html()),
            Output::Text => println!("{}", element.text()),
            Output::Attrs => {
                println!("{}", element.name().bold());
                for (name, value) in element.attrs() {
                    println!("  {}={value:?}", name.cyan());
                }
            }
            Output::Json => {}
        }
    }
    Ok(())
}

/// Dump the node tree. Without a selector the whole document is shown,
/// doctype and top-level comments included.
fn print_trees(document: &Document, selected: bool, elements: &[Element<'_>]) {
    if !selected {
        print_tree(document.tree(), NodeId::ROOT, 0);
        return;
    }
    for element in elements {
        print_tree(document.tree(), element.node_id(), 0);
    }
}

fn print_issues(document: &Document) {
    let issues = document.parse_issues();
    eprintln!("\n{}", "=== Parse Issues ===".bold());
    if issues.is_empty() {
        eprintln!("{}", "none".green());
    }
    for issue in issues {
        eprintln!("  - {}", issue.yellow());
    }
}
