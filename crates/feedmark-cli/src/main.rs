//! feedmark CLI - Parse and inspect feedmark documents
//!
//! Usage:
//!   fmcli [OPTIONS] <FILE>
//!
//! Commands:
//!   parse     Parse and display document structure (default)
//!   outline   Extract the document title and section parts
//!   stats     Show document statistics

use std::env;
use std::fs;
use std::process;

use feedmark_core::ast::{HttpPart, Inline, ListEntry, Node};
use feedmark_core::{outline, Parser, DEFAULT_MAX_DEPTH};
use serde::Serialize;

fn main() {
    let args: Vec<String> = env::args().collect();

    match run(&args) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let config = parse_args(args)?;

    let input = fs::read_to_string(&config.file)
        .map_err(|e| format!("failed to read '{}': {}", config.file, e))?;

    let parser = Parser::new().max_depth(config.max_depth);
    let ast = parser.parse(&input).map_err(|e| e.to_string())?;

    match config.command {
        Command::Parse => cmd_parse(&ast, &config),
        Command::Outline => cmd_outline(&ast, &config),
        Command::Stats => cmd_stats(&ast, &input),
    }
}

#[derive(Debug)]
struct Config {
    command: Command,
    file: String,
    format: OutputFormat,
    verbose: bool,
    max_depth: usize,
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Parse,
    Outline,
    Stats,
}

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut command = Command::Parse;
    let mut format = OutputFormat::Text;
    let mut verbose = false;
    let mut max_depth = DEFAULT_MAX_DEPTH;
    let mut file = None;

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "-V" | "--version" => {
                println!("fmcli {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "-j" | "--json" => format = OutputFormat::Json,
            "--max-depth" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| "--max-depth requires a value".to_string())?;
                max_depth = value
                    .parse()
                    .map_err(|_| format!("invalid --max-depth value: {}", value))?;
            }
            "parse" => command = Command::Parse,
            "outline" => command = Command::Outline,
            "stats" => command = Command::Stats,
            _ if arg.starts_with('-') => {
                return Err(format!("unknown option: {}", arg));
            }
            _ => {
                if file.is_some() {
                    return Err("multiple files specified".to_string());
                }
                file = Some(arg.clone());
            }
        }
        i += 1;
    }

    let file = file.ok_or_else(|| "no input file specified".to_string())?;

    Ok(Config {
        command,
        file,
        format,
        verbose,
        max_depth,
    })
}

fn print_help() {
    eprintln!(
        r#"fmcli - feedmark document parser

USAGE:
    fmcli [OPTIONS] [COMMAND] <FILE>

COMMANDS:
    parse       Parse and display document structure (default)
    outline     Extract the document title and section parts
    stats       Show document statistics

OPTIONS:
    -v, --verbose      Show detailed AST structure
    -j, --json         Output in JSON format
        --max-depth N  Maximum quote/note/list nesting depth
    -h, --help         Print help information
    -V, --version      Print version information

EXAMPLES:
    fmcli document.md           Parse a feedmark file
    fmcli -v document.md        Parse with verbose output
    fmcli -j document.md        Output AST as JSON
    fmcli outline document.md   Show title and section parts
    fmcli stats document.md     Show document statistics
"#
    );
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(ast: &[Node], config: &Config) -> Result<(), String> {
    match config.format {
        OutputFormat::Json => print_json(ast),
        OutputFormat::Text => {
            if config.verbose {
                print_ast_verbose(ast);
            } else {
                print_ast_summary(ast);
            }
        }
    }

    Ok(())
}

// =============================================================================
// Outline Command
// =============================================================================

fn cmd_outline(ast: &[Node], config: &Config) -> Result<(), String> {
    let outline = outline::extract(ast)
        .ok_or_else(|| "document has no level-1 heading to use as a title".to_string())?;

    match config.format {
        OutputFormat::Json => {
            let parts: Vec<_> = outline
                .parts
                .iter()
                .map(|p| serde_json::json!({"id": p.id, "name": p.name}))
                .collect();
            println!(
                "{}",
                serde_json::json!({"title": outline.title, "parts": parts})
            );
        }
        OutputFormat::Text => {
            println!("Title: {}", outline.title);
            println!("Parts: {}", outline.parts.len());
            for part in &outline.parts {
                println!("  {} ({})", part.name, part.id);
            }
        }
    }

    Ok(())
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(ast: &[Node], input: &str) -> Result<(), String> {
    let stats = AstStats::from_ast(ast, input);

    println!("Document Statistics");
    println!("-------------------");
    println!("Content:");
    println!("  Total blocks:   {}", stats.total_blocks);
    println!("  Headings:       {}", stats.headings);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  Notes:          {}", stats.notes);
    println!("  Quotes:         {}", stats.quotes);
    println!("  Lists:          {}", stats.lists);
    println!("  Code blocks:    {}", stats.code_blocks);
    println!("  Tables:         {}", stats.tables);
    println!("  HTTP routes:    {}", stats.http_routes);
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);

    Ok(())
}

struct AstStats {
    total_blocks: usize,
    headings: usize,
    paragraphs: usize,
    notes: usize,
    quotes: usize,
    lists: usize,
    code_blocks: usize,
    tables: usize,
    http_routes: usize,
    chars: usize,
    words: usize,
    lines: usize,
}

impl AstStats {
    fn from_ast(ast: &[Node], input: &str) -> Self {
        let mut stats = Self {
            total_blocks: 0,
            headings: 0,
            paragraphs: 0,
            notes: 0,
            quotes: 0,
            lists: 0,
            code_blocks: 0,
            tables: 0,
            http_routes: 0,
            chars: input.len(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
        };

        stats.count_nodes(ast);
        stats
    }

    fn count_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.total_blocks += 1;
            match node {
                Node::Heading(_) => self.headings += 1,
                Node::Paragraph(_) => self.paragraphs += 1,
                Node::Note(n) => {
                    self.notes += 1;
                    self.count_nodes(&n.content);
                }
                Node::Quote(q) => {
                    self.quotes += 1;
                    self.count_nodes(&q.content);
                }
                Node::List(l) => {
                    self.lists += 1;
                    self.count_list(l);
                }
                Node::Code(_) => self.code_blocks += 1,
                Node::Table(_) => self.tables += 1,
                Node::Http(_) => self.http_routes += 1,
                _ => {}
            }
        }
    }

    fn count_list(&mut self, list: &feedmark_core::ast::List) {
        for entry in &list.items {
            if let ListEntry::Nested(inner) = entry {
                self.lists += 1;
                self.count_list(inner);
            }
        }
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonNode<'a> {
    Comment {
        text: &'a str,
    },
    Heading {
        level: u8,
        content: Vec<JsonInline<'a>>,
    },
    Paragraph {
        content: Vec<JsonInline<'a>>,
    },
    Note {
        kind: &'a str,
        content: Vec<JsonNode<'a>>,
    },
    Quote {
        content: Vec<JsonNode<'a>>,
    },
    List {
        ordered: bool,
        items: Vec<JsonListEntry<'a>>,
    },
    Http {
        parts: Vec<JsonHttpPart<'a>>,
    },
    Code {
        language: Option<&'a str>,
        content: &'a str,
    },
    Table {
        centered: Vec<bool>,
        head: Vec<Vec<JsonInline<'a>>>,
        rows: Vec<Vec<Vec<JsonInline<'a>>>>,
    },
    Ruler,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonListEntry<'a> {
    Item { content: Vec<JsonInline<'a>> },
    Nested { list: Box<JsonNode<'a>> },
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonHttpPart<'a> {
    Method { name: &'a str },
    Text { content: &'a str },
    Param { name: &'a str },
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonInline<'a> {
    Text {
        content: &'a str,
    },
    Strong {
        content: Vec<JsonInline<'a>>,
    },
    Emphasis {
        content: Vec<JsonInline<'a>>,
    },
    Code {
        content: &'a str,
    },
    Link {
        label: Vec<JsonInline<'a>>,
        target: &'a str,
    },
}

fn print_json(ast: &[Node]) {
    let nodes: Vec<JsonNode<'_>> = ast.iter().map(convert_node).collect();
    match serde_json::to_string_pretty(&nodes) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("error: failed to serialize AST: {}", e),
    }
}

fn convert_node(node: &Node) -> JsonNode<'_> {
    match node {
        Node::Comment(c) => JsonNode::Comment { text: &c.text },
        Node::Heading(h) => JsonNode::Heading {
            level: h.level,
            content: h.content.iter().map(convert_inline).collect(),
        },
        Node::Paragraph(p) => JsonNode::Paragraph {
            content: p.content.iter().map(convert_inline).collect(),
        },
        Node::Note(n) => JsonNode::Note {
            kind: n.kind.as_str(),
            content: n.content.iter().map(convert_node).collect(),
        },
        Node::Quote(q) => JsonNode::Quote {
            content: q.content.iter().map(convert_node).collect(),
        },
        Node::List(l) => convert_list(l),
        Node::Http(h) => JsonNode::Http {
            parts: h
                .parts
                .iter()
                .map(|part| match part {
                    HttpPart::Method(m) => JsonHttpPart::Method { name: m.as_str() },
                    HttpPart::Text(t) => JsonHttpPart::Text { content: t },
                    HttpPart::Param(p) => JsonHttpPart::Param { name: p },
                })
                .collect(),
        },
        Node::Code(c) => JsonNode::Code {
            language: c.language.as_deref(),
            content: &c.content,
        },
        Node::Table(t) => JsonNode::Table {
            centered: t.centered.clone(),
            head: t
                .head
                .iter()
                .map(|cell| cell.iter().map(convert_inline).collect())
                .collect(),
            rows: t
                .rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| cell.iter().map(convert_inline).collect())
                        .collect()
                })
                .collect(),
        },
        Node::Ruler => JsonNode::Ruler,
    }
}

fn convert_list(list: &feedmark_core::ast::List) -> JsonNode<'_> {
    JsonNode::List {
        ordered: list.ordered,
        items: list
            .items
            .iter()
            .map(|entry| match entry {
                ListEntry::Item(content) => JsonListEntry::Item {
                    content: content.iter().map(convert_inline).collect(),
                },
                ListEntry::Nested(inner) => JsonListEntry::Nested {
                    list: Box::new(convert_list(inner)),
                },
            })
            .collect(),
    }
}

fn convert_inline(inline: &Inline) -> JsonInline<'_> {
    match inline {
        Inline::Text(t) => JsonInline::Text { content: t },
        Inline::Strong(content) => JsonInline::Strong {
            content: content.iter().map(convert_inline).collect(),
        },
        Inline::Emphasis(content) => JsonInline::Emphasis {
            content: content.iter().map(convert_inline).collect(),
        },
        Inline::Code(c) => JsonInline::Code { content: c },
        Inline::Link(l) => JsonInline::Link {
            label: l.label.iter().map(convert_inline).collect(),
            target: &l.target,
        },
    }
}

// =============================================================================
// Text Output
// =============================================================================

fn print_ast_summary(ast: &[Node]) {
    println!("Blocks: {}", ast.len());
    for (i, node) in ast.iter().enumerate() {
        println!("  [{}] {}", i + 1, describe_node(node));
    }
}

fn print_ast_verbose(ast: &[Node]) {
    println!("=== feedmark AST ===");
    for (i, node) in ast.iter().enumerate() {
        println!();
        println!("[{}] {}", i + 1, describe_node(node));
        print_node_verbose(node, 1);
    }
}

fn describe_node(node: &Node) -> String {
    match node {
        Node::Comment(_) => "Comment".to_string(),
        Node::Heading(h) => format!("Heading (level {})", h.level),
        Node::Paragraph(_) => "Paragraph".to_string(),
        Node::Note(n) => format!("Note ({})", n.kind.as_str()),
        Node::Quote(_) => "Quote".to_string(),
        Node::List(l) => format!(
            "List ({}, {} entries)",
            if l.ordered { "ordered" } else { "unordered" },
            l.items.len()
        ),
        Node::Http(h) => format!("Http ({})", format_http_parts(&h.parts)),
        Node::Code(c) => format!(
            "Code (lang: {})",
            c.language.as_deref().unwrap_or("none")
        ),
        Node::Table(t) => format!("Table ({} columns, {} rows)", t.head.len(), t.rows.len()),
        Node::Ruler => "Ruler".to_string(),
    }
}

fn print_node_verbose(node: &Node, indent: usize) {
    let prefix = "  ".repeat(indent);

    match node {
        Node::Comment(c) => {
            println!("{}Text: {}", prefix, c.text.replace('\n', "\\n"));
        }
        Node::Heading(h) => {
            println!("{}Content: {}", prefix, format_inlines(&h.content));
        }
        Node::Paragraph(p) => {
            println!("{}Content: {}", prefix, format_inlines(&p.content));
        }
        Node::Note(n) => {
            for (i, inner) in n.content.iter().enumerate() {
                println!("{}Block {}: {}", prefix, i + 1, describe_node(inner));
                print_node_verbose(inner, indent + 1);
            }
        }
        Node::Quote(q) => {
            for (i, inner) in q.content.iter().enumerate() {
                println!("{}Block {}: {}", prefix, i + 1, describe_node(inner));
                print_node_verbose(inner, indent + 1);
            }
        }
        Node::List(l) => print_list_verbose(l, indent),
        Node::Code(c) => {
            let preview: String = c.content.chars().take(60).collect();
            let ellipsis = if c.content.len() > 60 { "..." } else { "" };
            println!(
                "{}Content: {}{}",
                prefix,
                preview.replace('\n', "\\n"),
                ellipsis
            );
        }
        Node::Table(t) => {
            let head: Vec<String> = t.head.iter().map(|c| format_inlines(c)).collect();
            println!("{}Head: {}", prefix, head.join(" | "));
            for (i, row) in t.rows.iter().enumerate() {
                let cells: Vec<String> = row.iter().map(|c| format_inlines(c)).collect();
                println!("{}Row {}: {}", prefix, i + 1, cells.join(" | "));
            }
        }
        _ => {}
    }
}

fn print_list_verbose(list: &feedmark_core::ast::List, indent: usize) {
    let prefix = "  ".repeat(indent);
    for (i, entry) in list.items.iter().enumerate() {
        match entry {
            ListEntry::Item(content) => {
                println!("{}Item {}: {}", prefix, i + 1, format_inlines(content));
            }
            ListEntry::Nested(inner) => {
                println!("{}Nested list:", prefix);
                print_list_verbose(inner, indent + 1);
            }
        }
    }
}

fn format_http_parts(parts: &[HttpPart]) -> String {
    let mut result = String::new();
    for part in parts {
        match part {
            HttpPart::Method(m) => {
                result.push_str(m.as_str());
                result.push(' ');
            }
            HttpPart::Text(t) => result.push_str(t),
            HttpPart::Param(p) => result.push_str(p),
        }
    }
    result
}

fn format_inlines(inlines: &[Inline]) -> String {
    let mut result = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(t) => result.push_str(t),
            Inline::Emphasis(content) => {
                result.push('*');
                result.push_str(&format_inlines(content));
                result.push('*');
            }
            Inline::Strong(content) => {
                result.push_str("**");
                result.push_str(&format_inlines(content));
                result.push_str("**");
            }
            Inline::Code(c) => {
                result.push('`');
                result.push_str(c);
                result.push('`');
            }
            Inline::Link(l) => {
                result.push('[');
                result.push_str(&format_inlines(&l.label));
                result.push_str("](");
                result.push_str(&l.target);
                result.push(')');
            }
        }
    }
    result
}
